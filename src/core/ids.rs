//! Stabile Arena-IDs für Module, Parameter und Links.
//!
//! Alle Querverweise (Parameter ↔ Link ↔ Parameter) laufen über diese IDs,
//! nie über Referenzen. Entfernen ist damit ein reines "erase by id".

use std::fmt;

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }
    };
}

arena_id!(
    /// ID eines Moduls in der Kette
    ModuleId,
    "module"
);
arena_id!(
    /// ID eines Input- oder Output-Parameters
    ParamId,
    "param"
);
arena_id!(
    /// ID eines (offenen oder geschlossenen) Links
    LinkId,
    "link"
);
