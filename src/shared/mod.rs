//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält Optionen und reine Geometrie, die von `core`, `layout` und `app`
//! geteilt werden, um direkte Abhängigkeiten zu vermeiden.

pub mod geometry;
pub mod options;

pub use geometry::Rect;
pub use options::{EditorOptions, ModuleSizing};
