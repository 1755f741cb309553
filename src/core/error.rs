//! Fehler-Taxonomie der Ketten-Engine.

use super::{LinkId, ModuleId, ParamId};
use thiserror::Error;

/// Gründe, aus denen ein Link nicht erstellt oder geroutet werden kann.
///
/// Innerhalb der Link-Zustandsmaschine werden diese Fehler lokal behandelt
/// (Link verwerfen, Zustand zurücksetzen) und nie an den Host gemeldet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    /// Beide Semantik-Typen gesetzt, aber verschieden
    #[error("inkompatible Semantik-Typen {from:?} → {to:?}")]
    IncompatibleTypes {
        from: Option<String>,
        to: Option<String>,
    },
    /// Der Ziel-Input hat bereits einen eingehenden Link
    #[error("Input {0} ist bereits verbunden")]
    InputAlreadyBound(ParamId),
    /// Beide Parameter gehören zum selben Modul (Self-Loop)
    #[error("Parameter {0} und {1} gehören zum selben Modul")]
    SameModule(ParamId, ParamId),
    /// Beide Parameter liegen auf derselben Seite (Input/Input oder Output/Output)
    #[error("Parameter {0} und {1} liegen auf derselben Seite")]
    SameSide(ParamId, ParamId),
    /// Parameter existiert nicht (mehr)
    #[error("unbekannter Parameter {0}")]
    UnknownParameter(ParamId),
    /// Link existiert nicht (mehr)
    #[error("unbekannter Link {0}")]
    UnknownLink(LinkId),
    /// Link ist bereits geschlossen
    #[error("Link {0} ist nicht offen")]
    LinkNotOpen(LinkId),
    /// Ein Endpunkt-Parameter des Links wurde entfernt
    #[error("Link {0} verweist auf einen entfernten Parameter")]
    DanglingReference(LinkId),
}

/// Fehler der Layering-Engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// Der Modul-Graph enthält einen Zyklus; `module` liegt auf ihm
    #[error("Kette enthält einen Zyklus (u.a. über {module})")]
    CyclicGraph { module: ModuleId },
}
