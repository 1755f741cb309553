//! Link-Erstellungs-Zustandsmaschine.
//!
//! Jeder Zustand ist eine Variante von [`LinkingState`], jeder Übergang eine
//! benannte Funktion in [`transitions`], die den Folgezustand zurückgibt.
//! Die Funktionen arbeiten nur auf dem `ChainGraph` und sind damit ohne
//! Rendering-Host testbar.

pub mod bulk;
pub mod transitions;

use crate::core::{LinkId, ModuleId, ParamSide};

pub use bulk::BulkOutcome;

/// Zustand der Link-Erstellung.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LinkingState {
    /// Ruhezustand
    #[default]
    NotLinking,
    /// Ein einzelner Link wird von einem Parameter aus gezeichnet
    LinkingParameters { link: LinkId },
    /// Ein Bündel Links wird von allen Parametern einer Modulseite aus gezeichnet
    LinkingModules {
        origin: ModuleId,
        side: ParamSide,
        links: Vec<LinkId>,
    },
    /// Transient: schluckt den Nachläufer eines abbrechenden Doppelklicks
    LinkCancelling,
    /// Ein innerer Kontrollpunkt eines Links wird gezogen
    EditingLinkPoint { link: LinkId, point: usize },
}

impl LinkingState {
    pub fn name(&self) -> &'static str {
        match self {
            LinkingState::NotLinking => "NotLinking",
            LinkingState::LinkingParameters { .. } => "LinkingParameters",
            LinkingState::LinkingModules { .. } => "LinkingModules",
            LinkingState::LinkCancelling => "LinkCancelling",
            LinkingState::EditingLinkPoint { .. } => "EditingLinkPoint",
        }
    }

    /// Gibt `true` zurück, solange offene Links existieren.
    pub fn is_linking(&self) -> bool {
        matches!(
            self,
            LinkingState::LinkingParameters { .. } | LinkingState::LinkingModules { .. }
        )
    }

    /// Alle offenen Links, die dieser Zustand besitzt.
    pub fn open_links(&self) -> Vec<LinkId> {
        match self {
            LinkingState::LinkingParameters { link } => vec![*link],
            LinkingState::LinkingModules { links, .. } => links.clone(),
            _ => Vec::new(),
        }
    }
}
