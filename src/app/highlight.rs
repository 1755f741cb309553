//! Zentrale Highlight-Menge der Link-Zustandsmaschine.

use super::linking::LinkingState;
use crate::core::{ChainGraph, ModuleId, ParamId};
use indexmap::IndexSet;

/// Alle aktuell hervorgehobenen Parameter und Module.
///
/// Wird bei jedem Zustandswechsel komplett neu aufgebaut; Einzel-Löschungen
/// an Parametern oder Modulen gibt es nicht.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightSet {
    params: IndexSet<ParamId>,
    modules: IndexSet<ModuleId>,
}

impl HighlightSet {
    /// Baut die Basis-Hervorhebung eines Zustands.
    pub fn for_state(state: &LinkingState, graph: &ChainGraph) -> Self {
        let mut set = Self::default();
        match state {
            LinkingState::NotLinking | LinkingState::LinkCancelling => {}
            LinkingState::LinkingParameters { link } => {
                if let Some(l) = graph.link(*link) {
                    set.params.insert(l.start);
                }
            }
            LinkingState::LinkingModules { origin, links, .. } => {
                set.modules.insert(*origin);
                for l in links.iter().filter_map(|id| graph.link(*id)) {
                    set.params.insert(l.start);
                }
            }
            LinkingState::EditingLinkPoint { link, .. } => {
                if let Some(l) = graph.link(*link) {
                    set.params.insert(l.start);
                    set.params.extend(l.end);
                }
            }
        }
        set
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty() && self.modules.is_empty()
    }

    pub fn clear(&mut self) {
        self.params.clear();
        self.modules.clear();
    }

    pub fn contains_param(&self, id: ParamId) -> bool {
        self.params.contains(&id)
    }

    pub fn contains_module(&self, id: ModuleId) -> bool {
        self.modules.contains(&id)
    }

    pub fn params(&self) -> impl Iterator<Item = ParamId> + '_ {
        self.params.iter().copied()
    }

    pub fn modules(&self) -> impl Iterator<Item = ModuleId> + '_ {
        self.modules.iter().copied()
    }

    pub(crate) fn insert_param(&mut self, id: ParamId) {
        self.params.insert(id);
    }

    pub(crate) fn insert_module(&mut self, id: ModuleId) {
        self.modules.insert(id);
    }
}
