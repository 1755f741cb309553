//! Zustand des Ketten-Editors.

use super::highlight::HighlightSet;
use super::linking::LinkingState;
use super::CommandLog;
use crate::core::{ChainDescription, ChainGraph, LinkId, ModuleId};
use crate::layout::{self, LayoutResult};
use crate::shared::EditorOptions;

/// Aktuelle Selektion (höchstens ein Element).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    None,
    Module(ModuleId),
    Link(LinkId),
}

/// Hauptzustand des Editors
#[derive(Debug, Clone)]
pub struct EditorState {
    /// Geladene Kette
    pub graph: ChainGraph,
    /// Laufzeit-Optionen
    pub options: EditorOptions,
    /// Zustand der Link-Erstellung
    pub linking: LinkingState,
    pub selection: Selection,
    /// Hervorhebungen, bei jedem Zustandswechsel neu aufgebaut
    pub highlights: HighlightSet,
    /// Verlauf ausgeführter Commands
    pub command_log: CommandLog,
    /// Ergebnis des letzten Auto-Layouts
    pub layout: Option<LayoutResult>,
}

impl EditorState {
    /// Erstellt einen leeren Editor-Zustand.
    pub fn new(options: EditorOptions) -> Self {
        Self {
            graph: ChainGraph::with_sizing(options.module_sizing),
            options,
            linking: LinkingState::NotLinking,
            selection: Selection::None,
            highlights: HighlightSet::default(),
            command_log: CommandLog::new(),
            layout: None,
        }
    }

    /// Lädt eine Kette aus ihrer Beschreibung.
    ///
    /// Haben alle Module eine persistierte Position, werden nur die Links
    /// geroutet; sonst läuft das vollständige Auto-Layout.
    pub fn from_description(description: &ChainDescription, options: EditorOptions) -> Self {
        let mut state = Self::new(options);
        state.graph = ChainGraph::from_description(description, state.options.module_sizing);

        if description.fully_positioned() {
            layout::reroute_all(&mut state.graph, state.options.curve_sample_steps);
            return state;
        }
        match layout::auto_layout(&mut state.graph, &state.options) {
            Ok(result) => state.layout = Some(result),
            Err(e) => {
                log::warn!("Auto-Layout beim Laden nicht möglich: {}", e);
                layout::reroute_all(&mut state.graph, state.options.curve_sample_steps);
            }
        }
        state
    }

    /// Wechselt den Link-Zustand und baut die Hervorhebung neu auf.
    pub(crate) fn enter(&mut self, next: LinkingState) {
        if next != self.linking {
            log::debug!("Linking: {} → {}", self.linking.name(), next.name());
        }
        self.highlights = HighlightSet::for_state(&next, &self.graph);
        self.linking = next;
    }

    pub fn module_count(&self) -> usize {
        self.graph.module_count()
    }

    pub fn link_count(&self) -> usize {
        self.graph.link_count()
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(EditorOptions::default())
    }
}
