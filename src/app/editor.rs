//! Fassade für Hosts: Zustand und Controller in einem Objekt.

use super::highlight::HighlightSet;
use super::linking::LinkingState;
use super::state::Selection;
use super::{handlers, AppController, CommandLog, EditorCommand, EditorIntent, EditorState};
use crate::core::{ChainDescription, ChainGraph, LayoutError};
use crate::shared::EditorOptions;
use std::time::Duration;

/// Der Ketten-Editor, wie ihn ein Rendering-Host benutzt.
#[derive(Debug, Clone)]
pub struct ChainEditor {
    state: EditorState,
    controller: AppController,
}

impl ChainEditor {
    /// Leerer Editor.
    pub fn new(options: EditorOptions) -> Self {
        Self::with_state(EditorState::new(options))
    }

    /// Lädt eine Kette (Auto-Layout, falls Positionen fehlen).
    pub fn from_description(description: &ChainDescription, options: EditorOptions) -> Self {
        Self::with_state(EditorState::from_description(description, options))
    }

    /// Lädt eine Kette aus JSON, wie sie ein Loader übergibt.
    pub fn from_json(json: &str, options: EditorOptions) -> anyhow::Result<Self> {
        let description = ChainDescription::from_json(json)?;
        Ok(Self::from_description(&description, options))
    }

    fn with_state(state: EditorState) -> Self {
        let controller = AppController::new(&state);
        Self { state, controller }
    }

    /// Verarbeitet eine Host-Eingabe.
    pub fn handle_intent(&mut self, intent: EditorIntent) -> anyhow::Result<()> {
        self.controller.handle_intent(&mut self.state, intent)
    }

    /// Timer des Hosts; löst abgelaufene Einfach-Klicks aus.
    pub fn tick(&mut self, at: Duration) -> anyhow::Result<()> {
        self.handle_intent(EditorIntent::TimerTick { at })
    }

    /// Ordnet die Kette neu an; bei Zyklus bleibt alles unverändert.
    pub fn auto_layout(&mut self) -> Result<(), LayoutError> {
        self.state.command_log.record(&EditorCommand::AutoLayout);
        handlers::layout::auto_layout(&mut self.state)
    }

    /// Export für den Speicher-Service (nur geschlossene Links).
    pub fn to_description(&self) -> ChainDescription {
        self.state.graph.to_description()
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn graph(&self) -> &ChainGraph {
        &self.state.graph
    }

    /// Direkter Graph-Zugriff für programmatische Änderungen.
    pub fn graph_mut(&mut self) -> &mut ChainGraph {
        &mut self.state.graph
    }

    pub fn linking(&self) -> &LinkingState {
        &self.state.linking
    }

    pub fn selection(&self) -> Selection {
        self.state.selection
    }

    pub fn highlights(&self) -> &HighlightSet {
        &self.state.highlights
    }

    pub fn command_log(&self) -> &CommandLog {
        &self.state.command_log
    }

    pub fn has_pending_click(&self) -> bool {
        self.controller.has_pending_click()
    }
}

impl Default for ChainEditor {
    fn default() -> Self {
        Self::new(EditorOptions::default())
    }
}
