//! Application Controller für zentrale Event-Verarbeitung.

use super::click_debounce::ClickDebouncer;
use super::{handlers, EditorCommand, EditorIntent, EditorState};
use anyhow::Context;

/// Orchestriert Host-Events und Handler auf den EditorState.
///
/// Trägt als einzigen eigenen Zustand den Doppelklick-Puffer.
#[derive(Debug, Clone)]
pub struct AppController {
    clicks: ClickDebouncer,
}

impl AppController {
    /// Erstellt einen neuen Controller.
    pub fn new(state: &EditorState) -> Self {
        let mut clicks = ClickDebouncer::new(state.options.double_click_window());
        clicks.set_max_distance(state.options.double_click_distance);
        Self { clicks }
    }

    /// Gibt `true` zurück, solange ein Einfach-Klick gepuffert ist.
    pub fn has_pending_click(&self) -> bool {
        self.clicks.has_pending()
    }

    /// Verarbeitet einen Intent über Intent->Command Mapping.
    pub fn handle_intent(
        &mut self,
        state: &mut EditorState,
        intent: EditorIntent,
    ) -> anyhow::Result<()> {
        self.clicks.set_window(state.options.double_click_window());
        self.clicks.set_max_distance(state.options.double_click_distance);
        let commands = super::intent_mapping::map_intent_to_commands(&mut self.clicks, intent);
        for command in commands {
            self.handle_command(state, command)?;
        }

        Ok(())
    }

    /// Führt mutierende Commands auf dem EditorState aus.
    /// Dispatcht an Feature-Handler in `handlers/`.
    pub fn handle_command(
        &mut self,
        state: &mut EditorState,
        command: EditorCommand,
    ) -> anyhow::Result<()> {
        state.command_log.record(&command);

        match command {
            // === Zeiger ===
            EditorCommand::Click { pos } => handlers::linking::click(state, pos),
            EditorCommand::DoubleClick { pos } => handlers::linking::double_click(state, pos),
            EditorCommand::PointerMotion { pos } => handlers::linking::motion(state, pos),
            EditorCommand::PointerDrag { pos, delta } => {
                handlers::linking::drag(state, pos, delta)
            }
            EditorCommand::PointerRelease { pos } => handlers::linking::release(state, pos),
            EditorCommand::CancelLinking => handlers::linking::cancel(state),

            // === Editing ===
            EditorCommand::DeleteSelection => handlers::editing::delete_selection(state),
            EditorCommand::MoveModule { module, delta } => {
                handlers::editing::move_module(state, module, delta)
            }
            EditorCommand::ResizeModule { module, size } => {
                handlers::editing::resize_module(state, module, size)
            }
            EditorCommand::SetParamsVisible { module, visible } => {
                handlers::editing::set_params_visible(state, module, visible)
            }

            // === Layout ===
            EditorCommand::AutoLayout => {
                handlers::layout::auto_layout(state).context("Auto-Layout fehlgeschlagen")?
            }
        }

        Ok(())
    }
}

impl Default for AppController {
    fn default() -> Self {
        Self::new(&EditorState::default())
    }
}
