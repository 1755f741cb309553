//! Mapping von Host-Intents auf mutierende Editor-Commands.

use super::click_debounce::ClickDebouncer;
use super::{EditorCommand, EditorIntent, Key};

/// Übersetzt einen `EditorIntent` in eine Sequenz ausführbarer `EditorCommand`s.
///
/// Klicks laufen durch den Debouncer. Ereignisse, die eine Klick-Geste
/// beenden (Drag, Taste, Layout), reichen einen wartenden Klick vorher nach;
/// reine Hover-Bewegungen nicht.
pub fn map_intent_to_commands(
    clicks: &mut ClickDebouncer,
    intent: EditorIntent,
) -> Vec<EditorCommand> {
    match intent {
        EditorIntent::PointerPressed {
            pos,
            click_count,
            at,
        } => clicks.press(pos, click_count, at),
        EditorIntent::PointerReleased { pos } => clicks.release(pos),
        EditorIntent::PointerMoved { pos } => vec![EditorCommand::PointerMotion { pos }],
        EditorIntent::PointerDragged { pos, delta } => {
            let mut commands = clicks.flush();
            commands.push(EditorCommand::PointerDrag { pos, delta });
            commands
        }
        EditorIntent::TimerTick { at } => clicks.tick(at),
        EditorIntent::KeyPressed { key } => {
            let command = match key {
                Key::Delete | Key::Backspace => EditorCommand::DeleteSelection,
                Key::Escape => EditorCommand::CancelLinking,
                Key::Other => return Vec::new(),
            };
            let mut commands = clicks.flush();
            commands.push(command);
            commands
        }
        EditorIntent::AutoLayoutRequested => {
            let mut commands = clicks.flush();
            commands.push(EditorCommand::AutoLayout);
            commands
        }
        EditorIntent::ModuleMoveRequested { module, delta } => {
            vec![EditorCommand::MoveModule { module, delta }]
        }
        EditorIntent::ModuleResized { module, size } => {
            vec![EditorCommand::ResizeModule { module, size }]
        }
        EditorIntent::ParamsVisibilityChanged { module, visible } => {
            vec![EditorCommand::SetParamsVisible { module, visible }]
        }
    }
}

#[cfg(test)]
mod tests;
