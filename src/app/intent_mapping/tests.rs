use super::*;
use crate::core::ModuleId;
use glam::Vec2;
use std::time::Duration;

fn debouncer() -> ClickDebouncer {
    ClickDebouncer::new(Duration::from_millis(300))
}

fn press(pos: Vec2, click_count: u8, ms: u64) -> EditorIntent {
    EditorIntent::PointerPressed {
        pos,
        click_count,
        at: Duration::from_millis(ms),
    }
}

#[test]
fn test_drag_flushes_pending_click_first() {
    let mut clicks = debouncer();
    let pos = Vec2::new(10.0, 10.0);
    assert!(map_intent_to_commands(&mut clicks, press(pos, 1, 0)).is_empty());

    let commands = map_intent_to_commands(
        &mut clicks,
        EditorIntent::PointerDragged {
            pos: Vec2::new(12.0, 10.0),
            delta: Vec2::new(2.0, 0.0),
        },
    );
    assert_eq!(
        commands,
        vec![
            EditorCommand::Click { pos },
            EditorCommand::PointerDrag {
                pos: Vec2::new(12.0, 10.0),
                delta: Vec2::new(2.0, 0.0)
            }
        ]
    );
}

#[test]
fn test_hover_does_not_break_double_click() {
    let mut clicks = debouncer();
    let pos = Vec2::new(3.0, 3.0);
    map_intent_to_commands(&mut clicks, press(pos, 1, 0));
    map_intent_to_commands(&mut clicks, EditorIntent::PointerReleased { pos });
    let motion = map_intent_to_commands(&mut clicks, EditorIntent::PointerMoved { pos });
    assert_eq!(motion, vec![EditorCommand::PointerMotion { pos }]);

    assert_eq!(
        map_intent_to_commands(&mut clicks, press(pos, 2, 150)),
        vec![EditorCommand::DoubleClick { pos }]
    );
}

#[test]
fn test_keys_map_to_commands() {
    let mut clicks = debouncer();
    let key = |key| EditorIntent::KeyPressed { key };
    assert_eq!(
        map_intent_to_commands(&mut clicks, key(Key::Delete)),
        vec![EditorCommand::DeleteSelection]
    );
    assert_eq!(
        map_intent_to_commands(&mut clicks, key(Key::Backspace)),
        vec![EditorCommand::DeleteSelection]
    );
    assert_eq!(
        map_intent_to_commands(&mut clicks, key(Key::Escape)),
        vec![EditorCommand::CancelLinking]
    );
    assert!(map_intent_to_commands(&mut clicks, key(Key::Other)).is_empty());
}

#[test]
fn test_module_intents_pass_through() {
    let mut clicks = debouncer();
    let module = ModuleId(3);
    assert_eq!(
        map_intent_to_commands(
            &mut clicks,
            EditorIntent::ParamsVisibilityChanged {
                module,
                visible: false
            }
        ),
        vec![EditorCommand::SetParamsVisible {
            module,
            visible: false
        }]
    );
}
