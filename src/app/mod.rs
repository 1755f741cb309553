//! Application-Layer: Controller, State, Events und Link-Zustandsmaschine.

pub mod click_debounce;
pub mod command_log;
pub mod controller;
pub mod editor;
pub mod events;
pub mod handlers;
pub mod highlight;
mod intent_mapping;
/// Link-Erstellung als explizite Zustandsmaschine
pub mod linking;
pub mod pick;
pub mod state;

pub use click_debounce::ClickDebouncer;
pub use command_log::CommandLog;
pub use controller::AppController;
pub use editor::ChainEditor;
pub use events::{EditorCommand, EditorIntent, Key};
pub use highlight::HighlightSet;
pub use linking::LinkingState;
pub use pick::PickRole;
pub use state::{EditorState, Selection};
