//! Handler für das Auto-Layout.

use crate::app::linking::{transitions, LinkingState};
use crate::app::state::{EditorState, Selection};
use crate::core::LayoutError;
use crate::layout;

/// Bricht laufendes Linken ab und ordnet die Kette neu an.
///
/// Bei einem Zyklus bleiben alle Positionen unverändert.
pub fn auto_layout(state: &mut EditorState) -> Result<(), LayoutError> {
    match state.linking {
        LinkingState::LinkingParameters { .. } | LinkingState::LinkingModules { .. } => {
            let current = state.linking.clone();
            let next = transitions::abort_linking(&mut state.graph, &current);
            state.enter(next);
        }
        LinkingState::EditingLinkPoint { .. } => {
            state.selection = Selection::None;
            state.enter(transitions::end_point_edit());
        }
        LinkingState::NotLinking | LinkingState::LinkCancelling => {}
    }

    let result = layout::auto_layout(&mut state.graph, &state.options)?;
    state.layout = Some(result);
    Ok(())
}
