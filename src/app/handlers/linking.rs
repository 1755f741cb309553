//! Handler für Zeiger-Commands: ein Switch über (Zustand, Pick-Rolle).

use crate::app::linking::{transitions, LinkingState};
use crate::app::pick::{pick, PickRole};
use crate::app::state::{EditorState, Selection};
use crate::layout;
use glam::Vec2;

/// Einfach-Klick (Press).
pub fn click(state: &mut EditorState, pos: Vec2) {
    let role = pick(&state.graph, &state.options, pos);
    let current = state.linking.clone();

    let next = match (current, role) {
        (LinkingState::NotLinking, role) => return idle_click(state, role),

        (LinkingState::LinkingParameters { link }, PickRole::Parameter(target)) => {
            transitions::finish_parameter_link(&mut state.graph, link, target, &state.options)
        }
        (LinkingState::LinkingParameters { link }, PickRole::Canvas) => {
            transitions::insert_parameter_link_point(&mut state.graph, link, pos, &state.options)
        }
        (LinkingState::LinkingParameters { link }, _) => LinkingState::LinkingParameters { link },

        (
            LinkingState::LinkingModules {
                origin,
                side,
                links,
            },
            PickRole::Canvas,
        ) => transitions::insert_module_link_points(
            &mut state.graph,
            origin,
            side,
            links,
            pos,
            &state.options,
        ),
        (linking @ LinkingState::LinkingModules { .. }, _) => linking,

        (LinkingState::LinkCancelling, _) => transitions::absorb_cancel_click(),

        (LinkingState::EditingLinkPoint { .. }, PickRole::Canvas) => {
            state.selection = Selection::None;
            transitions::end_point_edit()
        }
        (LinkingState::EditingLinkPoint { .. }, role) => {
            state.enter(transitions::end_point_edit());
            return idle_click(state, role);
        }
    };
    state.enter(next);
}

/// Klick im Ruhezustand: Link starten, Handle greifen oder selektieren.
fn idle_click(state: &mut EditorState, role: PickRole) {
    let next = match role {
        PickRole::Parameter(param) if state.graph.can_be_link_origin(param) => {
            transitions::start_parameter_link(&mut state.graph, param)
        }
        PickRole::Parameter(param) => {
            state.selection = state
                .graph
                .module_of(param)
                .map_or(Selection::None, Selection::Module);
            LinkingState::NotLinking
        }
        PickRole::LinkHandle { link, point } => {
            state.selection = Selection::Link(link);
            transitions::begin_point_edit(&state.graph, link, point)
        }
        PickRole::Module(module) => {
            state.selection = Selection::Module(module);
            LinkingState::NotLinking
        }
        PickRole::Link(link) => {
            state.selection = Selection::Link(link);
            LinkingState::NotLinking
        }
        PickRole::Canvas => {
            state.selection = Selection::None;
            LinkingState::NotLinking
        }
    };
    state.enter(next);
}

/// Doppelklick.
pub fn double_click(state: &mut EditorState, pos: Vec2) {
    let role = pick(&state.graph, &state.options, pos);
    let target = role.owning_module(&state.graph);
    let current = state.linking.clone();

    let next = match current {
        LinkingState::NotLinking => match target {
            Some(module) if state.graph.is_linkable(module) => {
                transitions::start_module_link(&mut state.graph, module, pos)
            }
            _ => LinkingState::NotLinking,
        },
        LinkingState::LinkingParameters { link } => {
            transitions::cancel_parameter_link(&mut state.graph, link)
        }
        LinkingState::LinkingModules { origin, ref links, .. } => match target {
            Some(module) => transitions::finish_module_link(
                &mut state.graph,
                origin,
                links,
                module,
                &state.options,
            ),
            None => transitions::abort_linking(&mut state.graph, &current),
        },
        LinkingState::LinkCancelling => transitions::absorb_cancel_click(),
        LinkingState::EditingLinkPoint { .. } => {
            state.selection = Selection::None;
            transitions::end_point_edit()
        }
    };
    state.enter(next);
}

/// Zeigerbewegung ohne gedrückte Taste.
pub fn motion(state: &mut EditorState, pos: Vec2) {
    let current = state.linking.clone();
    match current {
        LinkingState::LinkingParameters { link } => {
            let candidate = transitions::link_candidate(&state.graph, link, pos, &state.options);
            let next =
                transitions::extend_parameter_link(&mut state.graph, link, pos, &state.options);
            state.enter(next);
            if let Some(param) = candidate {
                state.highlights.insert_param(param);
            }
        }
        LinkingState::LinkingModules {
            origin,
            side,
            links,
        } => {
            let next = transitions::extend_module_links(
                &mut state.graph,
                origin,
                side,
                links,
                pos,
                &state.options,
            );
            state.enter(next);
            let hovered = pick(&state.graph, &state.options, pos).owning_module(&state.graph);
            if let Some(module) = hovered {
                if module != origin && state.graph.is_linkable(module) {
                    state.highlights.insert_module(module);
                }
            }
        }
        _ => {}
    }
}

/// Drag mit gedrückter Taste.
pub fn drag(state: &mut EditorState, pos: Vec2, delta: Vec2) {
    match state.linking.clone() {
        LinkingState::EditingLinkPoint { link, point } => {
            let next =
                transitions::drag_link_point(&mut state.graph, link, point, pos, &state.options);
            if next == LinkingState::NotLinking {
                state.selection = Selection::None;
            }
            state.enter(next);
        }
        LinkingState::LinkingParameters { .. } | LinkingState::LinkingModules { .. } => {
            motion(state, pos)
        }
        LinkingState::NotLinking => {
            if let Selection::Module(module) = state.selection {
                if state.graph.move_module(module, delta) {
                    layout::reroute_module_links(
                        &mut state.graph,
                        module,
                        state.options.curve_sample_steps,
                    );
                }
            }
        }
        LinkingState::LinkCancelling => {}
    }
}

/// Loslassen der Taste.
pub fn release(state: &mut EditorState, _pos: Vec2) {
    match state.linking {
        LinkingState::EditingLinkPoint { .. } => {
            state.selection = Selection::None;
            state.enter(transitions::end_point_edit());
        }
        LinkingState::LinkCancelling => state.enter(transitions::absorb_cancel_click()),
        _ => {}
    }
}

/// Escape: offene Links verwerfen bzw. Bearbeitung beenden.
pub fn cancel(state: &mut EditorState) {
    if let LinkingState::EditingLinkPoint { .. } = state.linking {
        state.selection = Selection::None;
    }
    let current = state.linking.clone();
    let next = transitions::abort_linking(&mut state.graph, &current);
    state.enter(next);
}
