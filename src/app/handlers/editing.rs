//! Handler für Löschen, Verschieben und Host-Geometrie von Modulen.

use crate::app::linking::{transitions, LinkingState};
use crate::app::state::{EditorState, Selection};
use crate::core::ModuleId;
use crate::layout;
use glam::Vec2;

/// Löscht das selektierte Modul bzw. den selektierten Link, unabhängig vom Zustand.
pub fn delete_selection(state: &mut EditorState) {
    match state.selection {
        Selection::None => return,
        Selection::Module(module) => {
            state.graph.remove_module(module);
        }
        Selection::Link(link) => {
            if state.graph.remove_link(link).is_some() {
                log::info!("Link {} gelöscht", link);
            }
        }
    }
    state.selection = Selection::None;

    let next = surviving_state(state);
    state.enter(next);
}

/// Gleicht den Link-Zustand nach einer Löschung mit dem Graphen ab.
fn surviving_state(state: &mut EditorState) -> LinkingState {
    let graph = &mut state.graph;
    match state.linking.clone() {
        LinkingState::LinkingParameters { link } if graph.link(link).is_none() => {
            LinkingState::NotLinking
        }
        LinkingState::LinkingModules {
            origin,
            side,
            links,
        } => {
            let remaining: Vec<_> = links
                .into_iter()
                .filter(|l| graph.link(*l).is_some())
                .collect();
            let next = LinkingState::LinkingModules {
                origin,
                side,
                links: remaining,
            };
            if graph.module(origin).is_none() || next.open_links().is_empty() {
                transitions::abort_linking(graph, &next)
            } else {
                next
            }
        }
        LinkingState::EditingLinkPoint { link, .. } if graph.link(link).is_none() => {
            LinkingState::NotLinking
        }
        other => other,
    }
}

/// Verschiebt ein Modul und routet seine Links neu.
pub fn move_module(state: &mut EditorState, module: ModuleId, delta: Vec2) {
    if state.graph.move_module(module, delta) {
        layout::reroute_module_links(&mut state.graph, module, state.options.curve_sample_steps);
    }
}

/// Übernimmt die vom Host gemeldete Widget-Größe.
pub fn resize_module(state: &mut EditorState, module: ModuleId, size: Vec2) {
    if state.graph.set_module_size(module, size) {
        layout::reroute_module_links(&mut state.graph, module, state.options.curve_sample_steps);
    }
}

/// Semantic-Zoom: Parameter-Sichtbarkeit setzen.
pub fn set_params_visible(state: &mut EditorState, module: ModuleId, visible: bool) {
    if state.graph.set_params_visible(module, visible) {
        layout::reroute_module_links(&mut state.graph, module, state.options.curve_sample_steps);
        log::debug!("Modul {}: Parameter sichtbar = {}", module, visible);
    }
}
