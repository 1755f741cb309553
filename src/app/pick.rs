//! Pick-Rollen: was liegt unter dem Zeiger?

use crate::core::{ChainGraph, HandleIndex, LinkId, ModuleId, ParamId};
use crate::shared::EditorOptions;
use glam::Vec2;

/// Rolle des obersten Elements unter dem Zeiger.
///
/// Die Zustandsmaschine dispatcht ausschließlich über diese Variante.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickRole {
    /// Leere Zeichenfläche
    Canvas,
    Module(ModuleId),
    Parameter(ParamId),
    /// Körper eines geschlossenen Links
    Link(LinkId),
    /// Innerer Kontrollpunkt eines geschlossenen Links
    LinkHandle { link: LinkId, point: usize },
}

impl PickRole {
    /// Modul, dem das Element gehört (Parameter → Besitzer).
    pub fn owning_module(&self, graph: &ChainGraph) -> Option<ModuleId> {
        match *self {
            PickRole::Module(id) => Some(id),
            PickRole::Parameter(param) => graph.module_of(param),
            _ => None,
        }
    }
}

/// Bestimmt die Pick-Rolle an `pos`.
///
/// Priorität: Link-Handle, Parameter, Modul, Link-Körper, Canvas.
pub fn pick(graph: &ChainGraph, options: &EditorOptions, pos: Vec2) -> PickRole {
    let handles = HandleIndex::from_graph(graph);
    if let Some(hit) = handles.pick(pos, options.handle_pick_radius) {
        return PickRole::LinkHandle {
            link: hit.link,
            point: hit.point,
        };
    }
    if let Some(param) = graph.parameter_at(pos, options.parameter_pick_radius) {
        return PickRole::Parameter(param);
    }
    if let Some(module) = graph.module_at(pos) {
        return PickRole::Module(module);
    }
    if let Some(link) = graph.link_at(pos, options.link_hit_tolerance) {
        return PickRole::Link(link);
    }
    PickRole::Canvas
}
