//! Link-Routing: Endpunkte an Parameter-Anker binden und Kurven abtasten.

use super::layering::LayerAssignment;
use super::placer::Placement;
use crate::core::{ChainGraph, LinkError, LinkId, ModuleId};
use crate::shared::geometry::sample_curve;
use crate::shared::EditorOptions;
use glam::Vec2;

/// Aktualisiert Anker und Kurve eines Links.
///
/// Fehlt ein Endpunkt-Parameter (Modul mitten im Drag entfernt), wird der Link
/// entfernt und `DanglingReference` zurückgegeben.
pub fn reroute_link(graph: &mut ChainGraph, link: LinkId, steps: usize) -> Result<(), LinkError> {
    if let Err(e) = graph.refresh_link_anchors(link) {
        if matches!(e, LinkError::DanglingReference(_)) {
            graph.remove_link(link);
            log::debug!("Link {} verworfen: {}", link, e);
        }
        return Err(e);
    }
    let curve = graph
        .link(link)
        .map(|l| sample_curve(&l.control_points(), steps))
        .ok_or(LinkError::UnknownLink(link))?;
    graph.set_link_curve(link, curve);
    Ok(())
}

/// Routet alle Links neu, die an Parametern des Moduls hängen (nach Drag).
pub fn reroute_module_links(graph: &mut ChainGraph, module: ModuleId, steps: usize) {
    let Some(m) = graph.module(module) else {
        return;
    };
    let params: Vec<_> = m.inputs().iter().chain(m.outputs()).copied().collect();
    let links: Vec<LinkId> = graph
        .links_iter()
        .filter(|l| params.iter().any(|p| l.touches(*p)))
        .map(|l| l.id)
        .collect();
    for link in links {
        // DanglingReference wird intern behandelt
        let _ = reroute_link(graph, link, steps);
    }
}

/// Routet sämtliche Links neu, ohne die Zwischenpunkte anzutasten.
pub fn reroute_all(graph: &mut ChainGraph, steps: usize) {
    let links: Vec<LinkId> = graph.links_iter().map(|l| l.id).collect();
    for link in links {
        let _ = reroute_link(graph, link, steps);
    }
}

/// Routing-Punkte eines langen Links: je überquertem Layer
/// `(midpoint_x, slot_y + route_vertical_offset)` in Zeichenreihenfolge.
pub fn layout_route_points(
    assignment: &LayerAssignment,
    placement: &Placement,
    link: LinkId,
    vertical_offset: f32,
) -> Vec<Vec2> {
    assignment
        .route_placeholders(link)
        .iter()
        .filter_map(|id| {
            let placeholder = assignment.placeholder(*id)?;
            let layer = assignment.layer(placeholder.rank)?;
            let slot = placement.placeholder_position(*id)?;
            Some(Vec2::new(layer.midpoint_x, slot.y + vertical_offset))
        })
        .collect()
}

/// Ersetzt nach einem Auto-Layout die Zwischenpunkte aller geschlossenen Links.
///
/// Links zwischen benachbarten Layern werden gerade Strecken.
pub fn apply_layout_routes(
    graph: &mut ChainGraph,
    assignment: &LayerAssignment,
    placement: &Placement,
    options: &EditorOptions,
) {
    let links: Vec<LinkId> = graph.closed_links().map(|l| l.id).collect();
    for link in links {
        let interior =
            layout_route_points(assignment, placement, link, options.route_vertical_offset);
        graph.set_interior_points(link, &interior);
        let _ = reroute_link(graph, link, options.curve_sample_steps);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ModuleSpec;

    fn two_modules() -> (ChainGraph, ModuleId, ModuleId, LinkId) {
        let mut graph = ChainGraph::new();
        let a = graph.add_module(ModuleSpec::new("A").output("o", Some("T")));
        let b = graph.add_module(ModuleSpec::new("B").input("i", Some("T")));
        graph.set_module_position(b, Vec2::new(300.0, 0.0));
        let out = graph.module(a).unwrap().outputs()[0];
        let inp = graph.module(b).unwrap().inputs()[0];
        let link = graph.add_link(out, inp).unwrap();
        (graph, a, b, link)
    }

    #[test]
    fn test_adjacent_link_is_straight_segment() {
        let (mut graph, _, _, link) = two_modules();
        reroute_link(&mut graph, link, 100).unwrap();
        assert_eq!(graph.link(link).unwrap().curve().len(), 2);
    }

    #[test]
    fn test_module_move_updates_anchor_and_curve() {
        let (mut graph, a, _, link) = two_modules();
        graph.move_module(a, Vec2::new(0.0, 100.0));
        reroute_module_links(&mut graph, a, 100);

        let l = graph.link(link).unwrap();
        let anchor = graph.param_anchor(l.start).unwrap();
        assert_eq!(l.points()[0], anchor);
        assert_eq!(l.curve()[0], anchor);
    }

    #[test]
    fn test_dangling_link_is_removed() {
        let (mut graph, _, b, link) = two_modules();
        graph.forget_module(b);

        assert_eq!(
            reroute_link(&mut graph, link, 100),
            Err(LinkError::DanglingReference(link))
        );
        assert!(graph.link(link).is_none());
    }

    #[test]
    fn test_interior_point_produces_quadratic_curve() {
        let (mut graph, _, _, link) = two_modules();
        graph.set_interior_points(link, &[Vec2::new(200.0, 200.0)]);
        reroute_link(&mut graph, link, 100).unwrap();
        let l = graph.link(link).unwrap();
        assert_eq!(l.curve().len(), 101);
        assert_eq!(l.curve()[0], l.points()[0]);
        assert_eq!(l.curve()[100], l.points()[2]);
    }
}
