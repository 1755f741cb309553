//! Layout-Engine: Layering, Platzierung und Link-Routing.

pub mod layering;
pub mod placer;
pub mod router;

pub use layering::{
    assign_layers, Layer, LayerAssignment, LayerEntry, Placeholder, PlaceholderId,
};
pub use placer::{place, Placement};
pub use router::{
    apply_layout_routes, layout_route_points, reroute_all, reroute_link, reroute_module_links,
};

use crate::core::{ChainGraph, LayoutError};
use crate::shared::EditorOptions;

/// Ergebnis eines vollständigen Auto-Layouts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutResult {
    pub assignment: LayerAssignment,
    pub placement: Placement,
}

/// Layering, Platzierung und Routing in einem Durchlauf.
///
/// Bei einem Zyklus bleibt der Graph unverändert.
pub fn auto_layout(
    graph: &mut ChainGraph,
    options: &EditorOptions,
) -> Result<LayoutResult, LayoutError> {
    let mut assignment = assign_layers(graph)?;
    let placement = place(graph, &mut assignment, options);
    placement.apply(graph);
    apply_layout_routes(graph, &assignment, &placement, options);

    log::info!(
        "Auto-Layout: {} Layer, {} Platzhalter, {:.0} x {:.0}",
        assignment.layers.len(),
        assignment.placeholders.len(),
        placement.width,
        placement.height
    );
    Ok(LayoutResult {
        assignment,
        placement,
    })
}
