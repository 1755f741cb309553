use analysis_chain_editor::layout::{assign_layers, place, LayerEntry};
use analysis_chain_editor::{
    auto_layout, ChainEditor, ChainGraph, EditorIntent, EditorOptions, LayoutError, LinkId,
    ModuleId, ModuleSpec,
};
use approx::assert_relative_eq;
use glam::Vec2;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

struct Chain {
    graph: ChainGraph,
    source: ModuleId,
    filter: ModuleId,
    sink: ModuleId,
    bypass: Option<LinkId>,
}

fn link(graph: &mut ChainGraph, from: ModuleId, to: ModuleId, input: usize) -> LinkId {
    let out = graph.module(from).unwrap().outputs()[0];
    let inp = graph.module(to).unwrap().inputs()[input];
    graph.add_link(out, inp).expect("Link sollte gültig sein")
}

/// Source → Filter → Sink, optional zusätzlich Source → Sink.
fn chain(with_bypass: bool) -> Chain {
    init_logger();
    let mut graph = ChainGraph::new();
    let source = graph.add_module(ModuleSpec::new("Source").output("out", Some("Image")));
    let filter = graph.add_module(
        ModuleSpec::new("Filter")
            .input("in", Some("Image"))
            .output("out", Some("Image")),
    );
    let sink = graph.add_module(
        ModuleSpec::new("Sink")
            .input("a", Some("Image"))
            .input("b", Some("Image")),
    );
    link(&mut graph, source, filter, 0);
    link(&mut graph, filter, sink, 0);
    let bypass = with_bypass.then(|| link(&mut graph, source, sink, 1));
    Chain {
        graph,
        source,
        filter,
        sink,
        bypass,
    }
}

#[test]
fn test_scenario_a_ranks_without_placeholders() {
    let mut c = chain(false);
    let result = auto_layout(&mut c.graph, &EditorOptions::default()).unwrap();
    let assignment = &result.assignment;

    assert_eq!(assignment.rank(c.sink), Some(0));
    assert_eq!(assignment.rank(c.filter), Some(1));
    assert_eq!(assignment.rank(c.source), Some(2));
    assert!(assignment.placeholders.is_empty());
    for l in c.graph.closed_links() {
        assert_eq!(l.point_count(), 2);
    }
}

#[test]
fn test_scenario_b_long_link_gets_one_route_point() {
    let mut c = chain(true);
    let options = EditorOptions::default();
    let result = auto_layout(&mut c.graph, &options).unwrap();
    let assignment = &result.assignment;

    assert_eq!(assignment.rank(c.source), Some(2));
    assert_eq!(assignment.rank(c.filter), Some(1));
    assert_eq!(assignment.rank(c.sink), Some(0));
    assert_eq!(assignment.placeholders.len(), 1);

    let bypass = c.bypass.unwrap();
    let ids = assignment.route_placeholders(bypass);
    assert_eq!(ids.len(), 1);
    let layer = assignment.layer(1).unwrap();
    assert!(layer.entries.contains(&LayerEntry::Placeholder(ids[0])));

    let slot = result.placement.placeholder_position(ids[0]).unwrap();
    let point = c.graph.link(bypass).unwrap().points()[1];
    assert_relative_eq!(point.x, layer.midpoint_x);
    assert_relative_eq!(point.y, slot.y + options.route_vertical_offset);

    // Spalten: Source | Filter | Sink, Breite 140, Abstand 80
    assert_relative_eq!(layer.midpoint_x, 330.0);
    assert_relative_eq!(point.y, 72.0);
}

#[test]
fn test_layout_places_sources_left_of_sinks() {
    let mut c = chain(true);
    auto_layout(&mut c.graph, &EditorOptions::default()).unwrap();

    let x = |id| c.graph.module(id).unwrap().position.x;
    assert!(x(c.source) < x(c.filter));
    assert!(x(c.filter) < x(c.sink));
}

#[test]
fn test_rank_invariant_holds_for_every_link() {
    let mut c = chain(true);
    let extra = c.graph.add_module(
        ModuleSpec::new("Viewer")
            .input("in", Some("Image"))
            .output("out", Some("Image")),
    );
    link(&mut c.graph, c.filter, extra, 0);

    let assignment = assign_layers(&c.graph).unwrap();
    for edge in c.graph.module_edges() {
        let source = assignment.rank(edge.source).unwrap();
        let sink = assignment.rank(edge.sink).unwrap();
        assert!(source > sink);
    }
    for id in c.graph.module_ids() {
        let downstream = c
            .graph
            .module_edges()
            .into_iter()
            .filter(|e| e.source == id)
            .filter_map(|e| assignment.rank(e.sink))
            .max();
        let expected = downstream.map_or(0, |r| r + 1);
        assert_eq!(assignment.rank(id), Some(expected));
    }
}

#[test]
fn test_relayout_is_idempotent() {
    let mut c = chain(true);
    let options = EditorOptions::default();

    let first = auto_layout(&mut c.graph, &options).unwrap();
    let positions: Vec<Vec2> = c
        .graph
        .modules_iter()
        .map(|m| m.position)
        .collect();
    let second = auto_layout(&mut c.graph, &options).unwrap();

    assert_eq!(first.assignment, second.assignment);
    assert_eq!(first.placement, second.placement);
    let again: Vec<Vec2> = c.graph.modules_iter().map(|m| m.position).collect();
    assert_eq!(positions, again);
}

#[test]
fn test_place_without_apply_leaves_graph_untouched() {
    let c = chain(false);
    let before: Vec<Vec2> = c.graph.modules_iter().map(|m| m.position).collect();
    let mut assignment = assign_layers(&c.graph).unwrap();
    let placement = place(&c.graph, &mut assignment, &EditorOptions::default());

    assert_eq!(placement.module_positions.len(), 3);
    let after: Vec<Vec2> = c.graph.modules_iter().map(|m| m.position).collect();
    assert_eq!(before, after);
}

fn cyclic_graph() -> (ChainGraph, ModuleId) {
    let mut graph = ChainGraph::new();
    let a = graph.add_module(
        ModuleSpec::new("A")
            .input("in", Some("T"))
            .output("out", Some("T")),
    );
    let b = graph.add_module(
        ModuleSpec::new("B")
            .input("in", Some("T"))
            .output("out", Some("T")),
    );
    graph.set_module_position(b, Vec2::new(500.0, 300.0));
    link(&mut graph, a, b, 0);
    link(&mut graph, b, a, 0);
    (graph, b)
}

#[test]
fn test_cycle_is_rejected_without_moving_modules() {
    init_logger();
    let (mut graph, b) = cyclic_graph();

    let result = auto_layout(&mut graph, &EditorOptions::default());
    assert!(matches!(result, Err(LayoutError::CyclicGraph { .. })));
    assert_eq!(graph.module(b).unwrap().position, Vec2::new(500.0, 300.0));
}

#[test]
fn test_layout_request_on_cycle_reports_error() {
    init_logger();
    let (graph, b) = cyclic_graph();
    let mut editor = ChainEditor::new(EditorOptions::default());
    *editor.graph_mut() = graph;

    assert!(editor.auto_layout().is_err());
    assert!(editor
        .handle_intent(EditorIntent::AutoLayoutRequested)
        .is_err());
    assert_eq!(
        editor.graph().module(b).unwrap().position,
        Vec2::new(500.0, 300.0)
    );
    assert!(editor.state().layout.is_none());
}
