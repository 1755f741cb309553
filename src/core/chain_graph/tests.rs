use super::*;
use crate::core::ModuleSpec;

fn source_filter_sink() -> (ChainGraph, ModuleId, ModuleId, ModuleId) {
    let mut graph = ChainGraph::new();
    let source = graph.add_module(ModuleSpec::new("Source").output("out", Some("Image")));
    let filter = graph.add_module(
        ModuleSpec::new("Filter")
            .input("in", Some("Image"))
            .output("out", Some("Image")),
    );
    let sink = graph.add_module(ModuleSpec::new("Sink").input("in", Some("Image")));
    (graph, source, filter, sink)
}

fn first_output(graph: &ChainGraph, module: ModuleId) -> ParamId {
    graph.module(module).expect("Modul erwartet").outputs()[0]
}

fn first_input(graph: &ChainGraph, module: ModuleId) -> ParamId {
    graph.module(module).expect("Modul erwartet").inputs()[0]
}

#[test]
fn test_add_module_creates_params_in_display_order() {
    let mut graph = ChainGraph::new();
    let id = graph.add_module(
        ModuleSpec::new("Mixed")
            .output("mask", Some("Mask"))
            .output("raw", None)
            .output("image", Some("Image")),
    );
    let module = graph.module(id).expect("Modul erwartet");
    let types: Vec<Option<&str>> = module
        .outputs()
        .iter()
        .map(|p| graph.parameter(*p).unwrap().semantic_type.as_deref())
        .collect();
    // None < "Image" < "Mask"
    assert_eq!(types, vec![None, Some("Image"), Some("Mask")]);
    assert_eq!(module.size.y, 24.0 + 3.0 * 18.0);
}

#[test]
fn test_add_link_registers_mutual_linkage() {
    let (mut graph, source, filter, _) = source_filter_sink();
    let out = first_output(&graph, source);
    let inp = first_input(&graph, filter);

    let link = graph.add_link(out, inp).expect("Link erwartet");

    assert!(graph.link(link).unwrap().is_closed());
    assert_eq!(graph.parameter(out).unwrap().link_count(), 1);
    assert_eq!(graph.incoming_link(inp), Some(link));
    assert_eq!(graph.link_flow(link), Some((out, inp)));
}

#[test]
fn test_add_link_rejects_bound_input() {
    let (mut graph, source, filter, _) = source_filter_sink();
    let out = first_output(&graph, source);
    let inp = first_input(&graph, filter);
    graph.add_link(out, inp).expect("erster Link erwartet");

    assert_eq!(graph.add_link(out, inp), Err(LinkError::InputAlreadyBound(inp)));
    assert_eq!(graph.link_count(), 1);
}

#[test]
fn test_add_link_rejects_differing_types_but_accepts_untyped() {
    let mut graph = ChainGraph::new();
    let a = graph.add_module(ModuleSpec::new("A").output("img", Some("Image")));
    let b = graph.add_module(
        ModuleSpec::new("B")
            .input("mask", Some("Mask"))
            .input("any", None),
    );
    let out = first_output(&graph, a);
    let module_b = graph.module(b).unwrap();
    let (untyped, mask) = (module_b.inputs()[0], module_b.inputs()[1]);

    assert!(matches!(
        graph.add_link(out, mask),
        Err(LinkError::IncompatibleTypes { .. })
    ));
    assert!(graph.add_link(out, untyped).is_ok());
}

#[test]
fn test_add_link_rejects_self_loop() {
    let (mut graph, _, filter, _) = source_filter_sink();
    let out = first_output(&graph, filter);
    let inp = first_input(&graph, filter);
    assert_eq!(graph.add_link(out, inp), Err(LinkError::SameModule(out, inp)));
}

#[test]
fn test_remove_module_cascades_links_and_backrefs() {
    let (mut graph, source, filter, sink) = source_filter_sink();
    let l1 = graph
        .add_link(first_output(&graph, source), first_input(&graph, filter))
        .unwrap();
    let l2 = graph
        .add_link(first_output(&graph, filter), first_input(&graph, sink))
        .unwrap();

    let removed = graph.remove_module(filter);
    assert!(removed.is_some());
    assert!(graph.link(l1).is_none());
    assert!(graph.link(l2).is_none());
    assert_eq!(graph.parameter(first_output(&graph, source)).unwrap().link_count(), 0);
    assert!(!graph.is_input_bound(first_input(&graph, sink)));
    assert_eq!(graph.module_count(), 2);
}

#[test]
fn test_remove_module_also_drops_open_links() {
    let (mut graph, source, _, _) = source_filter_sink();
    let link = graph.begin_link(first_output(&graph, source)).unwrap();
    graph.remove_module(source);
    assert!(graph.link(link).is_none());
    assert_eq!(graph.link_count(), 0);
}

#[test]
fn test_compatibility_is_symmetric() {
    let (graph, source, filter, sink) = source_filter_sink();
    let params: Vec<ParamId> = [source, filter, sink]
        .iter()
        .flat_map(|m| {
            let module = graph.module(*m).unwrap();
            module
                .inputs()
                .iter()
                .chain(module.outputs())
                .copied()
                .collect::<Vec<_>>()
        })
        .collect();

    for &a in &params {
        for &b in &params {
            assert_eq!(graph.compatible(a, b), graph.compatible(b, a));
            if graph.module_of(a) == graph.module_of(b) {
                assert!(!graph.compatible(a, b));
            }
        }
    }
}

#[test]
fn test_interactive_compatibility_requires_equal_types() {
    let mut graph = ChainGraph::new();
    let a = graph.add_module(ModuleSpec::new("A").output("img", Some("Image")));
    let b = graph.add_module(ModuleSpec::new("B").input("any", None));
    let out = first_output(&graph, a);
    let inp = first_input(&graph, b);
    assert!(matches!(
        graph.check_compatible(out, inp),
        Err(LinkError::IncompatibleTypes { .. })
    ));
}

#[test]
fn test_begin_and_finish_link_from_input_side() {
    let (mut graph, source, filter, _) = source_filter_sink();
    let inp = first_input(&graph, filter);
    let out = first_output(&graph, source);

    let link = graph.begin_link(inp).unwrap();
    assert!(graph.set_free_end(link, Vec2::new(3.0, 3.0)));
    assert!(graph.insert_link_point(link, Vec2::new(5.0, 5.0)));
    graph.finish_link(link, out).expect("Abschluss erwartet");

    let l = graph.link(link).unwrap();
    assert_eq!(l.point_count(), 3);
    assert_eq!(l.free_end(), None);
    // Zeichenrichtung Input → Output, Datenfluss trotzdem Output → Input
    assert_eq!(graph.link_flow(link), Some((out, inp)));
    assert!(graph.is_input_bound(inp));
    assert!(!graph.can_be_link_origin(inp));
}

#[test]
fn test_finish_link_failure_keeps_link_open() {
    let mut graph = ChainGraph::new();
    let a = graph.add_module(ModuleSpec::new("A").output("img", Some("Image")));
    let b = graph.add_module(ModuleSpec::new("B").input("mask", Some("Mask")));
    let link = graph.begin_link(first_output(&graph, a)).unwrap();

    let result = graph.finish_link(link, first_input(&graph, b));
    assert!(matches!(result, Err(LinkError::IncompatibleTypes { .. })));
    assert!(graph.link(link).unwrap().is_open());
    assert_eq!(graph.parameter(first_output(&graph, a)).unwrap().link_count(), 0);
}

#[test]
fn test_can_be_link_origin_respects_visibility() {
    let (mut graph, _, filter, _) = source_filter_sink();
    let inp = first_input(&graph, filter);
    let out = first_output(&graph, filter);
    assert!(graph.can_be_link_origin(inp));
    graph.set_params_visible(filter, false);
    assert!(!graph.can_be_link_origin(inp));
    assert!(graph.can_be_link_origin(out));
    assert!(!graph.is_linkable(filter));
}

#[test]
fn test_param_anchor_follows_module_position() {
    let (mut graph, source, _, _) = source_filter_sink();
    let out = first_output(&graph, source);
    graph.set_module_position(source, Vec2::new(100.0, 50.0));
    let anchor = graph.param_anchor(out).unwrap();
    assert_eq!(anchor.x, 100.0 + 140.0);
    assert_eq!(anchor.y, 50.0 + 24.0 + 9.0);

    graph.set_params_visible(source, false);
    let collapsed = graph.param_anchor(out).unwrap();
    assert_eq!(collapsed.y, 50.0 + (24.0 + 18.0) * 0.5);
}

#[test]
fn test_move_link_point_only_interior() {
    let (mut graph, source, filter, _) = source_filter_sink();
    let link = graph
        .add_link(first_output(&graph, source), first_input(&graph, filter))
        .unwrap();
    assert!(graph.set_interior_points(link, &[Vec2::new(1.0, 1.0), Vec2::new(2.0, 2.0)]));

    assert!(!graph.move_link_point(link, 0, Vec2::new(9.0, 9.0)));
    assert!(!graph.move_link_point(link, 3, Vec2::new(9.0, 9.0)));
    assert!(graph.move_link_point(link, 2, Vec2::new(9.0, 9.0)));
    assert_eq!(graph.link(link).unwrap().points()[2], Vec2::new(9.0, 9.0));
}

#[test]
fn test_refresh_link_anchors_reports_dangling_reference() {
    let (mut graph, source, filter, _) = source_filter_sink();
    let link = graph
        .add_link(first_output(&graph, source), first_input(&graph, filter))
        .unwrap();
    // Parameter direkt entfernen, ohne Kaskade (simuliert entferntes Modul mitten im Drag)
    graph.forget_module(filter);
    assert_eq!(
        graph.refresh_link_anchors(link),
        Err(LinkError::DanglingReference(link))
    );
}

#[test]
fn test_picking_module_and_parameter() {
    let (mut graph, source, filter, sink) = source_filter_sink();
    graph.set_module_position(filter, Vec2::new(300.0, 0.0));
    graph.set_module_position(sink, Vec2::new(0.0, 200.0));
    let out = first_output(&graph, source);
    let anchor = graph.param_anchor(out).unwrap();

    assert_eq!(graph.module_at(Vec2::new(10.0, 10.0)), Some(source));
    assert_eq!(graph.module_at(Vec2::new(310.0, 10.0)), Some(filter));
    assert_eq!(graph.module_at(Vec2::new(250.0, 10.0)), None);
    assert_eq!(graph.parameter_at(anchor + Vec2::new(2.0, 0.0), 6.0), Some(out));
    assert_eq!(graph.parameter_at(anchor + Vec2::new(20.0, 0.0), 6.0), None);
}
