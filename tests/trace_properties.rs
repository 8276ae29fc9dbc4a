use approx::assert_relative_eq;
use trace_stack_renderer::layout::{
    ConnectorRoute, Position, build_nodes, compute_axis, layout_rows, route_connector,
};
use trace_stack_renderer::{LayoutConfig, Span, Theme, compute_layout};

fn example_trace() -> Vec<Span> {
    vec![
        Span::new("1", None, 100, 500, "root", "A"),
        Span::new("2", Some("1"), 120, 200, "child", "B"),
        Span::new("3", Some("1"), 450, 460, "tail", "A"),
    ]
}

/// Deterministic pseudo-random parents-first trace.
fn generated_trace(len: usize, seed: u64) -> Vec<Span> {
    let mut state = seed;
    let mut next = move || {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        state >> 33
    };
    let mut spans = Vec::with_capacity(len);
    for i in 0..len {
        let start = 1_000 + (next() % 5_000) as i64;
        let end = start + (next() % 2_000) as i64;
        let parent = if i == 0 {
            None
        } else {
            Some(format!("s{}", next() as usize % i))
        };
        spans.push(Span::new(
            format!("s{i}"),
            parent.as_deref(),
            start,
            end,
            format!("op-{i}"),
            format!("svc-{}", next() % 7),
        ));
    }
    spans
}

#[test]
fn end_to_end_example() {
    let layout =
        compute_layout(&example_trace(), &Theme::classic(), &LayoutConfig::default(), 1050.0)
            .unwrap();
    let ids: Vec<&str> = layout.rows.iter().map(|r| r.node.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);

    let offsets: Vec<(i64, i64)> = layout
        .rows
        .iter()
        .map(|r| (r.node.start_offset, r.node.duration))
        .collect();
    assert_eq!(offsets, vec![(0, 400), (20, 80), (350, 10)]);

    let tail = layout
        .connectors
        .iter()
        .find(|c| c.child_id == "3")
        .unwrap();
    assert_eq!(tail.route, ConnectorRoute::Direct);
    assert_eq!(tail.segments.len(), 2);
}

#[test]
fn offsets_are_anchored_at_earliest_start() {
    for seed in 1..20 {
        let spans = generated_trace(40, seed);
        let (nodes, _) = build_nodes(&spans, &Theme::classic().palette);
        let min = spans.iter().map(|s| s.start_time).min().unwrap();
        for (node, span) in nodes.iter().zip(&spans) {
            assert!(node.start_offset >= 0);
            if span.start_time == min {
                assert_eq!(node.start_offset, 0);
            }
        }
    }
}

#[test]
fn rows_preserve_input_order() {
    let spans = generated_trace(60, 7);
    let layout =
        compute_layout(&spans, &Theme::modern(), &LayoutConfig::default(), 1200.0).unwrap();
    for (i, (row, span)) in layout.rows.iter().zip(&spans).enumerate() {
        assert_eq!(row.node.index, i);
        assert_eq!(row.node.id, span.id);
    }
}

#[test]
fn axis_covers_extent() {
    for seed in 1..30 {
        let spans = generated_trace(25, seed);
        let (nodes, _) = build_nodes(&spans, &Theme::classic().palette);
        let axis = compute_axis(&nodes, 900.0);
        assert!(axis.axis_max >= axis.max_extent);
        let config = LayoutConfig::default();
        let (rows, _) = layout_rows(&nodes, &axis, &Theme::classic(), &config);
        for row in rows {
            assert!(row.bar_x + row.bar_width <= axis.width + 1e-3);
        }
    }
}

#[test]
fn bar_width_matches_mapped_endpoints() {
    let spans = generated_trace(30, 11);
    let (nodes, _) = build_nodes(&spans, &Theme::classic().palette);
    let axis = compute_axis(&nodes, 777.0);
    let (rows, _) = layout_rows(&nodes, &axis, &Theme::classic(), &LayoutConfig::default());
    for row in rows {
        let end = axis.to_pixel(row.node.start_offset + row.node.duration);
        assert_relative_eq!(row.bar_x + row.bar_width, end, epsilon = 1e-3);
    }
}

#[test]
fn connector_routing_is_pure() {
    let config = LayoutConfig::default();
    let parent = Position { x: 40.0, y: 36.0 };
    let child = Position { x: 47.0, y: 180.0 };
    let first = route_connector(parent, child, &config);
    for _ in 0..5 {
        assert_eq!(route_connector(parent, child, &config), first);
    }
}

#[test]
fn same_actor_same_color() {
    let palette: Vec<String> = (0..3).map(|i| format!("p{i}")).collect();
    let spans = vec![
        Span::new("1", None, 0, 10, "", "A"),
        Span::new("2", Some("1"), 1, 2, "", "B"),
        Span::new("3", Some("1"), 2, 3, "", "C"),
        Span::new("4", Some("1"), 3, 4, "", "D"),
        Span::new("5", Some("4"), 3, 4, "", "B"),
    ];
    let (nodes, colors) = build_nodes(&spans, &palette);
    let got: Vec<&str> = nodes.iter().map(|n| n.color.as_str()).collect();
    assert_eq!(got, vec!["p0", "p1", "p2", "p0", "p1"]);
    assert_eq!(colors.len(), 4);
}

#[test]
fn single_span_trace() {
    let spans = vec![Span::new("root", None, 5_000, 5_250, "only", "A")];
    let layout =
        compute_layout(&spans, &Theme::classic(), &LayoutConfig::default(), 800.0).unwrap();
    assert_eq!(layout.rows.len(), 1);
    assert!(layout.connectors.is_empty());
    assert_eq!(layout.axis.unwrap().max_extent, 250);
}

#[test]
fn generated_traces_connect_every_child() {
    let spans = generated_trace(80, 3);
    let layout =
        compute_layout(&spans, &Theme::classic(), &LayoutConfig::default(), 1400.0).unwrap();
    assert_eq!(layout.connectors.len(), spans.len() - 1);
}
