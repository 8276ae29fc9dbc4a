use super::*;

/// Derives one node per span, in input order.
///
/// Colors are handed out per distinct actor in first-seen order, cycling through
/// `palette`. Offsets are relative to the earliest start time of the trace, so
/// the earliest node sits at offset 0.
pub fn build_nodes(spans: &[Span], palette: &[String]) -> (Vec<Node>, ColorAssignment) {
    let mut colors = ColorAssignment::default();
    let mut nodes: Vec<Node> = spans
        .iter()
        .enumerate()
        .map(|(index, span)| Node {
            id: span.id.clone(),
            parent_id: span.parent_id.clone(),
            index,
            start_time: span.start_time,
            end_time: span.end_time,
            duration: span.end_time.saturating_sub(span.start_time),
            start_offset: 0,
            label: span.label.clone(),
            actor: span.actor.clone(),
            color: colors.assign(&span.actor, palette),
            is_error: span.is_error,
        })
        .collect();

    let Some(min_start) = nodes.iter().map(|n| n.start_time).min() else {
        return (nodes, colors);
    };
    for node in &mut nodes {
        node.start_offset = node.start_time.saturating_sub(min_start);
    }
    (nodes, colors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("c{i}")).collect()
    }

    #[test]
    fn offsets_are_relative_to_earliest_start() {
        let spans = vec![
            Span::new("2", Some("1"), 130, 150, "late first", "A"),
            Span::new("1", None, 100, 200, "root", "A"),
            Span::new("3", Some("1"), 105, 110, "early", "B"),
        ];
        let (nodes, _) = build_nodes(&spans, &palette(3));
        assert_eq!(nodes[0].start_offset, 30);
        assert_eq!(nodes[1].start_offset, 0);
        assert_eq!(nodes[2].start_offset, 5);
        assert!(nodes.iter().all(|n| n.start_offset >= 0));
        assert_eq!(nodes[1].duration, 100);
    }

    #[test]
    fn colors_follow_first_seen_actor_and_wrap() {
        let spans = vec![
            Span::new("1", None, 0, 10, "a", "gateway"),
            Span::new("2", Some("1"), 1, 2, "b", "orders"),
            Span::new("3", Some("1"), 2, 3, "c", "gateway"),
            Span::new("4", Some("1"), 3, 4, "d", "billing"),
        ];
        let (nodes, colors) = build_nodes(&spans, &palette(2));
        assert_eq!(nodes[0].color, "c0");
        assert_eq!(nodes[1].color, "c1");
        assert_eq!(nodes[2].color, "c0");
        assert_eq!(nodes[3].color, "c0");
        assert_eq!(colors.slot_of("billing"), Some(2));
        assert_eq!(colors.color_of("orders"), Some("c1"));
        let order: Vec<&str> = colors.entries().map(|(actor, _)| actor).collect();
        assert_eq!(order, vec!["gateway", "orders", "billing"]);
    }

    #[test]
    fn indices_follow_input_order() {
        let spans = vec![
            Span::new("x", None, 0, 10, "", "A"),
            Span::new("y", Some("x"), 1, 2, "", "A"),
        ];
        let (nodes, _) = build_nodes(&spans, &palette(1));
        assert_eq!(nodes[0].index, 0);
        assert_eq!(nodes[1].index, 1);
        assert_eq!(nodes[1].id, "y");
    }

    #[test]
    fn unvalidated_extreme_times_saturate() {
        let spans = vec![
            Span::new("1", None, TimeMs::MIN, TimeMs::MAX, "", "A"),
            Span::new("2", Some("1"), TimeMs::MAX, TimeMs::MAX, "", "A"),
        ];
        let (nodes, _) = build_nodes(&spans, &palette(1));
        assert_eq!(nodes[0].duration, TimeMs::MAX);
        assert_eq!(nodes[1].start_offset, TimeMs::MAX);
    }

    #[test]
    fn empty_input_yields_no_nodes() {
        let (nodes, colors) = build_nodes(&[], &palette(4));
        assert!(nodes.is_empty());
        assert!(colors.is_empty());
    }
}
