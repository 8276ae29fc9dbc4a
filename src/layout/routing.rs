use super::*;

/// Routes the connector from a parent bar's anchor into a child bar.
///
/// The line leaves the parent's bottom-left corner and enters the child at the
/// middle of its left edge. When the child starts less than
/// `connector_threshold` pixels right of the parent, a straight drop would run
/// along the parent bar, so the line first steps left by `dogleg_offset_x`.
pub fn route_connector(
    parent: Position,
    child: Position,
    config: &LayoutConfig,
) -> (ConnectorRoute, Vec<Segment>) {
    let bar_height = config.bar_height();
    let (px, py) = (parent.x, parent.y + bar_height);
    let (cx, cy) = (child.x, child.y + bar_height / 2.0);

    if cx - px < config.connector_threshold {
        let elbow_x = px - config.dogleg_offset_x;
        let elbow_y = py - config.dogleg_offset_y;
        let segments = vec![
            Segment {
                from: (elbow_x, elbow_y),
                to: (px, elbow_y),
                arrow: false,
            },
            Segment {
                from: (elbow_x, elbow_y),
                to: (elbow_x, cy),
                arrow: false,
            },
            Segment {
                from: (elbow_x, cy),
                to: (cx, cy),
                arrow: true,
            },
        ];
        (ConnectorRoute::LeftOffset, segments)
    } else {
        let segments = vec![
            Segment {
                from: (px, py),
                to: (px, cy),
                arrow: false,
            },
            Segment {
                from: (px, cy),
                to: (cx, cy),
                arrow: true,
            },
        ];
        (ConnectorRoute::Direct, segments)
    }
}

impl Connector {
    /// The connector as one polyline, from the parent side to the arrowhead.
    pub fn points(&self) -> Vec<(f32, f32)> {
        match self.route {
            ConnectorRoute::Direct => {
                let mut points: Vec<(f32, f32)> = Vec::with_capacity(3);
                for segment in &self.segments {
                    if points.last() != Some(&segment.from) {
                        points.push(segment.from);
                    }
                    points.push(segment.to);
                }
                points
            }
            // The nudge runs from the elbow back towards the parent, so the
            // polyline starts at the parent anchor and walks to the elbow.
            ConnectorRoute::LeftOffset => {
                let nudge = self.segments[0];
                let mut points = vec![nudge.to, nudge.from];
                for segment in &self.segments[1..] {
                    points.push(segment.to);
                }
                points
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn far_child_uses_direct_dogleg() {
        let config = LayoutConfig::default();
        let parent = Position { x: 0.0, y: 0.0 };
        let child = Position { x: 875.0, y: 72.0 };
        let (route, segments) = route_connector(parent, child, &config);
        assert_eq!(route, ConnectorRoute::Direct);
        assert_eq!(
            segments,
            vec![
                Segment {
                    from: (0.0, 26.0),
                    to: (0.0, 85.0),
                    arrow: false
                },
                Segment {
                    from: (0.0, 85.0),
                    to: (875.0, 85.0),
                    arrow: true
                },
            ]
        );
    }

    #[test]
    fn near_child_steps_left_first() {
        let config = LayoutConfig::default();
        let parent = Position { x: 100.0, y: 36.0 };
        let child = Position { x: 105.0, y: 72.0 };
        let (route, segments) = route_connector(parent, child, &config);
        assert_eq!(route, ConnectorRoute::LeftOffset);
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].from, (85.0, 56.0));
        assert_eq!(segments[0].to, (100.0, 56.0));
        assert_eq!(segments[1].to, (85.0, 85.0));
        assert_eq!(segments[2].to, (105.0, 85.0));
        assert!(segments[2].arrow);
        assert!(!segments[0].arrow && !segments[1].arrow);
    }

    #[test]
    fn threshold_is_exclusive() {
        let config = LayoutConfig::default();
        let parent = Position { x: 0.0, y: 0.0 };
        let (route, _) = route_connector(parent, Position { x: 10.0, y: 36.0 }, &config);
        assert_eq!(route, ConnectorRoute::Direct);
        let (route, _) = route_connector(parent, Position { x: 9.5, y: 36.0 }, &config);
        assert_eq!(route, ConnectorRoute::LeftOffset);
    }

    #[test]
    fn anchors_stay_on_bars_when_margin_eats_the_row() {
        let config = LayoutConfig {
            row_height: 20.0,
            bar_margin: 24.0,
            ..LayoutConfig::default()
        };
        let parent = Position { x: 0.0, y: 0.0 };
        let child = Position { x: 300.0, y: 20.0 };
        let (route, segments) = route_connector(parent, child, &config);
        assert_eq!(route, ConnectorRoute::Direct);
        assert_eq!(segments[0].from, (0.0, 1.0));
        assert_eq!(segments[1].to, (300.0, 20.5));
    }

    #[test]
    fn routing_is_deterministic() {
        let config = LayoutConfig::default();
        let parent = Position { x: 12.5, y: 36.0 };
        let child = Position { x: 14.0, y: 108.0 };
        assert_eq!(
            route_connector(parent, child, &config),
            route_connector(parent, child, &config)
        );
    }

    #[test]
    fn polyline_walks_from_parent_to_child() {
        let config = LayoutConfig::default();
        let (route, segments) = route_connector(
            Position { x: 100.0, y: 36.0 },
            Position { x: 105.0, y: 72.0 },
            &config,
        );
        let connector = Connector {
            parent_id: "p".to_string(),
            child_id: "c".to_string(),
            route,
            segments,
        };
        assert_eq!(
            connector.points(),
            vec![(100.0, 56.0), (85.0, 56.0), (85.0, 85.0), (105.0, 85.0)]
        );
    }
}
