use std::collections::HashMap;

use crate::ir::TimeMs;

/// A span augmented with the values derived during one layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: String,
    pub parent_id: Option<String>,
    pub index: usize,
    pub start_time: TimeMs,
    pub end_time: TimeMs,
    pub duration: TimeMs,
    pub start_offset: TimeMs,
    pub label: String,
    pub actor: String,
    pub color: String,
    pub is_error: bool,
}

/// Actor → palette color, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorAssignment {
    entries: Vec<(String, String)>,
    by_actor: HashMap<String, usize>,
}

impl ColorAssignment {
    /// Returns the actor's color, assigning the next palette slot on first sight.
    pub(crate) fn assign(&mut self, actor: &str, palette: &[String]) -> String {
        if let Some(&idx) = self.by_actor.get(actor) {
            return self.entries[idx].1.clone();
        }
        let idx = self.entries.len();
        let color = if palette.is_empty() {
            String::new()
        } else {
            palette[idx % palette.len()].clone()
        };
        self.by_actor.insert(actor.to_string(), idx);
        self.entries.push((actor.to_string(), color.clone()));
        color
    }

    pub fn color_of(&self, actor: &str) -> Option<&str> {
        self.by_actor
            .get(actor)
            .map(|&idx| self.entries[idx].1.as_str())
    }

    /// Zero-based first-seen rank of the actor.
    pub fn slot_of(&self, actor: &str) -> Option<usize> {
        self.by_actor.get(actor).copied()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(a, c)| (a.as_str(), c.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    pub value: f64,
    pub x: f32,
    pub label: String,
}

/// Time axis shared by every bar of the diagram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisConfig {
    pub max_extent: TimeMs,
    pub digits: u32,
    pub rounded_scale: TimeMs,
    pub axis_max: TimeMs,
    pub width: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowLabel {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub clipped: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub node: Node,
    pub row_y: f32,
    pub bar_x: f32,
    pub bar_width: f32,
    pub bar_height: f32,
    pub color: String,
    pub label: RowLabel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectorRoute {
    /// Down from the parent anchor, then right to the child.
    Direct,
    /// Nudge left of the parent anchor first so the line clears the parent bar.
    LeftOffset,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: (f32, f32),
    pub to: (f32, f32),
    pub arrow: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    pub parent_id: String,
    pub child_id: String,
    pub route: ConnectorRoute,
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub actor: String,
    pub color: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ErrorLayout {
    pub message: String,
    pub text_x: f32,
    pub text_y: f32,
}

/// Geometry of one rendered trace. Rows and connectors use chart coordinates;
/// `chart_y` is where the chart area starts below the legend and the axis.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceLayout {
    pub rows: Vec<Row>,
    pub connectors: Vec<Connector>,
    pub axis: Option<AxisConfig>,
    pub ticks: Vec<AxisTick>,
    pub legend: Vec<LegendEntry>,
    pub chart_x: f32,
    pub chart_y: f32,
    pub width: f32,
    pub height: f32,
    pub error: Option<ErrorLayout>,
}

impl TraceLayout {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row_for(&self, span_id: &str) -> Option<&Row> {
        self.rows.iter().find(|row| row.node.id == span_id)
    }
}
