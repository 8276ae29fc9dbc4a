use crate::layout::{ConnectorRoute, TraceLayout};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub width: f32,
    pub height: f32,
    pub chart_x: f32,
    pub chart_y: f32,
    pub axis: Option<AxisDump>,
    pub rows: Vec<RowDump>,
    pub connectors: Vec<ConnectorDump>,
    pub legend: Vec<LegendDump>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AxisDump {
    pub max_extent: i64,
    pub digits: u32,
    pub rounded_scale: i64,
    pub axis_max: i64,
    pub width: f32,
    pub ticks: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RowDump {
    pub id: String,
    pub parent_id: Option<String>,
    pub index: usize,
    pub start_offset: i64,
    pub duration: i64,
    pub actor: String,
    pub color: String,
    pub is_error: bool,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct ConnectorDump {
    pub parent: String,
    pub child: String,
    pub route: &'static str,
    pub points: Vec<[f32; 2]>,
}

#[derive(Debug, Serialize)]
pub struct LegendDump {
    pub actor: String,
    pub color: String,
}

impl LayoutDump {
    pub fn from_layout(layout: &TraceLayout) -> Self {
        let axis = layout.axis.map(|axis| AxisDump {
            max_extent: axis.max_extent,
            digits: axis.digits,
            rounded_scale: axis.rounded_scale,
            axis_max: axis.axis_max,
            width: axis.width,
            ticks: layout.ticks.iter().map(|t| t.label.clone()).collect(),
        });

        let rows = layout
            .rows
            .iter()
            .map(|row| RowDump {
                id: row.node.id.clone(),
                parent_id: row.node.parent_id.clone(),
                index: row.node.index,
                start_offset: row.node.start_offset,
                duration: row.node.duration,
                actor: row.node.actor.clone(),
                color: row.color.clone(),
                is_error: row.node.is_error,
                x: row.bar_x,
                y: row.row_y,
                width: row.bar_width,
                height: row.bar_height,
                label: row.label.text.clone(),
            })
            .collect();

        let connectors = layout
            .connectors
            .iter()
            .map(|connector| ConnectorDump {
                parent: connector.parent_id.clone(),
                child: connector.child_id.clone(),
                route: match connector.route {
                    ConnectorRoute::Direct => "direct",
                    ConnectorRoute::LeftOffset => "left-offset",
                },
                points: connector.points().iter().map(|(x, y)| [*x, *y]).collect(),
            })
            .collect();

        let legend = layout
            .legend
            .iter()
            .map(|entry| LegendDump {
                actor: entry.actor.clone(),
                color: entry.color.clone(),
            })
            .collect();

        LayoutDump {
            width: layout.width,
            height: layout.height,
            chart_x: layout.chart_x,
            chart_y: layout.chart_y,
            axis,
            rows,
            connectors,
            legend,
            error: layout.error.as_ref().map(|e| e.message.clone()),
        }
    }
}

pub fn write_layout_dump(output: Option<&Path>, layout: &TraceLayout) -> anyhow::Result<()> {
    let dump = LayoutDump::from_layout(layout);
    match output {
        Some(path) => {
            let writer = BufWriter::new(File::create(path)?);
            serde_json::to_writer_pretty(writer, &dump)?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            serde_json::to_writer_pretty(&mut lock, &dump)?;
            writeln!(lock)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::ir::Span;
    use crate::layout::compute_layout;
    use crate::theme::Theme;

    #[test]
    fn dump_names_routes() {
        let spans = vec![
            Span::new("1", None, 100, 500, "root", "A"),
            Span::new("2", Some("1"), 120, 200, "child", "B"),
            Span::new("3", Some("1"), 450, 460, "tail", "A"),
        ];
        let layout =
            compute_layout(&spans, &Theme::classic(), &LayoutConfig::default(), 1050.0).unwrap();
        let value = serde_json::to_value(LayoutDump::from_layout(&layout)).unwrap();
        assert_eq!(value["axis"]["axis_max"], 400);
        assert_eq!(value["rows"][2]["start_offset"], 350);
        assert_eq!(value["connectors"][1]["route"], "direct");
        assert_eq!(value["legend"][1]["actor"], "B");
        assert!(value["error"].is_null());
    }
}
