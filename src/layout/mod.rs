mod axis;
mod error;
mod nodes;
mod routing;
mod rows;
mod text;
pub(crate) mod types;
mod validate;
pub use axis::compute_axis;
pub use nodes::build_nodes;
pub use routing::route_connector;
pub use rows::layout_rows;
pub use types::*;
pub use validate::validate_trace;
use error::*;
use text::*;

use crate::config::{LayoutConfig, RootPolicy};
use crate::error::{StructureError, TraceError};
use crate::ir::{Span, TimeMs};
use crate::theme::Theme;
use std::collections::HashMap;

/// Runs a full layout pass over `spans` for a container `container_width` wide.
///
/// Spans must be listed parents-first; anything else is reported as
/// [`TraceError::InvalidTraceStructure`] before any geometry is produced.
pub fn compute_layout(
    spans: &[Span],
    theme: &Theme,
    config: &LayoutConfig,
    container_width: f32,
) -> Result<TraceLayout, TraceError> {
    validate_trace(spans, config.root_policy)?;

    let chart_width = config.chart_width(container_width).max(0.0);
    let (nodes, colors) = build_nodes(spans, &theme.palette);
    let axis = compute_axis(&nodes, chart_width);
    let (rows, positions) = layout_rows(&nodes, &axis, theme, config);

    let mut connectors = Vec::new();
    for node in nodes.iter().skip(1) {
        let Some(parent_id) = node.parent_id.as_deref() else {
            continue;
        };
        let (Some(&parent), Some(&child)) = (positions.get(parent_id), positions.get(&node.id))
        else {
            continue;
        };
        let (route, segments) = route_connector(parent, child, config);
        connectors.push(Connector {
            parent_id: parent_id.to_string(),
            child_id: node.id.clone(),
            route,
            segments,
        });
    }

    let legend = layout_legend(&colors, container_width, theme, config);
    let legend_height = legend
        .iter()
        .map(|chip| chip.y + chip.height)
        .fold(0.0_f32, f32::max);
    let chart_y = legend_height + config.legend_gap + config.axis_height;
    let ticks = axis.ticks(config.axis_ticks);
    let height = chart_y + rows.len() as f32 * config.row_height;

    tracing::debug!(
        spans = spans.len(),
        connectors = connectors.len(),
        actors = colors.len(),
        axis_max = axis.axis_max,
        chart_width,
        "trace layout computed"
    );

    Ok(TraceLayout {
        rows,
        connectors,
        axis: Some(axis),
        ticks,
        legend,
        chart_x: config.container_padding / 2.0,
        chart_y,
        width: container_width.max(1.0),
        height,
        error: None,
    })
}

/// Like [`compute_layout`], but turns a failure into an empty diagram that
/// shows the diagnostic instead of partial geometry.
pub fn layout_or_error(
    spans: &[Span],
    theme: &Theme,
    config: &LayoutConfig,
    container_width: f32,
) -> TraceLayout {
    match compute_layout(spans, theme, config, container_width) {
        Ok(layout) => layout,
        Err(err) => {
            tracing::warn!(error = %err, "trace not laid out");
            compute_error_layout(err.to_string(), theme, config, container_width)
        }
    }
}

/// Actor chips in first-seen order, wrapping onto a new line when the
/// container is full.
fn layout_legend(
    colors: &ColorAssignment,
    container_width: f32,
    theme: &Theme,
    config: &LayoutConfig,
) -> Vec<LegendEntry> {
    let chip_height = theme.font_size + config.legend_chip_padding * 2.0;
    let line_height = chip_height.max(config.legend_height);
    let start_x = config.container_padding / 2.0;
    let max_x = (container_width - start_x).max(start_x);
    let mut x = start_x;
    let mut y = 0.0_f32;
    let mut legend = Vec::with_capacity(colors.len());

    for (actor, color) in colors.entries() {
        let width = text_width(actor, theme, config) + config.legend_chip_padding * 2.0;
        if x > start_x && x + width > max_x {
            x = start_x;
            y += line_height;
        }
        legend.push(LegendEntry {
            actor: actor.to_string(),
            color: color.to_string(),
            x,
            y,
            width,
            height: chip_height,
        });
        x += width + config.legend_gap;
    }
    legend
}
