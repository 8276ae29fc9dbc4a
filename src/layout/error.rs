use super::*;

/// Empty diagram that only carries a diagnostic message.
pub(super) fn compute_error_layout(
    message: String,
    theme: &Theme,
    config: &LayoutConfig,
    container_width: f32,
) -> TraceLayout {
    let width = container_width.max(1.0);
    let height = (config.row_height * 2.0).max(theme.font_size * 3.0);
    TraceLayout {
        rows: Vec::new(),
        connectors: Vec::new(),
        axis: None,
        ticks: Vec::new(),
        legend: Vec::new(),
        chart_x: 0.0,
        chart_y: 0.0,
        width,
        height,
        error: Some(ErrorLayout {
            message,
            text_x: config.container_padding / 2.0,
            text_y: height / 2.0 + theme.font_size / 2.0,
        }),
    }
}
