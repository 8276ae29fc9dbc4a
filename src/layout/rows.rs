use super::*;

/// Places one row per node, in node order, and records each bar's anchor.
///
/// Bar start and end are mapped onto the axis independently so widths never
/// drift from the positions of neighbouring bars.
pub fn layout_rows(
    nodes: &[Node],
    axis: &AxisConfig,
    theme: &Theme,
    config: &LayoutConfig,
) -> (Vec<Row>, HashMap<String, Position>) {
    let mut rows = Vec::with_capacity(nodes.len());
    let mut positions = HashMap::with_capacity(nodes.len());
    let bar_height = config.bar_height();

    for (index, node) in nodes.iter().enumerate() {
        let row_y = index as f32 * config.row_height;
        let bar_x = axis.to_pixel(node.start_offset);
        let bar_end = axis.to_pixel(node.start_offset.saturating_add(node.duration));
        let bar_width = (bar_end - bar_x).max(0.0);
        positions.insert(node.id.clone(), Position { x: bar_x, y: row_y });

        let label_x = bar_x + config.label_offset_x;
        let (text, clipped) = clip_label(&node.label, axis.width - label_x, theme, config);
        rows.push(Row {
            node: node.clone(),
            row_y,
            bar_x,
            bar_width,
            bar_height,
            color: node.color.clone(),
            label: RowLabel {
                text,
                x: label_x,
                y: row_y + config.row_height / 2.0,
                clipped,
            },
        });
    }
    (rows, positions)
}
