use crate::config::LayoutConfig;
#[cfg(feature = "png")]
use crate::config::RenderConfig;
use crate::layout::{Connector, TraceLayout};
use crate::style::{ElementKind, StyleContext, StyleResolvers};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

pub fn render_svg(layout: &TraceLayout, theme: &Theme, config: &LayoutConfig) -> String {
    render_svg_with_styles(layout, theme, config, &StyleResolvers::default())
}

pub fn render_svg_with_styles(
    layout: &TraceLayout,
    theme: &Theme,
    config: &LayoutConfig,
    styles: &StyleResolvers,
) -> String {
    let mut svg = String::new();
    let width = layout.width;
    let height = layout.height;
    let plain = StyleContext {
        theme,
        color: None,
        is_error: false,
    };

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));

    if let Some(error) = &layout.error {
        svg.push_str(&format!(
            "<text class=\"diagnostic\" x=\"{:.2}\" y=\"{:.2}\"{}>{}</text>",
            error.text_x,
            error.text_y,
            styles.resolve(ElementKind::Diagnostic, &plain).to_svg_attrs(),
            escape_xml(&error.message)
        ));
        svg.push_str("</svg>");
        return svg;
    }

    svg.push_str("<defs>");
    svg.push_str(&format!(
        "<marker id=\"arrow\" markerUnits=\"strokeWidth\" markerWidth=\"12\" markerHeight=\"12\" viewBox=\"0 0 12 12\" refX=\"6\" refY=\"6\" orient=\"auto\"><path d=\"M2,2 L10,6 L2,10 L6,6 L2,2\" fill=\"{}\"/></marker>",
        theme.line_color
    ));
    svg.push_str("</defs>");

    svg.push_str("<g class=\"legend\">");
    for chip in &layout.legend {
        let ctx = StyleContext {
            theme,
            color: Some(chip.color.as_str()),
            is_error: false,
        };
        svg.push_str(&format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"4\" ry=\"4\"{}/>",
            chip.x,
            chip.y,
            chip.width,
            chip.height,
            styles.resolve(ElementKind::LegendChip, &ctx).to_svg_attrs()
        ));
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" dominant-baseline=\"central\"{}>{}</text>",
            chip.x + chip.width / 2.0,
            chip.y + chip.height / 2.0,
            styles.resolve(ElementKind::LegendLabel, &ctx).to_svg_attrs(),
            escape_xml(&chip.actor)
        ));
    }
    svg.push_str("</g>");

    if let Some(axis) = &layout.axis {
        svg.push_str(&format!(
            "<g class=\"axis\" transform=\"translate({:.2},{:.2})\">",
            layout.chart_x, layout.chart_y
        ));
        let tick_len = (config.axis_height * 0.3).round();
        let line_attrs = styles.resolve(ElementKind::AxisLine, &plain).to_svg_attrs();
        svg.push_str(&format!(
            "<path d=\"M 0 -{tick_len} V 0 H {:.2} V -{tick_len}\"{}/>",
            axis.width, line_attrs
        ));
        let tick_attrs = styles.resolve(ElementKind::AxisTick, &plain).to_svg_attrs();
        for tick in &layout.ticks {
            svg.push_str(&format!(
                "<line x1=\"{x:.2}\" y1=\"-{tick_len}\" x2=\"{x:.2}\" y2=\"0\"{line_attrs}/>",
                x = tick.x
            ));
            svg.push_str(&format!(
                "<text x=\"{:.2}\" y=\"-{}\" text-anchor=\"middle\"{}>{}</text>",
                tick.x,
                tick_len + 3.0,
                tick_attrs,
                escape_xml(&tick.label)
            ));
        }
        svg.push_str("</g>");
    }

    svg.push_str(&format!(
        "<g class=\"rows\" transform=\"translate({:.2},{:.2})\">",
        layout.chart_x, layout.chart_y
    ));
    let hit_width = layout.axis.map(|axis| axis.width).unwrap_or(0.0);
    for row in &layout.rows {
        let ctx = StyleContext {
            theme,
            color: Some(row.color.as_str()),
            is_error: row.node.is_error,
        };
        let span_id = escape_xml(&row.node.id);
        svg.push_str(&format!("<g data-span-id=\"{span_id}\">"));
        svg.push_str(&format!(
            "<rect class=\"bar\" x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\"{}/>",
            row.bar_x,
            row.row_y,
            row.bar_width,
            row.bar_height,
            styles.resolve(ElementKind::Bar, &ctx).to_svg_attrs()
        ));
        svg.push_str(&format!(
            "<rect class=\"hit\" x=\"0\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\"{}><title>{}</title></rect>",
            row.row_y,
            hit_width,
            row.bar_height,
            styles.resolve(ElementKind::HitArea, &ctx).to_svg_attrs(),
            escape_xml(&row.node.label)
        ));
        if !row.label.text.is_empty() {
            svg.push_str(&format!(
                "<text x=\"{:.2}\" y=\"{:.2}\"{}>{}</text>",
                row.label.x,
                row.label.y,
                styles.resolve(ElementKind::Label, &ctx).to_svg_attrs(),
                escape_xml(&row.label.text)
            ));
        }
        svg.push_str("</g>");
    }

    let connector_attrs = styles.resolve(ElementKind::Connector, &plain).to_svg_attrs();
    for connector in &layout.connectors {
        svg.push_str(&format!(
            "<path class=\"connector\" d=\"{}\"{} marker-end=\"url(#arrow)\"/>",
            connector_path(connector),
            connector_attrs
        ));
    }
    svg.push_str("</g>");

    svg.push_str("</svg>");
    svg
}

fn connector_path(connector: &Connector) -> String {
    points_to_path(&connector.points())
}

fn points_to_path(points: &[(f32, f32)]) -> String {
    if points.is_empty() {
        return String::new();
    }
    let mut d = String::new();
    d.push_str(&format!("M {:.2} {:.2}", points[0].0, points[0].1));
    for point in points.iter().skip(1) {
        d.push_str(&format!(" L {:.2} {:.2}", point.0, point.1));
    }
    d
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.width / 2.0)
        .ok_or_else(|| anyhow::anyhow!("Invalid render width {}", render_cfg.width))?;

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;
    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
