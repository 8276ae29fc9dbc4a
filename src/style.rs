use crate::theme::Theme;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Bar,
    HitArea,
    Label,
    Connector,
    AxisLine,
    AxisTick,
    LegendChip,
    LegendLabel,
    Diagnostic,
}

/// Data an element is styled from.
#[derive(Debug, Clone, Copy)]
pub struct StyleContext<'a> {
    pub theme: &'a Theme,
    pub color: Option<&'a str>,
    pub is_error: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleAttributes {
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: Option<f32>,
    pub opacity: Option<f32>,
    pub font_size: Option<f32>,
    pub font_family: Option<String>,
}

impl StyleAttributes {
    /// Serialises the set attributes as SVG presentation attributes.
    pub fn to_svg_attrs(&self) -> String {
        let mut out = String::new();
        if let Some(fill) = &self.fill {
            out.push_str(&format!(" fill=\"{}\"", fill));
        }
        if let Some(stroke) = &self.stroke {
            out.push_str(&format!(" stroke=\"{}\"", stroke));
        }
        if let Some(width) = self.stroke_width {
            out.push_str(&format!(" stroke-width=\"{}\"", width));
        }
        if let Some(opacity) = self.opacity {
            out.push_str(&format!(" opacity=\"{}\"", opacity));
        }
        if let Some(size) = self.font_size {
            out.push_str(&format!(" font-size=\"{}\"", size));
        }
        if let Some(family) = &self.font_family {
            out.push_str(&format!(" font-family=\"{}\"", family.replace('"', "&quot;")));
        }
        out
    }
}

pub type StyleResolver = fn(&StyleContext) -> StyleAttributes;

/// Element kind → style function, evaluated once per element at render time.
#[derive(Debug, Clone)]
pub struct StyleResolvers {
    resolvers: HashMap<ElementKind, StyleResolver>,
}

impl Default for StyleResolvers {
    fn default() -> Self {
        let mut resolvers: HashMap<ElementKind, StyleResolver> = HashMap::new();
        resolvers.insert(ElementKind::Bar, bar_style);
        resolvers.insert(ElementKind::HitArea, hit_area_style);
        resolvers.insert(ElementKind::Label, label_style);
        resolvers.insert(ElementKind::Connector, connector_style);
        resolvers.insert(ElementKind::AxisLine, axis_line_style);
        resolvers.insert(ElementKind::AxisTick, axis_tick_style);
        resolvers.insert(ElementKind::LegendChip, legend_chip_style);
        resolvers.insert(ElementKind::LegendLabel, legend_label_style);
        resolvers.insert(ElementKind::Diagnostic, diagnostic_style);
        Self { resolvers }
    }
}

impl StyleResolvers {
    pub fn with(mut self, kind: ElementKind, resolver: StyleResolver) -> Self {
        self.resolvers.insert(kind, resolver);
        self
    }

    /// Resolves the style of one element; kinds without a resolver get no attributes.
    pub fn resolve(&self, kind: ElementKind, ctx: &StyleContext) -> StyleAttributes {
        self.resolvers
            .get(&kind)
            .map(|resolver| resolver(ctx))
            .unwrap_or_default()
    }
}

fn bar_style(ctx: &StyleContext) -> StyleAttributes {
    StyleAttributes {
        fill: ctx.color.map(str::to_string),
        stroke: ctx.is_error.then(|| ctx.theme.error_border_color.clone()),
        stroke_width: ctx.is_error.then_some(1.5),
        ..Default::default()
    }
}

fn hit_area_style(_ctx: &StyleContext) -> StyleAttributes {
    StyleAttributes {
        fill: Some("#000000".to_string()),
        opacity: Some(0.0),
        ..Default::default()
    }
}

fn label_style(ctx: &StyleContext) -> StyleAttributes {
    StyleAttributes {
        fill: Some(ctx.theme.text_color.clone()),
        font_size: Some(ctx.theme.font_size),
        font_family: Some(ctx.theme.font_family.clone()),
        ..Default::default()
    }
}

fn connector_style(ctx: &StyleContext) -> StyleAttributes {
    StyleAttributes {
        fill: Some("none".to_string()),
        stroke: Some(ctx.theme.line_color.clone()),
        stroke_width: Some(1.0),
        ..Default::default()
    }
}

fn axis_line_style(ctx: &StyleContext) -> StyleAttributes {
    StyleAttributes {
        fill: Some("none".to_string()),
        stroke: Some(ctx.theme.axis_color.clone()),
        stroke_width: Some(1.0),
        ..Default::default()
    }
}

fn axis_tick_style(ctx: &StyleContext) -> StyleAttributes {
    StyleAttributes {
        fill: Some(ctx.theme.axis_color.clone()),
        font_size: Some((ctx.theme.font_size - 2.0).max(8.0)),
        font_family: Some(ctx.theme.font_family.clone()),
        ..Default::default()
    }
}

fn legend_chip_style(ctx: &StyleContext) -> StyleAttributes {
    StyleAttributes {
        fill: ctx.color.map(str::to_string),
        ..Default::default()
    }
}

fn legend_label_style(ctx: &StyleContext) -> StyleAttributes {
    StyleAttributes {
        fill: Some(ctx.theme.legend_text_color.clone()),
        font_size: Some(ctx.theme.font_size),
        font_family: Some(ctx.theme.font_family.clone()),
        ..Default::default()
    }
}

fn diagnostic_style(ctx: &StyleContext) -> StyleAttributes {
    StyleAttributes {
        fill: Some(ctx.theme.error_border_color.clone()),
        font_size: Some(ctx.theme.font_size),
        font_family: Some(ctx.theme.font_family.clone()),
        ..Default::default()
    }
}
