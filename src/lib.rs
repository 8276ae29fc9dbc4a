#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod detail;
pub mod error;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;
pub mod registry;
pub mod render;
pub mod search;
pub mod style;
pub mod theme;
pub mod view;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, RootPolicy};
pub use error::{StructureError, TraceError};
pub use ir::Span;
pub use layout::{TraceLayout, compute_layout, layout_or_error};
pub use parser::parse_trace;
pub use render::render_svg;
pub use theme::Theme;
pub use view::TraceView;

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub theme: Theme,
    pub layout: LayoutConfig,
    /// Client width of the hosting container.
    pub width: f32,
}

impl RenderOptions {
    pub fn classic() -> Self {
        Self {
            theme: Theme::classic(),
            layout: LayoutConfig::default(),
            width: 1200.0,
        }
    }

    pub fn modern() -> Self {
        Self {
            theme: Theme::modern(),
            ..Self::classic()
        }
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::classic()
    }
}

/// Parses a trace document and renders it as an SVG waterfall.
///
/// Malformed JSON is an error. A well-formed trace whose spans do not form a
/// parents-first forest renders as an empty diagram carrying the diagnostic.
pub fn render_trace(input: &str, options: &RenderOptions) -> Result<String, TraceError> {
    let spans = parse_trace(input)?;
    let layout = layout_or_error(&spans, &options.theme, &options.layout, options.width);
    Ok(render_svg(&layout, &options.theme, &options.layout))
}
