use crate::config::LayoutConfig;
use crate::detail::SpanDetail;
use crate::ir::Span;
use crate::layout::{TraceLayout, layout_or_error};
use crate::render::render_svg;
use crate::theme::Theme;

/// State of one trace waterfall on screen: the spans, the container width and
/// the geometry of the last layout pass.
///
/// Every change of spans or width reruns the whole pass and replaces the
/// previous layout; nothing from an older pass is kept.
#[derive(Debug, Clone)]
pub struct TraceView {
    spans: Vec<Span>,
    container_width: f32,
    theme: Theme,
    config: LayoutConfig,
    layout: TraceLayout,
    selected: Option<String>,
}

impl TraceView {
    pub fn new(spans: Vec<Span>, container_width: f32, theme: Theme, config: LayoutConfig) -> Self {
        let layout = layout_or_error(&spans, &theme, &config, container_width);
        Self {
            spans,
            container_width,
            theme,
            config,
            layout,
            selected: None,
        }
    }

    pub fn layout(&self) -> &TraceLayout {
        &self.layout
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn container_width(&self) -> f32 {
        self.container_width
    }

    /// Relays out for a new container width. Widths that leave no room for the
    /// chart are ignored; returns whether a new layout was produced.
    pub fn resize(&mut self, container_width: f32) -> bool {
        if self.config.chart_width(container_width) <= 0.0 {
            tracing::debug!(container_width, "ignoring resize to an unusable width");
            return false;
        }
        self.container_width = container_width;
        self.relayout();
        true
    }

    /// Switches to another trace.
    pub fn select_trace(&mut self, spans: Vec<Span>) {
        self.spans = spans;
        self.selected = None;
        self.relayout();
    }

    /// Marks a span as selected and returns its detail panel.
    pub fn select_span(&mut self, span_id: &str) -> Option<SpanDetail> {
        let span = self.spans.iter().find(|span| span.id == span_id)?;
        self.selected = Some(span.id.clone());
        Some(SpanDetail::from_span(span))
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn render_svg(&self) -> String {
        render_svg(&self.layout, &self.theme, &self.config)
    }

    fn relayout(&mut self) {
        self.layout = layout_or_error(&self.spans, &self.theme, &self.config, self.container_width);
    }
}
