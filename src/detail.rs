use crate::ir::{Span, SpanRef, TimeMs};
use chrono::{DateTime, Utc};
use serde::Serialize;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";
const LOG_TAB_FORMAT: &str = "%M:%S%.3f";

pub fn format_timestamp(time: TimeMs) -> String {
    format_with(time, TIME_FORMAT)
}

fn format_with(time: TimeMs, pattern: &str) -> String {
    match DateTime::<Utc>::from_timestamp_millis(time) {
        Some(date_time) => date_time.format(pattern).to_string(),
        None => time.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailItem {
    pub title: String,
    pub content: String,
}

impl DetailItem {
    fn new(title: &str, content: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogTab {
    pub label: String,
    pub time: TimeMs,
    pub items: Vec<DetailItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelatedTrace {
    pub kind: String,
    pub trace_id: String,
}

/// Everything the span detail panel shows for one span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpanDetail {
    pub span_id: String,
    pub items: Vec<DetailItem>,
    pub logs: Vec<LogTab>,
    /// Only present for segment roots, which are the spans that carry refs.
    pub related_traces: Option<Vec<RelatedTrace>>,
}

impl SpanDetail {
    pub fn from_span(span: &Span) -> Self {
        let mut items = vec![
            DetailItem::new("operation name", span.label.clone()),
            DetailItem::new(
                "duration",
                format!(
                    "{} - {}",
                    format_timestamp(span.start_time),
                    format_timestamp(span.end_time)
                ),
            ),
            DetailItem::new("span type", span.kind.as_str()),
            DetailItem::new("component", span.component.clone().unwrap_or_default()),
            DetailItem::new("peer", span.peer.clone().unwrap_or_default()),
            DetailItem::new("is error", span.is_error.to_string()),
        ];
        if let Some(layer) = &span.layer {
            items.push(DetailItem::new("layer", layer.clone()));
        }
        items.extend(
            span.tags
                .iter()
                .map(|tag| DetailItem::new(&tag.key, tag.value.clone())),
        );

        let logs = span
            .logs
            .iter()
            .map(|log| LogTab {
                label: format_with(log.time, LOG_TAB_FORMAT),
                time: log.time,
                items: log
                    .data
                    .iter()
                    .map(|entry| DetailItem::new(&entry.key, entry.value.clone()))
                    .collect(),
            })
            .collect();

        let related_traces = span
            .is_root()
            .then(|| span.refs.iter().map(related_trace).collect());

        Self {
            span_id: span.id.clone(),
            items,
            logs,
            related_traces,
        }
    }
}

fn related_trace(r: &SpanRef) -> RelatedTrace {
    RelatedTrace {
        kind: r.kind.clone().unwrap_or_default(),
        trace_id: r.trace_id.clone().unwrap_or_default(),
    }
}

pub fn find_detail(spans: &[Span], span_id: &str) -> Option<SpanDetail> {
    spans
        .iter()
        .find(|span| span.id == span_id)
        .map(SpanDetail::from_span)
}
