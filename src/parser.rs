use crate::error::TraceError;
use crate::ir::{Span, SpanKind, SpanLog, SpanRef, SpanTag, TimeMs};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;

/// Scalar JSON value that the query service may send either as a number or as text.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl Scalar {
    fn as_text(&self) -> String {
        match self {
            Scalar::Int(val) => val.to_string(),
            Scalar::Float(val) => format!("{}", val),
            Scalar::Bool(val) => val.to_string(),
            Scalar::Text(val) => val.clone(),
        }
    }

    fn as_millis(&self) -> Option<TimeMs> {
        match self {
            Scalar::Int(val) => Some(*val),
            Scalar::Float(val) => Some(val.round() as TimeMs),
            Scalar::Bool(_) => None,
            Scalar::Text(val) => val.trim().parse::<TimeMs>().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTag {
    key: String,
    value: Option<Scalar>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLog {
    time: Option<Scalar>,
    #[serde(default)]
    data: Vec<RawTag>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRef {
    trace_id: Option<Scalar>,
    parent_segment_id: Option<Scalar>,
    parent_span_id: Option<Scalar>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSpan {
    id: Option<Scalar>,
    parent_id: Option<Scalar>,
    span_id: Option<Scalar>,
    segment_id: Option<Scalar>,
    parent_span_id: Option<Scalar>,
    start_time: Option<Scalar>,
    end_time: Option<Scalar>,
    operation_name: Option<String>,
    label: Option<String>,
    application_code: Option<String>,
    service_code: Option<String>,
    actor_id: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    component: Option<String>,
    peer: Option<String>,
    layer: Option<String>,
    is_error: Option<bool>,
    #[serde(default)]
    tags: Vec<RawTag>,
    #[serde(default)]
    logs: Vec<RawLog>,
    #[serde(default)]
    refs: Vec<RawRef>,
}

impl RawSpan {
    fn own_id(&self) -> Option<String> {
        if let Some(id) = &self.id {
            return Some(id.as_text());
        }
        let span_id = self.span_id.as_ref()?;
        Some(segment_span_id(self.segment_id.as_ref(), span_id))
    }
}

fn segment_span_id(segment: Option<&Scalar>, span: &Scalar) -> String {
    match segment {
        Some(segment) => format!("{},{}", segment.as_text(), span.as_text()),
        None => span.as_text(),
    }
}

/// Parses a trace document into spans in row order with parents resolved.
///
/// Accepts the query service response (`{"data":{"queryTrace":{"spans":[..]}}}`),
/// a `{"spans":[..]}` object, or a bare span array.
pub fn parse_trace(input: &str) -> Result<Vec<Span>, TraceError> {
    let document: Value = serde_json::from_str(input)?;
    let spans = locate_spans(document).ok_or(TraceError::NoSpanList)?;
    let raw: Vec<RawSpan> = serde_json::from_value(spans)?;
    resolve_spans(raw)
}

fn locate_spans(document: Value) -> Option<Value> {
    match document {
        Value::Array(_) => Some(document),
        Value::Object(mut map) => {
            if let Some(spans) = map.remove("spans") {
                return Some(spans);
            }
            if let Some(query) = map.remove("queryTrace") {
                return locate_spans(query);
            }
            map.remove("data").and_then(locate_spans)
        }
        _ => None,
    }
}

fn resolve_spans(raw: Vec<RawSpan>) -> Result<Vec<Span>, TraceError> {
    let mut ids = Vec::with_capacity(raw.len());
    for (index, span) in raw.iter().enumerate() {
        let id = span.own_id().ok_or(TraceError::MissingField {
            index,
            field: "spanId",
        })?;
        ids.push(id);
    }
    let known: HashSet<&str> = ids.iter().map(String::as_str).collect();

    let mut spans = Vec::with_capacity(raw.len());
    for (index, (span, id)) in raw.iter().zip(ids.iter()).enumerate() {
        let parent_id = find_parent(span, &known);
        let start_time = span
            .start_time
            .as_ref()
            .and_then(Scalar::as_millis)
            .ok_or(TraceError::MissingField {
                index,
                field: "startTime",
            })?;
        let end_time = span
            .end_time
            .as_ref()
            .and_then(Scalar::as_millis)
            .ok_or(TraceError::MissingField {
                index,
                field: "endTime",
            })?;
        let label = span
            .operation_name
            .clone()
            .or_else(|| span.label.clone())
            .unwrap_or_default();
        let actor = span
            .application_code
            .clone()
            .or_else(|| span.service_code.clone())
            .or_else(|| span.actor_id.clone())
            .unwrap_or_default();

        spans.push(Span {
            id: id.clone(),
            parent_id,
            start_time,
            end_time,
            label,
            actor,
            kind: span
                .kind
                .as_deref()
                .and_then(SpanKind::from_token)
                .unwrap_or_default(),
            component: span.component.clone(),
            peer: span.peer.clone(),
            layer: span.layer.clone(),
            is_error: span.is_error.unwrap_or(false),
            tags: span.tags.iter().map(convert_tag).collect(),
            logs: span
                .logs
                .iter()
                .map(|log| SpanLog {
                    time: log.time.as_ref().and_then(Scalar::as_millis).unwrap_or(0),
                    data: log.data.iter().map(convert_tag).collect(),
                })
                .collect(),
            refs: span
                .refs
                .iter()
                .map(|r| SpanRef {
                    trace_id: r.trace_id.as_ref().map(Scalar::as_text),
                    parent_segment_id: r.parent_segment_id.as_ref().map(Scalar::as_text),
                    parent_span_id: r.parent_span_id.as_ref().map(Scalar::as_text),
                    kind: r.kind.clone(),
                })
                .collect(),
        });
    }
    Ok(spans)
}

fn convert_tag(tag: &RawTag) -> SpanTag {
    SpanTag {
        key: tag.key.clone(),
        value: tag.value.as_ref().map(Scalar::as_text).unwrap_or_default(),
    }
}

/// Cross-segment refs win over the in-segment parent; either must name a span
/// of this trace. An explicit `parentId` is kept verbatim so validation can
/// report it when it dangles.
fn find_parent(span: &RawSpan, known: &HashSet<&str>) -> Option<String> {
    for r in &span.refs {
        if let Some(parent_span) = r.parent_span_id.as_ref() {
            let candidate = segment_span_id(r.parent_segment_id.as_ref(), parent_span);
            if known.contains(candidate.as_str()) {
                return Some(candidate);
            }
        }
    }
    if let Some(parent) = &span.parent_id {
        return Some(parent.as_text());
    }
    let parent_span = span.parent_span_id.as_ref()?;
    let candidate = segment_span_id(span.segment_id.as_ref(), parent_span);
    known.contains(candidate.as_str()).then_some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_query_service_response() {
        let input = r#"{"data":{"queryTrace":{"spans":[
            {"spanId":1,"segmentId":"s1","parentSpanId":-1,"startTime":1000,"endTime":1500,
             "operationName":"/users","applicationCode":"gateway","type":"Entry","isError":false,
             "tags":[{"key":"http.method","value":"GET"}]},
            {"spanId":2,"segmentId":"s1","parentSpanId":1,"startTime":"1100","endTime":"1200",
             "operationName":"SELECT","applicationCode":"gateway","type":"Exit","component":"MySQL"}
        ]}}}"#;
        let spans = parse_trace(input).unwrap();
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].id, "s1,1");
        assert_eq!(spans[0].parent_id, None);
        assert_eq!(spans[0].kind, SpanKind::Entry);
        assert_eq!(spans[0].tags[0].value, "GET");
        assert_eq!(spans[1].parent_id.as_deref(), Some("s1,1"));
        assert_eq!(spans[1].start_time, 1100);
        assert_eq!(spans[1].component.as_deref(), Some("MySQL"));
    }

    #[test]
    fn refs_link_across_segments() {
        let input = r#"[
            {"spanId":5,"segmentId":1,"startTime":0,"endTime":10,"operationName":"produce","applicationCode":"zz"},
            {"spanId":0,"segmentId":2,"startTime":12,"endTime":30,"operationName":"consume","applicationCode":"kk",
             "refs":[{"parentSegmentId":1,"parentSpanId":5,"type":"CROSS_PROCESS"}]}
        ]"#;
        let spans = parse_trace(input).unwrap();
        assert_eq!(spans[1].parent_id.as_deref(), Some("1,5"));
        assert_eq!(spans[1].refs[0].kind.as_deref(), Some("CROSS_PROCESS"));
    }

    #[test]
    fn refs_to_other_traces_leave_a_root() {
        let input = r#"{"spans":[
            {"spanId":6,"segmentId":1,"startTime":0,"endTime":10,"operationName":"consume",
             "refs":[{"traceId":121212,"type":"CROSS_THREAD"}]}
        ]}"#;
        let spans = parse_trace(input).unwrap();
        assert!(spans[0].is_root());
        assert_eq!(spans[0].refs[0].trace_id.as_deref(), Some("121212"));
    }

    #[test]
    fn normalised_form_keeps_explicit_parent() {
        let input = r#"[
            {"id":"a","startTime":0,"endTime":5,"label":"root","actorId":"A"},
            {"id":"b","parentId":"missing","startTime":1,"endTime":2,"label":"child","actorId":"B"}
        ]"#;
        let spans = parse_trace(input).unwrap();
        assert_eq!(spans[0].actor, "A");
        assert_eq!(spans[1].parent_id.as_deref(), Some("missing"));
    }

    #[test]
    fn missing_start_time_is_reported() {
        let input = r#"[{"spanId":1,"endTime":5}]"#;
        let err = parse_trace(input).unwrap_err();
        assert!(matches!(
            err,
            TraceError::MissingField {
                index: 0,
                field: "startTime"
            }
        ));
    }

    #[test]
    fn document_without_spans_is_rejected() {
        let err = parse_trace(r#"{"data":{"other":1}}"#).unwrap_err();
        assert!(matches!(err, TraceError::NoSpanList));
    }
}
