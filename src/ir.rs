use serde::{Deserialize, Serialize};

/// Timestamp on the shared trace axis, in milliseconds since the epoch.
pub type TimeMs = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpanKind {
    Entry,
    Exit,
    #[default]
    Local,
}

impl SpanKind {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "entry" => Some(Self::Entry),
            "exit" => Some(Self::Exit),
            "local" => Some(Self::Local),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Entry => "Entry",
            Self::Exit => "Exit",
            Self::Local => "Local",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanTag {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanLog {
    pub time: TimeMs,
    pub data: Vec<SpanTag>,
}

/// Reference from a segment's first span to a span in another segment or trace.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpanRef {
    pub trace_id: Option<String>,
    pub parent_segment_id: Option<String>,
    pub parent_span_id: Option<String>,
    pub kind: Option<String>,
}

/// One timed operation of a trace, with its parent already resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub id: String,
    pub parent_id: Option<String>,
    pub start_time: TimeMs,
    pub end_time: TimeMs,
    pub label: String,
    pub actor: String,
    pub kind: SpanKind,
    pub component: Option<String>,
    pub peer: Option<String>,
    pub layer: Option<String>,
    pub is_error: bool,
    pub tags: Vec<SpanTag>,
    pub logs: Vec<SpanLog>,
    pub refs: Vec<SpanRef>,
}

impl Span {
    pub fn new(
        id: impl Into<String>,
        parent_id: Option<&str>,
        start_time: TimeMs,
        end_time: TimeMs,
        label: impl Into<String>,
        actor: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            parent_id: parent_id.map(str::to_string),
            start_time,
            end_time,
            label: label.into(),
            actor: actor.into(),
            kind: SpanKind::default(),
            component: None,
            peer: None,
            layer: None,
            is_error: false,
            tags: Vec::new(),
            logs: Vec::new(),
            refs: Vec::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}
