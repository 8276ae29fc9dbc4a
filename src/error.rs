use thiserror::Error;

/// Structural defects that make a span list unusable for layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    #[error("trace has no spans")]
    Empty,
    #[error("span id `{id}` appears more than once (rows {first} and {second})")]
    DuplicateId {
        id: String,
        first: usize,
        second: usize,
    },
    #[error("span `{id}` references unknown parent `{parent}`")]
    DanglingParent { id: String, parent: String },
    #[error("span `{id}` (row {child_row}) precedes its parent `{parent}` (row {parent_row})")]
    ParentAfterChild {
        id: String,
        parent: String,
        child_row: usize,
        parent_row: usize,
    },
    #[error("first span `{id}` is not a root")]
    MissingRoot { id: String },
    #[error("trace has {count} root spans, expected one")]
    MultipleRoots { count: usize },
    #[error("span `{id}` ends before it starts ({start} > {end})")]
    NegativeDuration { id: String, start: i64, end: i64 },
    #[error("span `{id}` lies too far from the trace start to measure ({start}..{end})")]
    TimeOutOfRange { id: String, start: i64, end: i64 },
}

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("invalid trace structure: {0}")]
    InvalidTraceStructure(#[from] StructureError),
    #[error("malformed trace JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("span #{index} is missing required field `{field}`")]
    MissingField { index: usize, field: &'static str },
    #[error("no span list found in trace document")]
    NoSpanList,
}
