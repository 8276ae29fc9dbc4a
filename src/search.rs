use std::time::{Duration, Instant};

/// Hands out increasing sequence numbers for search requests and only lets the
/// response to the most recent one through.
#[derive(Debug, Clone, Default)]
pub struct RequestSequence {
    latest: u64,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new request and returns its sequence number.
    pub fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn latest(&self) -> u64 {
        self.latest
    }

    pub fn is_current(&self, seq: u64) -> bool {
        seq != 0 && seq == self.latest
    }

    /// Returns `response` if it answers the latest request, `None` if a newer
    /// request has been issued since.
    pub fn accept<T>(&self, seq: u64, response: T) -> Option<T> {
        if self.is_current(seq) {
            Some(response)
        } else {
            tracing::debug!(seq, latest = self.latest, "dropping stale search response");
            None
        }
    }
}

/// Search-as-you-type debounce driven by caller-supplied instants.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<(Instant, String)>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Records a keystroke; restarts the quiet period.
    pub fn input(&mut self, query: impl Into<String>, now: Instant) {
        self.pending = Some((now, query.into()));
    }

    /// Returns the query to send once the input has been quiet for the delay.
    pub fn ready(&mut self, now: Instant) -> Option<String> {
        let (at, _) = self.pending.as_ref()?;
        if now.duration_since(*at) < self.delay {
            return None;
        }
        self.pending.take().map(|(_, query)| query)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
