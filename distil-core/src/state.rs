use serde::{Deserialize, Serialize};

/// Maximum number of characters of fetched source text kept on a run.
/// Source text is untrusted and unbounded; everything past this cap is
/// dropped at commit time.
pub const MAX_CONTENT_CHARS: usize = 5000;

/// The mutable record threaded through one refinement run.
///
/// Owned exclusively by the loop while the run is in flight; consumers only
/// ever see cloned snapshots, so they can never mutate the working copy.
/// `summaries` and `evaluations` are append-only and index-aligned: entry
/// *i* of `evaluations` scores entry *i* of `summaries`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    /// The topic under research. Immutable for the life of the run.
    pub query: String,
    /// Most recently fetched source excerpt, truncated to
    /// [`MAX_CONTENT_CHARS`]. Overwritten each cycle.
    pub content: String,
    /// One entry per completed summarize step, oldest first.
    pub summaries: Vec<String>,
    /// One entry per completed evaluate step, oldest first. Stored verbatim.
    pub evaluations: Vec<String>,
    /// Result of the most recent pass check.
    pub passed_check: bool,
    /// Count of completed summarize steps. Never decreases within a run.
    pub iterations: u32,
}

impl RunState {
    /// Create the all-empty record for a fresh run.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            content: String::new(),
            summaries: Vec::new(),
            evaluations: Vec::new(),
            passed_check: false,
            iterations: 0,
        }
    }

    /// Commit one completed summarize step: store the (truncated) fetched
    /// text, append the trimmed summary, bump the iteration count. Called
    /// only after both collaborator calls succeeded, so a failed step never
    /// commits partial state.
    pub fn record_summary(&mut self, fetched: &str, summary: &str) {
        self.content = truncate_chars(fetched, MAX_CONTENT_CHARS);
        self.summaries.push(summary.trim().to_string());
        self.iterations += 1;
    }

    /// Commit one completed evaluate step. The evaluation text is stored
    /// verbatim; no numeric parsing happens here.
    pub fn record_evaluation(&mut self, evaluation: impl Into<String>) {
        self.evaluations.push(evaluation.into());
    }

    /// The most recent summary, or the empty string when none exists yet.
    pub fn latest_summary(&self) -> &str {
        self.summaries.last().map(String::as_str).unwrap_or("")
    }

    /// The most recent evaluation, or the empty string when none exists yet.
    pub fn latest_evaluation(&self) -> &str {
        self.evaluations.last().map(String::as_str).unwrap_or("")
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_empty() {
        let state = RunState::new("graph neural networks");
        assert_eq!(state.query, "graph neural networks");
        assert!(state.content.is_empty());
        assert!(state.summaries.is_empty());
        assert!(state.evaluations.is_empty());
        assert!(!state.passed_check);
        assert_eq!(state.iterations, 0);
    }

    #[test]
    fn test_record_summary_commits_all_fields() {
        let mut state = RunState::new("q");
        state.record_summary("fetched text", "  a summary  \n");
        assert_eq!(state.content, "fetched text");
        assert_eq!(state.summaries, vec!["a summary".to_string()]);
        assert_eq!(state.iterations, 1);
    }

    #[test]
    fn test_record_summary_truncates_content() {
        let mut state = RunState::new("q");
        let long = "x".repeat(6000);
        state.record_summary(&long, "s");
        assert_eq!(state.content.chars().count(), MAX_CONTENT_CHARS);
        assert_eq!(state.content, "x".repeat(5000));
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        // Multi-byte chars: a byte-indexed slice at 5000 would panic.
        let long = "é".repeat(6000);
        let mut state = RunState::new("q");
        state.record_summary(&long, "s");
        assert_eq!(state.content.chars().count(), MAX_CONTENT_CHARS);
    }

    #[test]
    fn test_latest_accessors_default_to_empty() {
        let state = RunState::new("q");
        assert_eq!(state.latest_summary(), "");
        assert_eq!(state.latest_evaluation(), "");
    }

    #[test]
    fn test_latest_accessors_return_newest() {
        let mut state = RunState::new("q");
        state.record_summary("c", "first");
        state.record_summary("c", "second");
        state.record_evaluation("eval one");
        assert_eq!(state.latest_summary(), "second");
        assert_eq!(state.latest_evaluation(), "eval one");
    }

    #[test]
    fn test_snapshot_serialization_roundtrip() {
        let mut state = RunState::new("q");
        state.record_summary("content", "summary");
        state.record_evaluation("evaluation");
        state.passed_check = true;

        let encoded = serde_json::to_string(&state).unwrap();
        let decoded: RunState = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, state);
    }
}
