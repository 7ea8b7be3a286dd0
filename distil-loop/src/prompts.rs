//! Prompt construction for the three generator call sites.
//!
//! Pure functions from state to prompt string. The fixed response-format
//! instructions (summary length, score axes, one-word verdict) are part of
//! the loop's contract with the generator, so they live here rather than in
//! host configuration.

/// Prompt for the summarize step, embedding the fetched source excerpt.
pub fn summarize(excerpt: &str) -> String {
    format!(
        r#"You are a helpful AI. Here is source material retrieved for a research topic:

{excerpt}

Summarize the key ideas in 3-5 lines."#
    )
}

/// Prompt for the evaluate step: score the latest summary 1-5 on four axes
/// with short feedback per axis.
pub fn evaluate(query: &str, summary: &str) -> String {
    format!(
        r#"Evaluate the following summary for the query: "{query}"

Summary:
{summary}

Evaluate based on:
1. Accuracy
2. Relevance
3. Clarity
4. Completeness

Score each from 1 to 5 with short feedback."#
    )
}

/// Prompt for the pass check: a strict forced-choice question over the
/// latest evaluation.
pub fn verdict(evaluation: &str) -> String {
    format!(
        r#"Here is an evaluation of a summary:
{evaluation}

Does this evaluation indicate PASS or FAIL?
Respond with only one word: PASS or FAIL."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_embeds_excerpt() {
        let prompt = summarize("quantum error correction surface codes");
        assert!(prompt.contains("quantum error correction surface codes"));
        assert!(prompt.contains("3-5 lines"));
    }

    #[test]
    fn test_evaluate_names_all_axes() {
        let prompt = evaluate("graph neural networks", "GNNs aggregate neighbor features.");
        assert!(prompt.contains("graph neural networks"));
        assert!(prompt.contains("GNNs aggregate neighbor features."));
        for axis in ["Accuracy", "Relevance", "Clarity", "Completeness"] {
            assert!(prompt.contains(axis), "missing axis {axis}");
        }
        assert!(prompt.contains("from 1 to 5"));
    }

    #[test]
    fn test_verdict_is_forced_choice() {
        let prompt = verdict("Accuracy: 4/5. Relevance: 5/5.");
        assert!(prompt.contains("Accuracy: 4/5."));
        assert!(prompt.contains("Respond with only one word: PASS or FAIL."));
    }
}
