use crate::{prompts, verdict};
use async_stream::stream;
use distil_core::{Generator, Result, RunState, SnapshotStream, TextSource};
use std::sync::Arc;
use tracing::debug;

/// Hard cap on refinement cycles per run.
///
/// The pass check is itself unreliable generator output, so the loop must
/// never rely on it for termination. Once this many summarize steps have
/// completed the check is forced to pass and the run ends.
pub const MAX_CYCLES: u32 = 3;

/// The summarize → evaluate → check refinement loop.
///
/// Collaborators are injected at construction and shared across runs; each
/// call to [`RefineLoop::run`] owns a fresh [`RunState`], so independent runs
/// can execute concurrently.
///
/// # Example
///
/// ```rust,ignore
/// let refine = RefineLoop::new(source, generator);
/// let mut snapshots = refine.run("graph neural networks");
/// while let Some(snapshot) = snapshots.next().await {
///     render(snapshot?);
/// }
/// ```
pub struct RefineLoop {
    source: Arc<dyn TextSource>,
    generator: Arc<dyn Generator>,
}

impl RefineLoop {
    pub fn new(source: Arc<dyn TextSource>, generator: Arc<dyn Generator>) -> Self {
        Self { source, generator }
    }

    /// Start a run for the given query.
    ///
    /// Returns a finite lazy sequence: one full [`RunState`] snapshot per
    /// completed cycle, terminating within [`MAX_CYCLES`] cycles or at the
    /// first passing check, whichever comes first. A failed collaborator
    /// call ends the stream with the error; no snapshot is yielded for that
    /// cycle. Dropping the stream is the only cancellation point.
    pub fn run(&self, query: impl Into<String>) -> SnapshotStream {
        let source = self.source.clone();
        let generator = self.generator.clone();
        let query = query.into();

        let s = stream! {
            let mut state = RunState::new(query);

            loop {
                if let Err(e) = summarize(source.as_ref(), generator.as_ref(), &mut state).await {
                    yield Err(e);
                    return;
                }

                if let Err(e) = evaluate(generator.as_ref(), &mut state).await {
                    yield Err(e);
                    return;
                }

                if let Err(e) = check_pass(generator.as_ref(), &mut state).await {
                    yield Err(e);
                    return;
                }

                debug!(
                    iterations = state.iterations,
                    passed_check = state.passed_check,
                    "cycle complete"
                );

                if state.passed_check || state.iterations >= MAX_CYCLES {
                    yield Ok(finalize(state));
                    return;
                }

                yield Ok(state.clone());
            }
        };

        Box::pin(s)
    }
}

/// Fetch source text for the query, summarize it, commit the result.
///
/// Nothing is committed unless both collaborator calls succeed.
async fn summarize(
    source: &dyn TextSource,
    generator: &dyn Generator,
    state: &mut RunState,
) -> Result<()> {
    let fetched = source.fetch(&state.query).await?;
    debug!(source = source.name(), fetched_chars = fetched.chars().count(), "fetched source text");

    let summary = generator.generate(&prompts::summarize(&fetched)).await?;
    state.record_summary(&fetched, &summary);
    Ok(())
}

/// Score the latest summary on the four axes and store the raw response.
///
/// Tolerates a missing summary (scores the empty string) so a malformed
/// state cannot crash the step.
async fn evaluate(generator: &dyn Generator, state: &mut RunState) -> Result<()> {
    let prompt = prompts::evaluate(&state.query, state.latest_summary());
    let evaluation = generator.generate(&prompt).await?;
    state.record_evaluation(evaluation.trim().to_string());
    Ok(())
}

/// Decide PASS/FAIL for the latest evaluation.
///
/// Short-circuits once the cycle cap is reached: the outcome is already
/// fixed, so no generator call is spent on it.
async fn check_pass(generator: &dyn Generator, state: &mut RunState) -> Result<()> {
    if state.iterations >= MAX_CYCLES {
        state.passed_check = true;
        return Ok(());
    }

    let response = generator.generate(&prompts::verdict(state.latest_evaluation())).await?;
    state.passed_check = verdict::is_pass(&response);
    Ok(())
}

/// Terminal step: identity on the state, marking the terminal snapshot.
pub fn finalize(state: RunState) -> RunState {
    state
}
