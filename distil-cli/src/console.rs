use anyhow::Result;
use distil_core::RunState;
use distil_loop::RefineLoop;
use futures::StreamExt;
use rustyline::DefaultEditor;

/// Render one snapshot: the full numbered summary/evaluation log, then the
/// pass marker. Pure printing of the snapshot, so re-rendering the same
/// snapshot produces the same output.
pub fn render_snapshot(state: &RunState) {
    println!("--- Summary + Evaluation Log ---");
    for (i, (summary, evaluation)) in
        state.summaries.iter().zip(state.evaluations.iter()).enumerate()
    {
        println!("Step {} Summary:\n{}\n", i + 1, summary);
        println!("Step {} Evaluation:\n{}\n", i + 1, evaluation);
    }
    println!("Passed: {}", if state.passed_check { "✅ PASS" } else { "❌ FAIL" });
    println!();
}

/// Drive one run to completion, rendering every snapshot as it arrives.
pub async fn run_query(refine: &RefineLoop, query: &str, json: bool) -> Result<()> {
    let mut snapshots = refine.run(query);

    while let Some(item) = snapshots.next().await {
        match item {
            Ok(state) => {
                if json {
                    println!("{}", serde_json::to_string(&state)?);
                } else {
                    render_snapshot(&state);
                }
            }
            Err(e) => anyhow::bail!("run aborted: {}", e),
        }
    }

    Ok(())
}

/// Interactive console: read a query per line, run it, render snapshots.
pub async fn run_console(refine: RefineLoop, json: bool) -> Result<()> {
    let mut rl = DefaultEditor::new()?;

    println!("distil console");
    println!("Enter a research query and press Enter. Ctrl+C to exit.\n");

    loop {
        let readline = rl.readline("Query -> ");
        match readline {
            Ok(line) => {
                let query = line.trim();
                if query.is_empty() {
                    continue;
                }

                rl.add_history_entry(query)?;

                // A failed run only ends this run; the console stays up for
                // the next query.
                if let Err(e) = run_query(&refine, query, json).await {
                    eprintln!("{}", e);
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("Interrupted");
                break;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("EOF");
                break;
            }
            Err(err) => {
                eprintln!("Error: {}", err);
                break;
            }
        }
    }

    Ok(())
}
