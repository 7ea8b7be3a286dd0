use clap::Parser;

#[derive(Parser)]
#[command(name = "distil")]
#[command(about = "Iterative summarize-evaluate refinement over arXiv abstracts", long_about = None)]
pub struct Cli {
    /// Research query to run. Omit for interactive console mode.
    pub query: Option<String>,

    /// Model name for the generator
    #[arg(long, default_value = "gpt-4o-mini")]
    pub model: String,

    /// Sampling temperature for the generator
    #[arg(long, default_value_t = 0.7)]
    pub temperature: f32,

    /// How many arXiv entries to fetch per cycle
    #[arg(long, default_value_t = 1)]
    pub max_results: usize,

    /// Cap on fetched record text per cycle, in characters
    #[arg(long, default_value_t = 300)]
    pub max_chars: usize,

    /// Emit snapshots as JSON lines instead of the rendered log
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["distil"]);
        assert!(cli.query.is_none());
        assert_eq!(cli.model, "gpt-4o-mini");
        assert!((cli.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(cli.max_results, 1);
        assert_eq!(cli.max_chars, 300);
        assert!(!cli.json);
    }

    #[test]
    fn test_one_shot_query() {
        let cli = Cli::parse_from(["distil", "graph neural networks", "--json"]);
        assert_eq!(cli.query.as_deref(), Some("graph neural networks"));
        assert!(cli.json);
    }
}
