//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// How the result is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Every critique, the synthesis and the score history
    Full,
    /// Only the final concept
    Concept,
    /// JSON output
    Json,
}

impl From<OutputMode> for council_domain::OutputFormat {
    fn from(mode: OutputMode) -> Self {
        match mode {
            OutputMode::Full => Self::Full,
            OutputMode::Concept => Self::Concept,
            OutputMode::Json => Self::Json,
        }
    }
}

/// CLI arguments for content-council
#[derive(Parser, Debug)]
#[command(name = "content-council")]
#[command(author, version, about = "A council of critics hardens a post concept until it scores well")]
#[command(long_about = r#"
Content Council puts a post idea in front of four critics (Skeptic, Futurist,
Realist, Contrarian) at once. A synthesizer merges their critiques into a
hardened concept and a scorer rates it from 0 to 100. The loop repeats on the
new concept until the score reaches the threshold or the iteration budget
runs out.

Configuration files are loaded from (in priority order):
1. --config <path>                          Explicit config file
2. CONTENT_COUNCIL_<SECTION>__<KEY>          Environment variables
3. ./council.toml                           Project-level config
4. ~/.config/content-council/config.toml    Global config

Example:
  content-council "Announce our open-source release"
  content-council --threshold 90 --max-iterations 5 "Hiring post for a Rust engineer"
  content-council --once --context "Draft: we ship on Friday" "Launch teaser"
"#)]
pub struct Cli {
    /// The topic or post idea to refine
    pub topic: Option<String>,

    /// Run a single debate round and print the synthesis, without scoring
    #[arg(long)]
    pub once: bool,

    /// Starting draft for the critics (defaults to the topic itself)
    #[arg(long, value_name = "TEXT")]
    pub context: Option<String>,

    /// Score (0-100) at which refinement stops
    #[arg(long, value_name = "N")]
    pub threshold: Option<f64>,

    /// Maximum number of refinement iterations
    #[arg(long, value_name = "N")]
    pub max_iterations: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputMode>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Write a JSONL transcript of every prompt and reply
    #[arg(long, value_name = "PATH")]
    pub transcript: Option<PathBuf>,

    /// Also write diagnostic logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_refinement_flags() {
        let cli = Cli::try_parse_from([
            "content-council",
            "--threshold",
            "90",
            "--max-iterations",
            "5",
            "-o",
            "json",
            "-vv",
            "Launch post",
        ])
        .unwrap();

        assert_eq!(cli.topic.as_deref(), Some("Launch post"));
        assert_eq!(cli.threshold, Some(90.0));
        assert_eq!(cli.max_iterations, Some(5));
        assert_eq!(cli.output, Some(OutputMode::Json));
        assert_eq!(cli.verbose, 2);
        assert!(!cli.once);
    }

    #[test]
    fn test_parse_single_round() {
        let cli = Cli::try_parse_from([
            "content-council",
            "--once",
            "--context",
            "draft text",
            "--transcript",
            "run.jsonl",
            "Teaser",
        ])
        .unwrap();

        assert!(cli.once);
        assert_eq!(cli.context.as_deref(), Some("draft text"));
        assert_eq!(cli.transcript, Some(PathBuf::from("run.jsonl")));
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_output_mode_maps_to_domain_format() {
        use council_domain::OutputFormat;
        assert_eq!(OutputFormat::from(OutputMode::Concept), OutputFormat::Concept);
        assert_eq!(OutputFormat::from(OutputMode::Full), OutputFormat::Full);
    }
}
