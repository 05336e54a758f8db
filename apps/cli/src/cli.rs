//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use quiz_core::routes::DEFAULT_MIN_ROUTE_LENGTH;
use quiz_core::Category;

#[derive(Parser, Debug)]
#[command(name = "flag-quiz", about = "Adaptive flag quiz in the terminal", version)]
pub struct Cli {
    /// Dataset file (overrides FLAG_QUIZ_DATA)
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Saved progress file (overrides FLAG_QUIZ_STATE)
    #[arg(long, global = true)]
    pub state: Option<PathBuf>,

    /// Seed for reproducible question order (overrides FLAG_QUIZ_SEED)
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Review scheduling: `streak` (with leech handling) or `basic` (overrides FLAG_QUIZ_POLICY)
    #[arg(long, global = true)]
    pub policy: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Answer flags until you quit with `:q`
    Quiz(QuizArgs),

    /// Show progress across all flags
    Stats,

    /// Generate border routes for the chain quiz
    Routes(RoutesArgs),

    /// Name every country along a border route
    Chain(ChainArgs),

    /// Forget all saved progress
    Reset,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum QuizMode {
    #[default]
    MultipleChoice,
    FreeResponse,
}

#[derive(clap::Args, Debug)]
pub struct QuizArgs {
    #[arg(long, value_enum, default_value_t = QuizMode::MultipleChoice)]
    pub mode: QuizMode,

    /// `all`, `review`, or a tag such as `region:europe`
    #[arg(long, default_value = "all")]
    pub category: Category,

    /// Require exact spelling in free response
    #[arg(long)]
    pub strict: bool,
}

#[derive(clap::Args, Debug)]
pub struct RoutesArgs {
    /// Greedy route for every country instead of one exhaustive search
    #[arg(long)]
    pub greedy: bool,

    /// Shortest greedy route worth keeping
    #[arg(long, default_value_t = DEFAULT_MIN_ROUTE_LENGTH)]
    pub min_length: usize,

    /// Write JSON here instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Give up the exhaustive search after this many node expansions
    #[arg(long)]
    pub max_expansions: Option<u64>,
}

#[derive(clap::Args, Debug)]
pub struct ChainArgs {
    /// Routes file written by `routes`, either shape; searched live when omitted
    #[arg(long)]
    pub routes: Option<PathBuf>,

    #[arg(long)]
    pub max_expansions: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn quiz_defaults() {
        let cli = Cli::try_parse_from(["flag-quiz", "quiz"]).unwrap();
        let Command::Quiz(args) = cli.command else {
            panic!("expected quiz command");
        };
        assert_eq!(args.mode, QuizMode::MultipleChoice);
        assert_eq!(args.category, Category::All);
        assert!(!args.strict);
    }

    #[test]
    fn quiz_with_region_category() {
        let cli = Cli::try_parse_from([
            "flag-quiz",
            "--seed",
            "7",
            "quiz",
            "--mode",
            "free-response",
            "--category",
            "region:africa",
            "--strict",
        ])
        .unwrap();
        assert_eq!(cli.seed, Some(7));
        let Command::Quiz(args) = cli.command else {
            panic!("expected quiz command");
        };
        assert_eq!(args.mode, QuizMode::FreeResponse);
        assert_eq!(args.category, Category::region("africa"));
        assert!(args.strict);
    }

    #[test]
    fn routes_defaults_to_ten_countries() {
        let cli = Cli::try_parse_from(["flag-quiz", "routes", "--greedy"]).unwrap();
        let Command::Routes(args) = cli.command else {
            panic!("expected routes command");
        };
        assert!(args.greedy);
        assert_eq!(args.min_length, 10);
        assert_eq!(args.output, None);
    }

    #[test]
    fn rejects_malformed_category() {
        assert!(Cli::try_parse_from(["flag-quiz", "quiz", "--category", "weird"]).is_err());
    }
}
