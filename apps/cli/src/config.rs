//! Runtime configuration from the environment, overridden by CLI flags.

use std::path::PathBuf;

use quiz_core::{get_policy, ReviewPolicy};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::cli::Cli;
use crate::error::{AppError, Result};

pub const DATA_ENV: &str = "FLAG_QUIZ_DATA";
pub const STATE_ENV: &str = "FLAG_QUIZ_STATE";
pub const STRICT_ENV: &str = "FLAG_QUIZ_STRICT";
pub const SEED_ENV: &str = "FLAG_QUIZ_SEED";
pub const POLICY_ENV: &str = "FLAG_QUIZ_POLICY";

const DEFAULT_DATA_PATH: &str = "data/flags.json";
pub const DEFAULT_POLICY: &str = "streak";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Dataset with static item fields, borders and coordinates.
    pub data_path: PathBuf,
    /// Where the pool with learner stats is persisted.
    pub state_path: PathBuf,
    pub strict: bool,
    pub seed: Option<u64>,
    /// Review scheduling policy name, `streak` or `basic`.
    pub policy: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup, so tests don't touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_path = lookup(DATA_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));
        let state_path = lookup(STATE_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(default_state_path);
        let strict = match lookup(STRICT_ENV) {
            Some(value) => parse_bool(STRICT_ENV, &value)?,
            None => false,
        };
        let seed = match lookup(SEED_ENV) {
            Some(value) => Some(value.trim().parse().map_err(|_| {
                AppError::Config(format!("{SEED_ENV} must be an unsigned integer, got {value:?}"))
            })?),
            None => None,
        };
        let policy = lookup(POLICY_ENV)
            .map(|value| value.trim().to_ascii_lowercase())
            .unwrap_or_else(|| DEFAULT_POLICY.to_string());

        let config = Self {
            data_path,
            state_path,
            strict,
            seed,
            policy,
        };
        config.review_policy()?;
        Ok(config)
    }

    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(data) = &cli.data {
            self.data_path = data.clone();
        }
        if let Some(state) = &cli.state {
            self.state_path = state.clone();
        }
        if cli.seed.is_some() {
            self.seed = cli.seed;
        }
        if let Some(policy) = &cli.policy {
            self.policy = policy.trim().to_ascii_lowercase();
        }
        self
    }

    /// The configured scheduling policy.
    pub fn review_policy(&self) -> Result<Box<dyn ReviewPolicy>> {
        get_policy(&self.policy).ok_or_else(|| {
            AppError::Config(format!(
                "{POLICY_ENV} must be streak or basic, got {:?}",
                self.policy
            ))
        })
    }

    /// Seeded when a seed is configured, otherwise from OS entropy.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

fn default_state_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("flag-quiz")
        .join("progress.json")
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(AppError::Config(format!(
            "{key} must be true or false, got {value:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.data_path, PathBuf::from("data/flags.json"));
        assert!(config.state_path.ends_with("flag-quiz/progress.json"));
        assert!(!config.strict);
        assert_eq!(config.seed, None);
        assert_eq!(config.review_policy().unwrap().name(), "streak");
    }

    #[test]
    fn reads_every_variable() {
        let config = Config::from_lookup(lookup(&[
            (DATA_ENV, "/srv/flags.json"),
            (STATE_ENV, "/tmp/progress.json"),
            (STRICT_ENV, "Yes"),
            (SEED_ENV, "42"),
            (POLICY_ENV, " Basic "),
        ]))
        .unwrap();
        assert_eq!(config.data_path, PathBuf::from("/srv/flags.json"));
        assert_eq!(config.state_path, PathBuf::from("/tmp/progress.json"));
        assert!(config.strict);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.policy, "basic");
    }

    #[test]
    fn bad_values_are_config_errors() {
        let err = Config::from_lookup(lookup(&[(SEED_ENV, "abc")])).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));

        let err = Config::from_lookup(lookup(&[(STRICT_ENV, "maybe")])).unwrap_err();
        assert!(err.to_string().contains("FLAG_QUIZ_STRICT"));

        let err = Config::from_lookup(lookup(&[(POLICY_ENV, "sm2")])).unwrap_err();
        assert!(err.to_string().contains("FLAG_QUIZ_POLICY"));
    }

    #[test]
    fn cli_flags_win_over_environment() {
        let env = lookup(&[(SEED_ENV, "1"), (DATA_ENV, "env.json")]);
        let config = Config::from_lookup(env).unwrap();
        let cli = Cli::parse_from([
            "flag-quiz",
            "--seed",
            "9",
            "--data",
            "cli.json",
            "--policy",
            "basic",
            "stats",
        ]);

        let config = config.with_overrides(&cli);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.data_path, PathBuf::from("cli.json"));
        assert_eq!(config.review_policy().unwrap().name(), "basic");
    }

    #[test]
    fn unknown_policy_flag_fails_on_use() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        let cli = Cli::parse_from(["flag-quiz", "--policy", "leitner", "quiz"]);

        let err = config.with_overrides(&cli).review_policy().err().unwrap();
        assert!(matches!(err, AppError::Config(_)));
    }
}
