pub mod chain;
pub mod quiz;
pub mod reset;
pub mod routes;
pub mod stats;

use quiz_core::{merge_saved, ItemPool, PoolStore, SearchLimit};

use crate::cli::Command;
use crate::config::Config;
use crate::data;
use crate::error::Result;
use crate::store::JsonFileStore;

/// Typed at any prompt to leave the current game.
pub const QUIT: &str = ":q";

pub fn dispatch(command: Command, config: &Config) -> Result<()> {
    match command {
        Command::Quiz(args) => quiz::run(config, args),
        Command::Stats => stats::run(config),
        Command::Routes(args) => routes::run(config, &args),
        Command::Chain(args) => chain::run(config, &args),
        Command::Reset => reset::run(config),
    }
}

/// Dataset merged with saved progress, without starting a session.
pub fn load_pool(config: &Config) -> Result<ItemPool> {
    let records = data::load_records(&config.data_path)?;
    let saved = JsonFileStore::new(&config.state_path).load()?;
    Ok(merge_saved(&records, saved.as_ref()))
}

fn search_limit(max_expansions: Option<u64>) -> SearchLimit {
    max_expansions
        .map(SearchLimit::expansions)
        .unwrap_or_default()
}
