use quiz_core::PoolStore;

use crate::config::Config;
use crate::error::Result;
use crate::store::JsonFileStore;

pub fn run(config: &Config) -> Result<()> {
    let store = JsonFileStore::new(&config.state_path);
    store.clear()?;
    store.clear_high_scores()?;
    tracing::info!(path = %store.path().display(), "cleared saved progress and high scores");
    println!("Progress reset.");
    Ok(())
}
