use quiz_core::ProgressSummary;

use crate::config::Config;
use crate::error::Result;
use crate::render::summary_lines;
use crate::store::JsonFileStore;

pub fn run(config: &Config) -> Result<()> {
    let pool = super::load_pool(config)?;
    let scores = JsonFileStore::new(&config.state_path).load_high_scores()?;
    for line in summary_lines(&ProgressSummary::from_pool(&pool), &scores) {
        println!("{line}");
    }
    Ok(())
}
