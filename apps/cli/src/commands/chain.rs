//! Bonus mode: name every country along a border route.

use std::collections::HashMap;
use std::io::{self, BufRead, Write};

use quiz_core::{BorderGraph, ChainRun, ChainStep};
use rand::seq::SliceRandom;

use super::{search_limit, QUIT};
use crate::cli::ChainArgs;
use crate::config::Config;
use crate::data;
use crate::error::{AppError, Result};
use crate::render::{chain_summary_lines, flag_emoji};
use crate::store::JsonFileStore;

pub fn run(config: &Config, args: &ChainArgs) -> Result<()> {
    let stdin = io::stdin();
    let run = play(config, args, stdin.lock(), io::stdout().lock())?;
    tracing::info!(
        score = run.score(),
        length = run.len(),
        perfect = run.is_perfect(),
        "chain finished"
    );
    Ok(())
}

/// Pick a route, play it against `input`, then report the journey and the
/// chain high score.
pub fn play<I: BufRead, W: Write>(
    config: &Config,
    args: &ChainArgs,
    input: I,
    mut out: W,
) -> Result<ChainRun> {
    let mut rng = config.rng();
    let countries = data::load_countries(&config.data_path)?;
    let graph = BorderGraph::from_countries(&countries);

    let route = match &args.routes {
        Some(path) => data::load_route_file(path)?
            .choose(&mut rng)
            .cloned()
            .ok_or_else(|| AppError::Dataset(format!("no routes in {}", path.display())))?,
        None => {
            graph
                .find_longest_chain(&mut rng, search_limit(args.max_expansions))?
                .route
        }
    };

    let codes: HashMap<String, String> = data::load_records(&config.data_path)?
        .into_iter()
        .map(|record| (record.name, record.code))
        .collect();

    let run = play_chain(ChainRun::new(route), &codes, input, &mut out)?;
    let store = JsonFileStore::new(&config.state_path);
    write_result(&run, &graph, &store, &mut out)?;
    Ok(run)
}

/// High score line followed by the journey summary.
fn write_result<W: Write>(
    run: &ChainRun,
    graph: &BorderGraph,
    store: &JsonFileStore,
    out: &mut W,
) -> Result<()> {
    let previous = store.record_longest_route(run.score())?;
    if run.score() > previous {
        writeln!(out, "New high score: {}!", run.score())?;
    } else {
        writeln!(out, "High score: {previous}")?;
    }

    let route = run.route();
    if route.iter().all(|name| graph.country(name).is_some()) {
        writeln!(out)?;
        for line in chain_summary_lines(route, graph.route_distance_km(route)) {
            writeln!(out, "{line}")?;
        }
    } else {
        tracing::warn!("route names countries missing from the dataset; skipping distance");
    }
    Ok(())
}

/// Walk the run with guesses read from `input`. `codes` maps country names
/// to flag codes.
pub fn play_chain<I: BufRead, W: Write>(
    mut run: ChainRun,
    codes: &HashMap<String, String>,
    mut input: I,
    mut out: W,
) -> Result<ChainRun> {
    writeln!(out, "Name all {} countries along this border route.", run.len())?;

    loop {
        let Some(expected) = run.current().map(str::to_string) else {
            break;
        };
        let flag = codes
            .get(&expected)
            .map(|code| flag_emoji(code))
            .unwrap_or_else(|| "[?]".to_string());
        writeln!(out, "{flag}  ({}/{}) Which country is this?", run.score() + 1, run.len())?;
        write!(out, "> ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 || line.trim() == QUIT {
            break;
        }

        match run.guess(line.trim()) {
            ChainStep::Advanced => writeln!(out, "Correct!")?,
            ChainStep::Completed => {
                writeln!(out, "Perfect run! All {} countries named.", run.len())?
            }
            ChainStep::Failed => writeln!(out, "Incorrect. It was {expected}.")?,
            ChainStep::Finished => break,
        }
    }

    writeln!(out, "Score: {}/{}", run.score(), run.len())?;
    Ok(run)
}
