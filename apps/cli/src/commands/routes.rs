//! Offline route generation over the border dataset.

use quiz_core::BorderGraph;

use super::search_limit;
use crate::cli::RoutesArgs;
use crate::config::Config;
use crate::data;
use crate::error::Result;

pub fn run(config: &Config, args: &RoutesArgs) -> Result<()> {
    let countries = data::load_countries(&config.data_path)?;
    let graph = BorderGraph::from_countries(&countries);
    tracing::info!(countries = graph.len(), "built border graph");

    if args.greedy {
        let routes = graph.greedy_routes(args.min_length);
        tracing::info!(
            routes = routes.len(),
            min_length = args.min_length,
            "generated greedy routes"
        );
        return data::write_json(args.output.as_deref(), &routes);
    }

    let mut rng = config.rng();
    let chain = graph.find_longest_chain(&mut rng, search_limit(args.max_expansions))?;
    tracing::info!(
        start = %chain.start_country,
        length = chain.countries_visited,
        distance_km = chain.total_distance_km,
        "found longest chain"
    );
    data::write_json(args.output.as_deref(), &chain)
}
