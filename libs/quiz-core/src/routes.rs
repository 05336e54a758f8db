//! Longest-chain routes over the country border graph.
//!
//! Routes are simple paths (no country visited twice) along land borders.
//! Two generators exist:
//! - an exhaustive depth-first search for the longest path from a random start
//! - a greedy walk that always moves to the neighbour with the most open
//!   borders, cheap enough to run for every country in one batch
//!
//! The exhaustive search is exponential and meant for offline use only; cap
//! it with a [`SearchLimit`] when the dataset is large.

use std::collections::{BTreeMap, HashMap, HashSet};

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RouteError};
use crate::matching::matches_name;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Default minimum length for batch-generated greedy routes.
pub const DEFAULT_MIN_ROUTE_LENGTH: usize = 10;

/// Latitude/longitude in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub long: f64,
}

/// A country record from the border dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    #[serde(rename = "country", alias = "name")]
    pub name: String,
    #[serde(default)]
    pub borders: Vec<String>,
    #[serde(default)]
    pub coordinates: Coordinates,
}

impl Country {
    pub fn new(name: impl Into<String>, lat: f64, long: f64) -> Self {
        Self {
            name: name.into(),
            borders: Vec::new(),
            coordinates: Coordinates { lat, long },
        }
    }

    pub fn with_borders<I, S>(mut self, borders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.borders = borders.into_iter().map(Into::into).collect();
        self
    }
}

/// Great-circle distance between two points (haversine formula).
pub fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.long - a.long).to_radians();
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + (d_lon / 2.0).sin().powi(2) * lat1.cos() * lat2.cos();
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Cap on the number of nodes the exhaustive search may expand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchLimit {
    pub max_expansions: Option<u64>,
}

impl SearchLimit {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn expansions(max: u64) -> Self {
        Self {
            max_expansions: Some(max),
        }
    }
}

/// Result of a longest-chain search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chain {
    pub start_country: String,
    pub route: Vec<String>,
    pub countries_visited: usize,
    pub total_distance_km: f64,
}

/// Border graph derived from a country dataset.
#[derive(Debug, Clone)]
pub struct BorderGraph {
    countries: HashMap<String, Country>,
    adjacency: HashMap<String, Vec<String>>,
    /// Node names in dataset order, so iteration is reproducible.
    order: Vec<String>,
}

impl BorderGraph {
    /// Build the graph, dropping borders that reference countries not in the dataset.
    pub fn from_countries(countries: &[Country]) -> Self {
        let mut lookup: HashMap<String, Country> = HashMap::with_capacity(countries.len());
        let mut order = Vec::with_capacity(countries.len());
        for country in countries {
            if !lookup.contains_key(&country.name) {
                order.push(country.name.clone());
            }
            lookup.insert(country.name.clone(), country.clone());
        }

        let adjacency = order
            .iter()
            .map(|name| {
                let valid: Vec<String> = lookup[name]
                    .borders
                    .iter()
                    .filter(|border| lookup.contains_key(*border))
                    .cloned()
                    .collect();
                (name.clone(), valid)
            })
            .collect();

        Self {
            countries: lookup,
            adjacency,
            order,
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn country(&self, name: &str) -> Option<&Country> {
        self.countries.get(name)
    }

    /// Valid neighbours of `name`, in dataset order.
    pub fn neighbours(&self, name: &str) -> &[String] {
        self.adjacency.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Countries with at least one valid land border.
    pub fn start_candidates(&self) -> Vec<&str> {
        self.order
            .iter()
            .filter(|name| !self.neighbours(name).is_empty())
            .map(String::as_str)
            .collect()
    }

    /// Sum of great-circle distances between consecutive countries on `route`.
    pub fn route_distance_km(&self, route: &[String]) -> f64 {
        route
            .windows(2)
            .filter_map(|pair| {
                let a = self.countries.get(&pair[0])?;
                let b = self.countries.get(&pair[1])?;
                Some(haversine_km(a.coordinates, b.coordinates))
            })
            .sum()
    }

    /// Longest simple path starting at `start`, found by exhaustive search.
    ///
    /// Among equally long paths the first one found in neighbour order wins.
    pub fn longest_path_from(&self, start: &str, limit: SearchLimit) -> Result<Vec<String>> {
        if !self.countries.contains_key(start) {
            return Err(RouteError::UnknownCountry(start.to_string()));
        }

        let mut search = PathSearch {
            graph: self,
            visited: HashSet::new(),
            expansions: 0,
            limit,
        };
        search.longest_from(start)
    }

    /// Greedy walk from `start`: always step to the unvisited neighbour that
    /// itself has the most unvisited neighbours.
    pub fn greedy_path_from(&self, start: &str) -> Result<Vec<String>> {
        if !self.countries.contains_key(start) {
            return Err(RouteError::UnknownCountry(start.to_string()));
        }

        let mut path = vec![start.to_string()];
        let mut visited: HashSet<&str> = HashSet::from([start]);
        let mut current = start;

        loop {
            let open_borders = |name: &str, visited: &HashSet<&str>| {
                self.neighbours(name)
                    .iter()
                    .filter(|n| !visited.contains(n.as_str()))
                    .count()
            };

            // max_by_key returns the last maximum; reverse keeps the first in dataset order.
            let next = self
                .neighbours(current)
                .iter()
                .filter(|n| !visited.contains(n.as_str()))
                .rev()
                .max_by_key(|n| open_borders(n.as_str(), &visited));

            let Some(next) = next else { break };
            visited.insert(next.as_str());
            path.push(next.clone());
            current = next.as_str();
        }

        Ok(path)
    }

    /// Greedy route for every country, keeping those of at least `min_length`.
    pub fn greedy_routes(&self, min_length: usize) -> BTreeMap<String, Vec<String>> {
        let mut routes = BTreeMap::new();
        for name in &self.order {
            let Ok(path) = self.greedy_path_from(name) else {
                continue;
            };
            if path.len() >= min_length {
                tracing::debug!(start = %name, length = path.len(), "greedy route kept");
                routes.insert(name.clone(), path);
            }
        }
        routes
    }

    /// Pick a random start with at least one border and find its longest chain.
    pub fn find_longest_chain<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        limit: SearchLimit,
    ) -> Result<Chain> {
        let candidates = self.start_candidates();
        let start = *candidates
            .choose(rng)
            .ok_or(RouteError::NoStartCandidates)?;

        tracing::debug!(start, "searching longest chain");
        let route = self.longest_path_from(start, limit)?;
        let total_distance_km = self.route_distance_km(&route);

        Ok(Chain {
            start_country: start.to_string(),
            countries_visited: route.len(),
            route,
            total_distance_km,
        })
    }
}

struct PathSearch<'g> {
    graph: &'g BorderGraph,
    visited: HashSet<&'g str>,
    expansions: u64,
    limit: SearchLimit,
}

impl<'g> PathSearch<'g> {
    fn longest_from(&mut self, node: &'g str) -> Result<Vec<String>> {
        self.expansions += 1;
        if let Some(max) = self.limit.max_expansions {
            if self.expansions > max {
                return Err(RouteError::SearchLimitExceeded { limit: max });
            }
        }

        let graph = self.graph;
        self.visited.insert(node);
        let mut longest = vec![node.to_string()];

        for neighbour in graph.neighbours(node) {
            if self.visited.contains(neighbour.as_str()) {
                continue;
            }
            let tail = self.longest_from(neighbour)?;
            if tail.len() + 1 > longest.len() {
                longest.truncate(1);
                longest.extend(tail);
            }
        }

        // Path-local: siblings must not see this node as visited.
        self.visited.remove(node);
        Ok(longest)
    }
}

/// Find the longest chain in a country dataset, starting from a random country.
pub fn find_longest_chain<R: Rng + ?Sized>(countries: &[Country], rng: &mut R) -> Result<Chain> {
    BorderGraph::from_countries(countries).find_longest_chain(rng, SearchLimit::unlimited())
}

/// Outcome of one guess in a chain run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainStep {
    /// Correct; the run moves on to the next country.
    Advanced,
    /// Correct and the last country on the route.
    Completed,
    /// Wrong guess; the run is over.
    Failed,
    /// The run had already ended.
    Finished,
}

/// A bonus-mode walk along a pre-computed route, naming each country in turn.
#[derive(Debug, Clone)]
pub struct ChainRun {
    route: Vec<String>,
    position: usize,
    failed: bool,
}

impl ChainRun {
    pub fn new(route: Vec<String>) -> Self {
        Self {
            route,
            position: 0,
            failed: false,
        }
    }

    /// Country the player must name next.
    pub fn current(&self) -> Option<&str> {
        if self.is_over() {
            return None;
        }
        self.route.get(self.position).map(String::as_str)
    }

    /// Countries named correctly so far.
    pub fn score(&self) -> usize {
        self.position
    }

    pub fn route(&self) -> &[String] {
        &self.route
    }

    pub fn len(&self) -> usize {
        self.route.len()
    }

    pub fn is_empty(&self) -> bool {
        self.route.is_empty()
    }

    pub fn is_over(&self) -> bool {
        self.failed || self.position >= self.route.len()
    }

    pub fn is_perfect(&self) -> bool {
        !self.failed && !self.route.is_empty() && self.position == self.route.len()
    }

    pub fn guess(&mut self, guess: &str) -> ChainStep {
        let Some(expected) = self.current() else {
            return ChainStep::Finished;
        };

        if !matches_name(guess, expected) {
            self.failed = true;
            return ChainStep::Failed;
        }

        self.position += 1;
        if self.position == self.route.len() {
            ChainStep::Completed
        } else {
            ChainStep::Advanced
        }
    }
}
