//! Reading the flag dataset and writing route files.
//!
//! One dataset file feeds both the quiz (`code`, `country`, `aliases`, `tags`)
//! and the route finder (`country`, `borders`, `coordinates`).

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use quiz_core::{Chain, Country, ItemRecord};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Routes keyed by start country, as written by `routes --greedy`.
pub type RouteMap = BTreeMap<String, Vec<String>>;

/// Either file `routes` writes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RouteFile {
    /// `routes --greedy`: one route per start country.
    Greedy(RouteMap),
    /// Plain `routes`: the single longest chain found.
    Longest(Chain),
}

impl RouteFile {
    pub fn into_routes(self) -> Vec<Vec<String>> {
        match self {
            Self::Greedy(map) => map.into_values().collect(),
            Self::Longest(chain) => vec![chain.route],
        }
    }
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| AppError::Dataset(format!("cannot read {}: {e}", path.display())))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    Ok(serde_json::from_str(&read_text(path)?)?)
}

pub fn load_records(path: &Path) -> Result<Vec<ItemRecord>> {
    let records: Vec<ItemRecord> = read_json(path)?;
    if records.is_empty() {
        return Err(AppError::Dataset(format!("no items in {}", path.display())));
    }
    tracing::info!(path = %path.display(), items = records.len(), "loaded dataset");
    Ok(records)
}

pub fn load_countries(path: &Path) -> Result<Vec<Country>> {
    read_json(path)
}

pub fn load_routes(path: &Path) -> Result<RouteMap> {
    read_json(path)
}

/// Routes from a file in either shape, dropping empty ones.
pub fn load_route_file(path: &Path) -> Result<Vec<Vec<String>>> {
    let file: RouteFile = serde_json::from_str(&read_text(path)?).map_err(|_| {
        AppError::Dataset(format!(
            "{} is neither a route map nor a chain written by `routes`",
            path.display()
        ))
    })?;

    let routes: Vec<Vec<String>> = file
        .into_routes()
        .into_iter()
        .filter(|route| !route.is_empty())
        .collect();
    if routes.is_empty() {
        return Err(AppError::Dataset(format!("no routes in {}", path.display())));
    }
    Ok(routes)
}

/// Pretty JSON to `path`, creating parent directories, or to stdout when `None`.
pub fn write_json<T: Serialize>(path: Option<&Path>, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match path {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, json)?;
            tracing::info!(path = %path.display(), "wrote routes");
        }
        None => println!("{json}"),
    }
    Ok(())
}
