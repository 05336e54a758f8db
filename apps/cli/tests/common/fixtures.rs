//! Dataset fixtures shaped like the shipped `flags.json`.

use serde_json::{json, Value};

fn country(code: &str, name: &str, region: &str, borders: &[&str], lat: f64, long: f64) -> Value {
    json!({
        "code": code,
        "country": name,
        "aliases": [],
        "tags": [format!("region:{region}")],
        "borders": borders,
        "coordinates": { "lat": lat, "long": long }
    })
}

/// Western Europe plus two countries without land borders in the data.
pub fn europe_dataset() -> Value {
    Value::Array(vec![
        country("PT", "Portugal", "europe", &["Spain"], 39.5, -8.0),
        country("ES", "Spain", "europe", &["Portugal", "France", "Andorra"], 40.0, -4.0),
        country("AD", "Andorra", "europe", &["Spain", "France"], 42.5, 1.5),
        country(
            "FR",
            "France",
            "europe",
            &["Spain", "Andorra", "Belgium", "Germany", "Switzerland", "Italy"],
            46.0,
            2.0,
        ),
        country("BE", "Belgium", "europe", &["France", "Germany", "Netherlands"], 50.8, 4.0),
        country("NL", "Netherlands", "europe", &["Belgium", "Germany"], 52.5, 5.75),
        country(
            "DE",
            "Germany",
            "europe",
            &["France", "Belgium", "Netherlands", "Switzerland", "Austria"],
            51.0,
            9.0,
        ),
        country(
            "CH",
            "Switzerland",
            "europe",
            &["France", "Germany", "Austria", "Italy"],
            47.0,
            8.0,
        ),
        country("AT", "Austria", "europe", &["Germany", "Switzerland", "Italy"], 47.3, 13.3),
        country("IT", "Italy", "europe", &["France", "Switzerland", "Austria"], 42.8, 12.8),
        country("IS", "Iceland", "europe", &[], 65.0, -18.0),
        country("KE", "Kenya", "africa", &["Somaliland"], 0.0, 38.0),
    ])
}

/// A single flag, so selection is deterministic.
pub fn single_flag_dataset() -> Value {
    json!([{
        "code": "FR",
        "country": "France",
        "aliases": ["French Republic"],
        "tags": ["region:europe"]
    }])
}

/// Greedy walk from Portugal over [`europe_dataset`].
pub fn greedy_route_from_portugal() -> Vec<String> {
    ["Portugal", "Spain", "France", "Germany", "Switzerland", "Austria", "Italy"]
        .map(String::from)
        .to_vec()
}
