//! Field selectors used to pull values out of tool results.
//!
//! Paths are JSONPath, evaluated by `jsonpath_lib`. Models often answer with a
//! bare dotted path such as `movie.title`, so a missing `$` is added, and a
//! relative path against a list (`[{"movie": {...}}, ...]`) is applied to every
//! element.

use anyhow::{anyhow, Result};
use serde_json::Value;

/// Rewrite `path` into a full JSONPath expression for `data`
pub fn normalize(path: &str, data: &Value) -> String {
    let trimmed = path.trim();
    let body = trimmed.strip_prefix('$').unwrap_or(trimmed);

    if body.is_empty() {
        return "$".to_string();
    }
    if body.starts_with('[') || body.starts_with("..") {
        return format!("${}", body);
    }

    let relative = body.strip_prefix('.').unwrap_or(body);
    if data.is_array() {
        format!("$[*].{}", relative)
    } else {
        format!("$.{}", relative)
    }
}

/// True when `path` addresses the top-level list itself (`$[0]...`, `[*]...`)
pub fn indexes_root(path: &str) -> bool {
    let trimmed = path.trim();
    trimmed.strip_prefix('$').unwrap_or(trimmed).starts_with('[')
}

/// Evaluate `path` against `data`. Arrays at the end of the path are flattened
/// one level so every field ends up as a flat list of values.
pub fn select(data: &Value, path: &str) -> Result<Vec<Value>> {
    let expression = normalize(path, data);
    let matches = jsonpath_lib::select(data, &expression)
        .map_err(|e| anyhow!("Invalid data path '{}': {:?}", path, e))?;

    let mut selected = Vec::new();
    for value in matches {
        match value {
            Value::Array(items) => selected.extend(items.iter().cloned()),
            other => selected.push(other.clone()),
        }
    }
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn movies() -> Value {
        json!([
            {"movie": {"title": "Toy Story", "year": 1995, "actors": ["Tom Hanks", "Tim Allen"]}},
            {"movie": {"title": "Toy Story 2", "year": 1999, "actors": ["Joan Cusack"]}}
        ])
    }

    #[test]
    fn bare_paths_are_normalized() {
        assert_eq!(normalize("movie.title", &movies()), "$[*].movie.title");
        assert_eq!(normalize("$.movie.title", &json!({})), "$.movie.title");
        assert_eq!(normalize("[0].movie", &movies()), "$[0].movie");
        assert_eq!(normalize("$..title", &movies()), "$..title");
        assert_eq!(normalize(" ", &movies()), "$");
    }

    #[test]
    fn dotted_path_maps_over_arrays() {
        assert_eq!(
            select(&movies(), "movie.title").unwrap(),
            vec![json!("Toy Story"), json!("Toy Story 2")]
        );
    }

    #[test]
    fn dollar_prefix_and_wildcard() {
        assert_eq!(
            select(&movies(), "$[*].movie.year").unwrap(),
            vec![json!(1995), json!(1999)]
        );
    }

    #[test]
    fn index_and_flattening() {
        assert_eq!(
            select(&movies(), "$[0].movie.actors").unwrap(),
            vec![json!("Tom Hanks"), json!("Tim Allen")]
        );
        assert_eq!(
            select(&movies(), "[1].movie.actors[0]").unwrap(),
            vec![json!("Joan Cusack")]
        );
    }

    #[test]
    fn recursive_descent() {
        assert_eq!(
            select(&json!([{"movie": {"title": "Toy Story"}}]), "$..title").unwrap(),
            vec![json!("Toy Story")]
        );
    }

    #[test]
    fn filter_expressions() {
        assert_eq!(
            select(&movies(), "$[?(@.movie.title == 'Toy Story')].movie.year").unwrap(),
            vec![json!(1995)]
        );
    }

    #[test]
    fn bracket_keys() {
        let data = json!({"movie": {"imdbRating": 8.3}});
        assert_eq!(select(&data, "movie['imdbRating']").unwrap(), vec![json!(8.3)]);
    }

    #[test]
    fn missing_keys_select_nothing() {
        assert!(select(&movies(), "movie.budget").unwrap().is_empty());
    }

    #[test]
    fn malformed_paths_are_errors() {
        assert!(select(&movies(), "movie[").is_err());
    }

    #[test]
    fn root_indexing_is_detected() {
        assert!(indexes_root("$[0].movie.title"));
        assert!(indexes_root("[*].movie"));
        assert!(!indexes_root("movie.title"));
        assert!(!indexes_root("$..title"));
    }
}
