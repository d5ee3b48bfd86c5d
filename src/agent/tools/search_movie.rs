use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use super::tool::Tool;

const MOVIES_JSON: &str = include_str!("../../../data/movies.json");

/// Looks movies up by title in an embedded catalogue
pub struct SearchMovieTool {
    movies: Vec<Value>,
}

impl SearchMovieTool {
    pub fn new() -> Result<Self> {
        Self::from_json(MOVIES_JSON)
    }

    pub fn from_json(catalogue: &str) -> Result<Self> {
        let movies: Vec<Value> = serde_json::from_str(catalogue)?;
        Ok(Self { movies })
    }

    fn title_of(entry: &Value) -> Option<&str> {
        entry
            .pointer("/movie/title")
            .or_else(|| entry.get("title"))
            .and_then(Value::as_str)
    }

    pub fn search(&self, title: &str) -> Vec<Value> {
        let needle = title.trim().to_lowercase();
        self.movies
            .iter()
            .filter(|entry| {
                Self::title_of(entry)
                    .map(|t| t.to_lowercase().contains(&needle))
                    .unwrap_or(false)
            })
            .cloned()
            .collect()
    }
}

#[async_trait]
impl Tool for SearchMovieTool {
    fn name(&self) -> &str {
        "search_movie"
    }

    fn description(&self) -> &str {
        "Search for movies by title. Returns details such as year, rating, actors, plot, poster and trailer."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "title": {
                    "type": "string",
                    "description": "Movie title, or part of it"
                }
            },
            "required": ["title"]
        })
    }

    async fn call(&self, arguments: Value) -> Result<Value> {
        let title = arguments
            .get("title")
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow!("search_movie requires a string 'title' argument"))?;

        let found = self.search(title);
        debug!("search_movie('{}') matched {} movies", title, found.len());
        Ok(Value::Array(found))
    }
}
