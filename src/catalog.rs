//! Movie catalog
//!
//! The catalog is supplied from outside as a JSON array of movie records.
//! A movie's id is its position in that array.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single movie record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub title: String,
    pub director: String,
    /// Runtime in minutes
    pub runtime: u32,
    pub genre: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    /// One-line mood, e.g. "Rainy-night noir"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vibe: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blurb: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub good_for: Option<String>,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog has no movies")]
    Empty,
}

/// Ordered, immutable list of movies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    movies: Vec<Movie>,
}

impl Catalog {
    pub fn new(movies: Vec<Movie>) -> Result<Self, CatalogError> {
        if movies.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self { movies })
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Self::new(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    /// Always false; an empty catalog cannot be constructed
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn get(&self, id: usize) -> Option<&Movie> {
        self.movies.get(id)
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn into_movies(self) -> Vec<Movie> {
        self.movies
    }
}
