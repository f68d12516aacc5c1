use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One movie in the cleaned catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogRow {
    pub title: String,
    pub overview: String,
    pub popularity: f64,
    pub vote_average: f64,
    /// `popularity / max(popularity)`, always in [0, 1]
    pub norm_popularity: f64,
    /// `vote_average / max(vote_average)`, always in [0, 1]
    pub norm_vote: f64,
}

/// The cleaned catalog table
///
/// Row positions are the join key with the text-feature matrix, so rows are
/// never reordered once built.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    rows: Vec<CatalogRow>,
}

impl Catalog {
    pub fn new(rows: Vec<CatalogRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[CatalogRow] {
        &self.rows
    }

    pub fn row(&self, position: usize) -> Option<&CatalogRow> {
        self.rows.get(position)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|row| row.title.as_str())
    }
}

/// Lookup from title to row position
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct TitleIndex {
    positions: BTreeMap<String, usize>,
}

impl TitleIndex {
    /// Maps each title to its row position; the first occurrence of a
    /// duplicated title wins.
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let mut positions = BTreeMap::new();
        for (position, title) in catalog.titles().enumerate() {
            positions.entry(title.to_string()).or_insert(position);
        }
        Self { positions }
    }

    pub fn position(&self, title: &str) -> Option<usize> {
        self.positions.get(title).copied()
    }

    pub fn contains(&self, title: &str) -> bool {
        self.positions.contains_key(title)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.positions.iter().map(|(title, pos)| (title.as_str(), *pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(title: &str) -> CatalogRow {
        CatalogRow {
            title: title.to_string(),
            overview: format!("{} overview", title),
            popularity: 1.0,
            vote_average: 1.0,
            norm_popularity: 1.0,
            norm_vote: 1.0,
        }
    }

    #[test]
    fn test_title_index_first_occurrence_wins() {
        let catalog = Catalog::new(vec![row("Heat"), row("Alien"), row("Heat")]);
        let index = TitleIndex::from_catalog(&catalog);

        assert_eq!(index.len(), 2);
        assert_eq!(index.position("Heat"), Some(0));
        assert_eq!(index.position("Alien"), Some(1));
        assert_eq!(index.position("Ran"), None);
    }

    #[test]
    fn test_title_index_serializes_as_map() {
        let catalog = Catalog::new(vec![row("Heat"), row("Alien")]);
        let index = TitleIndex::from_catalog(&catalog);

        let json = serde_json::to_string(&index).unwrap();
        assert_eq!(json, r#"{"Alien":1,"Heat":0}"#);
    }
}
