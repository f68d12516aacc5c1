use chrono::Utc;
use std::io::Read;
use std::path::Path;

use crate::{
    error::{AppError, AppResult},
    models::{Catalog, CatalogRow, TitleIndex},
};

use super::artifacts::IndexArtifacts;
use super::tfidf::TfidfVectorizer;

pub const REQUIRED_COLUMNS: [&str; 4] = ["title", "overview", "popularity", "vote_average"];

/// Row counts observed while building
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildReport {
    pub rows_read: usize,
    pub rows_dropped: usize,
}

/// A raw record projected to the required columns
struct RawRow {
    title: String,
    overview: String,
    popularity: f64,
    vote_average: f64,
}

/// Positions of the required columns in the CSV header
struct ColumnPositions {
    title: usize,
    overview: usize,
    popularity: usize,
    vote_average: usize,
}

impl ColumnPositions {
    fn from_headers(headers: &csv::StringRecord) -> AppResult<Self> {
        let mut positions = [0; REQUIRED_COLUMNS.len()];
        for (slot, name) in positions.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = headers
                .iter()
                .position(|header| header.trim() == name)
                .ok_or_else(|| AppError::MissingColumn(name.to_string()))?;
        }
        let [title, overview, popularity, vote_average] = positions;

        Ok(Self {
            title,
            overview,
            popularity,
            vote_average,
        })
    }
}

/// Offline builder turning a raw movie CSV into the recommender artifacts
#[derive(Debug, Clone)]
pub struct IndexBuilder {
    vectorizer: TfidfVectorizer,
}

impl Default for IndexBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self {
            vectorizer: TfidfVectorizer::new().with_stop_words_english(),
        }
    }

    /// Builds the artifacts from a CSV file on disk
    pub fn build_from_path(
        &self,
        path: impl AsRef<Path>,
    ) -> AppResult<(IndexArtifacts, BuildReport)> {
        let file = std::fs::File::open(path.as_ref())?;
        self.build_from_reader(file)
    }

    /// Builds the artifacts from CSV data
    pub fn build_from_reader<R: Read>(&self, reader: R) -> AppResult<(IndexArtifacts, BuildReport)> {
        let (raw_rows, report) = read_rows(reader)?;
        let catalog = normalize(raw_rows);
        let overviews: Vec<&str> = catalog.rows().iter().map(|r| r.overview.as_str()).collect();
        let features = self.vectorizer.fit_transform(&overviews)?;
        let title_index = TitleIndex::from_catalog(&catalog);

        tracing::info!(
            rows_read = report.rows_read,
            rows_dropped = report.rows_dropped,
            catalog_rows = catalog.len(),
            matrix_rows = features.matrix.rows(),
            vocabulary = features.matrix.cols(),
            unique_titles = title_index.len(),
            "Index built"
        );

        let artifacts = IndexArtifacts {
            built_at: Utc::now(),
            catalog,
            features,
            title_index,
        };
        artifacts.validate()?;

        Ok((artifacts, report))
    }
}

/// Reads records, dropping rows without an overview and coercing numbers
fn read_rows<R: Read>(reader: R) -> AppResult<(Vec<RawRow>, BuildReport)> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);
    let columns = ColumnPositions::from_headers(csv_reader.headers()?)?;

    let mut rows = Vec::new();
    let mut rows_read = 0;

    for record in csv_reader.records() {
        let record = record?;
        rows_read += 1;

        let overview = match record.get(columns.overview) {
            Some(overview) if !overview.is_empty() => overview.to_string(),
            _ => continue,
        };

        rows.push(RawRow {
            title: record.get(columns.title).unwrap_or_default().to_string(),
            overview,
            popularity: coerce_number(record.get(columns.popularity)),
            vote_average: coerce_number(record.get(columns.vote_average)),
        });
    }

    let report = BuildReport {
        rows_read,
        rows_dropped: rows_read - rows.len(),
    };

    Ok((rows, report))
}

/// Parses a numeric cell; anything unparsable, non-finite or negative is 0
pub fn coerce_number(cell: Option<&str>) -> f64 {
    cell.and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite() && *value >= 0.0)
        .unwrap_or(0.0)
}

/// Divides every value by the column maximum; all zeros when the maximum is 0
pub fn normalize_column(values: &[f64]) -> Vec<f64> {
    let max = values.iter().copied().fold(0.0, f64::max);
    if max == 0.0 {
        return vec![0.0; values.len()];
    }
    values.iter().map(|value| value / max).collect()
}

fn normalize(raw_rows: Vec<RawRow>) -> Catalog {
    let popularity: Vec<f64> = raw_rows.iter().map(|r| r.popularity).collect();
    let votes: Vec<f64> = raw_rows.iter().map(|r| r.vote_average).collect();
    let norm_popularity = normalize_column(&popularity);
    let norm_vote = normalize_column(&votes);

    let rows = raw_rows
        .into_iter()
        .zip(norm_popularity.into_iter().zip(norm_vote))
        .map(|(raw, (norm_popularity, norm_vote))| CatalogRow {
            title: raw.title,
            overview: raw.overview,
            popularity: raw.popularity,
            vote_average: raw.vote_average,
            norm_popularity,
            norm_vote,
        })
        .collect();

    Catalog::new(rows)
}
