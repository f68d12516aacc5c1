use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::{
    error::{AppError, AppResult},
    models::{Catalog, TitleIndex},
};

use super::matrix::check_structure;
use super::tfidf::TextFeatures;

pub const CATALOG_FILE: &str = "catalog.json";
pub const MATRIX_FILE: &str = "tfidf_matrix.json";
pub const TITLE_INDEX_FILE: &str = "title_index.json";

/// The three artifacts handed from the index builder to the service
#[derive(Debug, Clone, PartialEq)]
pub struct IndexArtifacts {
    pub built_at: DateTime<Utc>,
    pub catalog: Catalog,
    pub features: TextFeatures,
    pub title_index: TitleIndex,
}

/// On-disk layout of `catalog.json`
#[derive(Serialize, Deserialize)]
struct CatalogFile {
    built_at: DateTime<Utc>,
    #[serde(flatten)]
    catalog: Catalog,
}

impl IndexArtifacts {
    /// Writes all three artifacts into `dir`, creating it if needed
    pub fn save(&self, dir: impl AsRef<Path>) -> AppResult<()> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;

        write_json(
            &dir.join(CATALOG_FILE),
            &CatalogFile {
                built_at: self.built_at,
                catalog: self.catalog.clone(),
            },
        )?;
        write_json(&dir.join(MATRIX_FILE), &self.features)?;
        write_json(&dir.join(TITLE_INDEX_FILE), &self.title_index)?;

        tracing::info!(dir = %dir.display(), "Artifacts written");
        Ok(())
    }

    /// Loads all three artifacts from `dir` and checks they agree
    pub fn load(dir: impl AsRef<Path>) -> AppResult<Self> {
        let dir = dir.as_ref();

        for name in [CATALOG_FILE, MATRIX_FILE, TITLE_INDEX_FILE] {
            if !dir.join(name).is_file() {
                return Err(AppError::Artifact(format!(
                    "{} missing from {}",
                    name,
                    dir.display()
                )));
            }
        }

        let catalog_file: CatalogFile = read_json(&dir.join(CATALOG_FILE))?;
        let features: TextFeatures = read_json(&dir.join(MATRIX_FILE))?;
        let title_index: TitleIndex = read_json(&dir.join(TITLE_INDEX_FILE))?;

        let artifacts = Self {
            built_at: catalog_file.built_at,
            catalog: catalog_file.catalog,
            features,
            title_index,
        };
        artifacts.validate()?;

        tracing::info!(
            dir = %dir.display(),
            rows = artifacts.catalog.len(),
            vocabulary = artifacts.features.vocabulary.len(),
            built_at = %artifacts.built_at,
            "Artifacts loaded"
        );

        Ok(artifacts)
    }

    /// Checks row-count parity, index bounds and normalized ranges
    pub fn validate(&self) -> AppResult<()> {
        let matrix = &self.features.matrix;
        check_structure(matrix)?;

        let rows = self.catalog.len();
        if matrix.rows() != rows {
            return Err(AppError::Artifact(format!(
                "matrix has {} rows but catalog has {}",
                matrix.rows(),
                rows
            )));
        }
        if self.features.vocabulary.len() != matrix.cols()
            || self.features.idf.len() != matrix.cols()
        {
            return Err(AppError::Artifact(
                "vocabulary size does not match matrix columns".to_string(),
            ));
        }
        if let Some((title, position)) = self.title_index.iter().find(|(_, pos)| *pos >= rows) {
            return Err(AppError::Artifact(format!(
                "title index maps {:?} to row {} of {}",
                title, position, rows
            )));
        }
        let in_range = |v: f64| (0.0..=1.0).contains(&v);
        if let Some(row) = self
            .catalog
            .rows()
            .iter()
            .find(|r| !in_range(r.norm_popularity) || !in_range(r.norm_vote))
        {
            return Err(AppError::Artifact(format!(
                "normalized scores out of range for {:?}",
                row.title
            )));
        }
        Ok(())
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> AppResult<()> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(writer, value)?;
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
