// ============================================================================
// EDU Infrastructure - Baseline Schema Artifact
// File: crates/edu-infrastructure/src/baseline.rs
// ============================================================================
//! The set of objects every new tenant namespace must contain.
//!
//! The artifact is a list of SQL files named `<version>_<name>.sql`. They are
//! applied in version order, verbatim, with `search_path` already pointing at
//! the new namespace, so table names inside them stay unqualified.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use sqlx::{Executor, PgConnection};
use thiserror::Error;
use tracing::debug;

use edu_core::error::DomainError;

#[derive(Error, Debug)]
pub enum BaselineError {
    #[error("Cannot read baseline directory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Baseline artifact contains no SQL files")]
    Empty,

    #[error("Baseline file name must look like 0001_name.sql: {0}")]
    InvalidFileName(String),

    #[error("Baseline version {0} appears more than once")]
    DuplicateVersion(u32),
}

#[derive(Debug, Clone)]
pub struct BaselineFile {
    pub version: u32,
    pub name: String,
    pub sql: String,
}

#[derive(Debug, Clone)]
pub struct BaselineSchema {
    files: Vec<BaselineFile>,
}

impl BaselineSchema {
    /// The artifact shipped with this crate.
    pub fn embedded() -> Self {
        Self {
            files: vec![
                BaselineFile {
                    version: 1,
                    name: "core".into(),
                    sql: include_str!("../baseline/0001_core.sql").into(),
                },
                BaselineFile {
                    version: 2,
                    name: "academics".into(),
                    sql: include_str!("../baseline/0002_academics.sql").into(),
                },
                BaselineFile {
                    version: 3,
                    name: "records".into(),
                    sql: include_str!("../baseline/0003_records.sql").into(),
                },
            ],
        }
    }

    /// Loads every `*.sql` file of `dir`. Other files are ignored.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, BaselineError> {
        let dir = dir.as_ref();
        let io_error = |source| BaselineError::Io { path: dir.to_path_buf(), source };

        let mut sources = Vec::new();
        for entry in fs::read_dir(dir).map_err(io_error)? {
            let path = entry.map_err(io_error)?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("sql") {
                continue;
            }
            let file_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .ok_or_else(|| BaselineError::InvalidFileName(path.display().to_string()))?
                .to_string();
            let sql = fs::read_to_string(&path)
                .map_err(|source| BaselineError::Io { path: path.clone(), source })?;
            sources.push((file_name, sql));
        }

        Self::from_sources(sources)
    }

    /// Builds an artifact from `(file name, sql)` pairs in any order.
    pub fn from_sources(
        sources: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Self, BaselineError> {
        let mut by_version = BTreeMap::new();
        for (file_name, sql) in sources {
            let (version, name) = parse_file_name(&file_name)?;
            if by_version.insert(version, BaselineFile { version, name, sql }).is_some() {
                return Err(BaselineError::DuplicateVersion(version));
            }
        }

        if by_version.is_empty() {
            return Err(BaselineError::Empty);
        }
        Ok(Self {
            files: by_version.into_values().collect(),
        })
    }

    /// Highest file version; recorded on the directory row of each tenant.
    pub fn version(&self) -> i32 {
        self.files
            .last()
            .map(|file| i32::try_from(file.version).unwrap_or(i32::MAX))
            .unwrap_or(0)
    }

    pub fn files(&self) -> &[BaselineFile] {
        &self.files
    }

    /// Executes every file on `conn`. The caller owns the transaction and has
    /// already selected the target namespace.
    pub(crate) async fn apply(&self, conn: &mut PgConnection) -> Result<(), DomainError> {
        for file in &self.files {
            debug!(version = file.version, name = %file.name, "Applying baseline file");
            // Simple-query protocol: a file may hold many statements
            Executor::execute(&mut *conn, file.sql.as_str())
                .await
                .map_err(|e| {
                    DomainError::DatabaseError(format!(
                        "baseline {:04}_{} failed: {}",
                        file.version, file.name, e
                    ))
                })?;
        }
        Ok(())
    }
}

fn parse_file_name(file_name: &str) -> Result<(u32, String), BaselineError> {
    let invalid = || BaselineError::InvalidFileName(file_name.to_string());

    let stem = file_name.strip_suffix(".sql").ok_or_else(invalid)?;
    let (version, name) = stem.split_once('_').ok_or_else(invalid)?;
    if version.is_empty() || !version.chars().all(|c| c.is_ascii_digit()) || name.is_empty() {
        return Err(invalid());
    }
    let version = version.parse::<u32>().map_err(|_| invalid())?;
    Ok((version, name.to_string()))
}
