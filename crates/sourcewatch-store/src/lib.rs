//! Sourcewatch Storage Layer
//!
//! Implements the `RunStore` trait for the verification document.
//!
//! # Architecture
//!
//! - `JsonFileStore`: the JSON file the static site reads at build time
//! - `MemoryStore`: in-process document for tests and dry runs
//!
//! The document is read whole at the start of a run and replaced whole at the
//! end. There is no incremental write: a crash mid-run leaves the previous
//! document untouched.
//!
//! The file is committed alongside the site, so a save keeps the key order of
//! the document it replaces. Keys the site added stay where they were instead
//! of drifting to the end of each object.
//!
//! # Examples
//!
//! ```no_run
//! use sourcewatch_store::JsonFileStore;
//! use sourcewatch_domain::traits::RunStore;
//!
//! let store = JsonFileStore::new("src/_data/sourceVerification.json");
//! let run = store.load().unwrap();
//! println!("{} sources tracked", run.sources.len());
//! ```

#![warn(missing_docs)]

use sourcewatch_domain::traits::RunStore;
use serde_json::{Map, Value};
use sourcewatch_domain::VerificationRun;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Document could not be read
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Store location
        path: PathBuf,
        /// I/O cause
        #[source]
        source: io::Error,
    },

    /// Document is not valid verification JSON
    #[error("Malformed verification document {path}: {source}")]
    Malformed {
        /// Store location
        path: PathBuf,
        /// Parser cause
        #[source]
        source: serde_json::Error,
    },

    /// Document parsed but breaks a collection rule
    #[error("Invalid verification document: {0}")]
    Invalid(String),

    /// Document could not be serialized
    #[error("Failed to serialize verification document: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Document could not be written
    #[error("Failed to write {path}: {source}")]
    Write {
        /// Store location
        path: PathBuf,
        /// I/O cause
        #[source]
        source: io::Error,
    },
}

/// Check collection-level rules a parsed document must satisfy
///
/// Source ids must be unique.
pub fn validate(run: &VerificationRun) -> Result<(), StoreError> {
    let mut seen = HashSet::new();
    for source in &run.sources {
        if !seen.insert(source.id.as_str()) {
            return Err(StoreError::Invalid(format!(
                "duplicate source id '{}'",
                source.id
            )));
        }
    }
    Ok(())
}

/// Render a document the way it is persisted (two-space indented JSON)
pub fn to_pretty_json(run: &VerificationRun) -> Result<String, StoreError> {
    Ok(serde_json::to_string_pretty(run)?)
}

/// Render a document with the key order of a previous version of it
///
/// Keys present in `layout` keep their position and keys new to the document
/// are appended. Sources are paired with their previous entry by `id`.
pub fn to_pretty_json_like(run: &VerificationRun, layout: &Value) -> Result<String, StoreError> {
    let mut value = serde_json::to_value(run)?;
    align_key_order(&mut value, layout);
    Ok(serde_json::to_string_pretty(&value)?)
}

fn align_key_order(value: &mut Value, layout: &Value) {
    match (value, layout) {
        (Value::Object(map), Value::Object(prior)) => {
            let mut rest: Vec<(String, Value)> = std::mem::take(map).into_iter().collect();
            let mut ordered = Map::new();
            for (key, prior_value) in prior {
                if let Some(pos) = rest.iter().position(|(k, _)| k == key) {
                    let (key, mut entry) = rest.remove(pos);
                    align_key_order(&mut entry, prior_value);
                    ordered.insert(key, entry);
                }
            }
            ordered.extend(rest);
            *map = ordered;
        }
        (Value::Array(items), Value::Array(prior)) => {
            for (i, item) in items.iter_mut().enumerate() {
                let matched = match item.get("id") {
                    Some(id) => prior.iter().find(|p| p.get("id") == Some(id)),
                    None => prior.get(i),
                };
                if let Some(prior_item) = matched {
                    align_key_order(item, prior_item);
                }
            }
        }
        _ => {}
    }
}

/// JSON-file implementation of `RunStore`
///
/// Writes go to a sibling `*.tmp` file which is then renamed over the
/// document, so readers never observe a half-written file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store for the document at `path`
    ///
    /// Nothing is read until `load` is called.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Location of the document
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Document currently on disk, if it is readable JSON
    fn current_layout(&self) -> Option<Value> {
        let contents = fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&contents).ok()
    }
}

impl RunStore for JsonFileStore {
    type Error = StoreError;

    fn load(&self) -> Result<VerificationRun, Self::Error> {
        let contents = fs::read_to_string(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;

        let run: VerificationRun =
            serde_json::from_str(&contents).map_err(|source| StoreError::Malformed {
                path: self.path.clone(),
                source,
            })?;
        validate(&run)?;

        tracing::debug!(
            "Loaded {} sources from {}",
            run.sources.len(),
            self.path.display()
        );
        Ok(run)
    }

    fn save(&mut self, run: &VerificationRun) -> Result<(), Self::Error> {
        let contents = match self.current_layout() {
            Some(layout) => to_pretty_json_like(run, &layout)?,
            None => to_pretty_json(run)?,
        };
        let temp = self.temp_path();

        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };
        fs::write(&temp, contents).map_err(write_err)?;
        fs::rename(&temp, &self.path).map_err(write_err)?;

        tracing::debug!(
            "Wrote {} sources to {}",
            run.sources.len(),
            self.path.display()
        );
        Ok(())
    }
}

/// In-memory implementation of `RunStore`
///
/// Useful for testing and for dry runs that must not touch the file.
///
/// # Examples
///
/// ```
/// use sourcewatch_store::MemoryStore;
/// use sourcewatch_domain::traits::RunStore;
/// use sourcewatch_domain::VerificationRun;
///
/// let mut store = MemoryStore::new(VerificationRun::new(vec![]));
/// let run = store.load().unwrap();
/// store.save(&run).unwrap();
/// assert_eq!(store.save_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    run: Option<VerificationRun>,
    save_count: usize,
}

impl MemoryStore {
    /// Create a store holding `run`
    pub fn new(run: VerificationRun) -> Self {
        Self {
            run: Some(run),
            save_count: 0,
        }
    }

    /// Create a store whose document cannot be loaded
    pub fn unreadable() -> Self {
        Self::default()
    }

    /// Current document, if any
    pub fn run(&self) -> Option<&VerificationRun> {
        self.run.as_ref()
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.save_count
    }
}

impl RunStore for MemoryStore {
    type Error = StoreError;

    fn load(&self) -> Result<VerificationRun, Self::Error> {
        let run = self.run.clone().ok_or_else(|| StoreError::Read {
            path: PathBuf::from(":memory:"),
            source: io::Error::new(io::ErrorKind::NotFound, "no document"),
        })?;
        validate(&run)?;
        Ok(run)
    }

    fn save(&mut self, run: &VerificationRun) -> Result<(), Self::Error> {
        self.run = Some(run.clone());
        self.save_count += 1;
        Ok(())
    }
}
