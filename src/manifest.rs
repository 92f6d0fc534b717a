//! Manifest access - reading and rewriting the version field of a JSON manifest.
//!
//! The [ManifestStore] trait is what the release workflow depends on;
//! [JsonManifest] is the file-backed implementation used by the binary.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::*;
use serde_json::{Map, Value};
use tempfile::NamedTempFile;

use crate::error::{ReleaseError, Result};

/// A parsed manifest: the `version` field plus every other field, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestRecord {
    path: PathBuf,
    fields: Map<String, Value>,
}

impl ManifestRecord {
    /// Parse manifest content read from `path`.
    pub fn parse(path: impl Into<PathBuf>, content: &str) -> Result<Self> {
        let path = path.into();
        let doc: Value =
            serde_json::from_str(content).map_err(|source| ReleaseError::ManifestParse {
                path: path.clone(),
                source,
            })?;

        match doc {
            Value::Object(fields) => Ok(ManifestRecord { path, fields }),
            _ => Err(ReleaseError::NotAnObject { path }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Any top-level field other than the version.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// The current version string.
    ///
    /// Numeric versions (`"version": 1.2`) are read through their JSON text.
    pub fn version(&self) -> Result<String> {
        match self.fields.get("version") {
            None | Some(Value::Null) => Err(ReleaseError::MissingVersion {
                path: self.path.clone(),
            }),
            Some(Value::String(version)) => Ok(version.clone()),
            Some(Value::Number(number)) => Ok(number.to_string()),
            Some(other) => Err(ReleaseError::InvalidVersionField {
                path: self.path.clone(),
                found: other.to_string(),
            }),
        }
    }

    /// Replace the version, keeping its position among the other fields.
    pub fn set_version(&mut self, version: &str) {
        self.fields
            .insert("version".to_string(), Value::String(version.to_string()));
    }

    /// Two-space indented JSON with a trailing newline.
    pub fn to_pretty_string(&self) -> Result<String> {
        let mut formatted = serde_json::to_string_pretty(&self.fields).map_err(|source| {
            ReleaseError::ManifestParse {
                path: self.path.clone(),
                source,
            }
        })?;
        formatted.push('\n');
        Ok(formatted)
    }
}

/// Storage for the manifest the workflow bumps.
pub trait ManifestStore {
    /// Location of the manifest, used when staging it for commit
    fn path(&self) -> &Path;

    /// Read and parse the manifest
    fn load(&self) -> Result<ManifestRecord>;

    /// Serialize the record and replace the manifest with it
    fn save(&self, record: &ManifestRecord) -> Result<()>;
}

/// A JSON manifest on disk, such as `composer.json`.
#[derive(Debug, Clone)]
pub struct JsonManifest {
    path: PathBuf,
}

impl JsonManifest {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonManifest { path: path.into() }
    }

    fn directory(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl ManifestStore for JsonManifest {
    fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<ManifestRecord> {
        debug!("reading manifest {}", self.path.display());
        let content = fs::read_to_string(&self.path)
            .map_err(|e| ReleaseError::manifest_io(&self.path, e))?;
        ManifestRecord::parse(&self.path, &content)
    }

    /// Writes to a temp file next to the manifest, then renames it over the
    /// original so an interrupted write never leaves a truncated manifest.
    fn save(&self, record: &ManifestRecord) -> Result<()> {
        let formatted = record.to_pretty_string()?;
        let io_err = |e: std::io::Error| ReleaseError::manifest_io(&self.path, e);

        let mut temp = NamedTempFile::new_in(self.directory()).map_err(io_err)?;
        temp.write_all(formatted.as_bytes()).map_err(io_err)?;
        temp.flush().map_err(io_err)?;

        if let Ok(metadata) = fs::metadata(&self.path) {
            temp.as_file()
                .set_permissions(metadata.permissions())
                .map_err(io_err)?;
        }

        temp.persist(&self.path).map_err(|e| io_err(e.error))?;
        info!("wrote manifest {}", self.path.display());
        Ok(())
    }
}
