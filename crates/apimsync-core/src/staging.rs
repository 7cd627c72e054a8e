//! On-disk staging layout
//!
//! ```text
//! <root>/export/<platform>/<serviceName>.json
//! <root>/export/<platform>/<group>/<name>.json
//! <root>/export/<platform>/<group>/<name>-oas-definition.json
//! <root>/export/<platform>/<group>/<name>-oas.<ext>
//! <root>/canonical/<group>/<canonicalName>.json
//! <root>/canonical/<group>/<canonicalName>-oas.json
//! <root>/onramp/<platform>/<group>/<apiId>.json
//! <root>/onramp/<platform>/<group>/<apiId>-oas.json
//! ```
//!
//! The layout is shared with other tooling and must not change.

use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use tracing::debug;

const EXPORT_DIR: &str = "export";
const CANONICAL_DIR: &str = "canonical";
const ONRAMP_DIR: &str = "onramp";

const SCHEMA_DEFINITION_SUFFIX: &str = "-oas-definition.json";
const SCHEMA_BODY_MARKER: &str = "-oas";

/// Schema bodies that are not OpenAPI documents and stay in the export area
const NON_OPENAPI_EXTENSIONS: &[&str] = &["wsdl", "xml"];

/// Owner of the staging directory tree
#[derive(Debug, Clone)]
pub struct Stager {
    root: Utf8PathBuf,
}

impl Stager {
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    // ─── Export area ────────────────────────────────────────────────────────

    /// `export/<platform>`
    pub fn export_dir(&self, platform: &str) -> Utf8PathBuf {
        self.root.join(EXPORT_DIR).join(platform)
    }

    /// `export/<platform>/<group>`
    pub fn export_group_dir(&self, platform: &str, group: &str) -> Utf8PathBuf {
        self.export_dir(platform).join(group)
    }

    /// `export/<platform>/<group>/<name>.json`
    pub fn export_api_path(&self, platform: &str, group: &str, name: &str) -> Utf8PathBuf {
        self.export_group_dir(platform, group)
            .join(format!("{name}.json"))
    }

    /// `export/<platform>/<group>/<name>-oas-definition.json`
    pub fn export_schema_definition_path(
        &self,
        platform: &str,
        group: &str,
        name: &str,
    ) -> Utf8PathBuf {
        self.export_group_dir(platform, group)
            .join(format!("{name}{SCHEMA_DEFINITION_SUFFIX}"))
    }

    /// `export/<platform>/<group>/<name>-oas.<ext>`
    pub fn export_schema_body_path(
        &self,
        platform: &str,
        group: &str,
        name: &str,
        extension: &str,
    ) -> Utf8PathBuf {
        self.export_group_dir(platform, group)
            .join(format!("{name}{SCHEMA_BODY_MARKER}.{extension}"))
    }

    /// `export/<platform>/<serviceName>.json`
    pub fn service_path(&self, platform: &str, service_name: &str) -> Utf8PathBuf {
        self.export_dir(platform).join(format!("{service_name}.json"))
    }

    /// Locate the staged OpenAPI body of an exported API, preferring JSON.
    ///
    /// WSDL and XML bodies are never returned.
    pub fn find_export_schema_body(
        &self,
        platform: &str,
        group: &str,
        name: &str,
    ) -> Result<Option<Utf8PathBuf>> {
        let preferred = self.export_schema_body_path(platform, group, name, "json");
        if preferred.is_file() {
            return Ok(Some(preferred));
        }

        let prefix = format!("{name}{SCHEMA_BODY_MARKER}.");
        let dir = self.export_group_dir(platform, group);
        Ok(self
            .list_files(&dir)?
            .into_iter()
            .find(|file| {
                file.strip_prefix(&prefix)
                    .is_some_and(|ext| {
                        !ext.is_empty()
                            && !ext.contains('.')
                            && !NON_OPENAPI_EXTENSIONS.contains(&ext)
                    })
            })
            .map(|file| dir.join(file)))
    }

    /// Remove a platform's export area; a missing area is fine
    pub fn clean_export(&self, platform: &str) -> Result<bool> {
        let dir = self.export_dir(platform);
        match fs::remove_dir_all(&dir) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(Error::staging_io(dir, e)),
        }
    }

    // ─── Canonical area ─────────────────────────────────────────────────────

    /// `canonical`
    pub fn canonical_dir(&self) -> Utf8PathBuf {
        self.root.join(CANONICAL_DIR)
    }

    /// `canonical/<group>`
    pub fn canonical_group_dir(&self, group: &str) -> Utf8PathBuf {
        self.canonical_dir().join(group)
    }

    /// `canonical/<group>/<name>.json`
    pub fn canonical_api_path(&self, group: &str, name: &str) -> Utf8PathBuf {
        self.canonical_group_dir(group).join(format!("{name}.json"))
    }

    /// `canonical/<group>/<name>-oas.json`
    pub fn canonical_schema_path(&self, group: &str, name: &str) -> Utf8PathBuf {
        self.canonical_group_dir(group)
            .join(format!("{name}{SCHEMA_BODY_MARKER}.json"))
    }

    // ─── Onramp area ────────────────────────────────────────────────────────

    /// `onramp/<platform>`
    pub fn onramp_dir(&self, platform: &str) -> Utf8PathBuf {
        self.root.join(ONRAMP_DIR).join(platform)
    }

    /// `onramp/<platform>/<group>`
    pub fn onramp_group_dir(&self, platform: &str, group: &str) -> Utf8PathBuf {
        self.onramp_dir(platform).join(group)
    }

    /// `onramp/<platform>/<group>/<apiId>.json`
    pub fn onramp_api_path(&self, platform: &str, group: &str, api_id: &str) -> Utf8PathBuf {
        self.onramp_group_dir(platform, group)
            .join(format!("{api_id}.json"))
    }

    /// `onramp/<platform>/<group>/<apiId>-oas.json`
    pub fn onramp_schema_path(&self, platform: &str, group: &str, api_id: &str) -> Utf8PathBuf {
        self.onramp_group_dir(platform, group)
            .join(format!("{api_id}{SCHEMA_BODY_MARKER}.json"))
    }

    // ─── File operations ────────────────────────────────────────────────────

    /// Group directory names directly below `dir`, sorted.
    ///
    /// A missing `dir` yields no groups.
    pub fn list_groups(&self, dir: &Utf8Path) -> Result<Vec<String>> {
        self.list_entries(dir, true)
    }

    /// File names directly inside `dir`, sorted
    pub fn list_files(&self, dir: &Utf8Path) -> Result<Vec<String>> {
        self.list_entries(dir, false)
    }

    fn list_entries(&self, dir: &Utf8Path, dirs: bool) -> Result<Vec<String>> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Error::staging_io(dir, e)),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Error::staging_io(dir, e))?;
            let file_type = entry.file_type().map_err(|e| Error::staging_io(dir, e))?;
            if file_type.is_dir() != dirs {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(name) => debug!("Skipping non UTF-8 entry {:?} in {}", name, dir),
            }
        }
        names.sort();
        Ok(names)
    }

    /// Whether a staged file already exists
    pub fn exists(&self, path: &Utf8Path) -> bool {
        path.is_file()
    }

    /// Write a value as two-space indented JSON, creating parent directories
    pub fn write_json<T: Serialize + ?Sized>(&self, path: &Utf8Path, value: &T) -> Result<()> {
        let json = serde_json::to_vec_pretty(value)?;
        self.write_bytes(path, &json)
    }

    /// Write raw bytes, creating parent directories
    pub fn write_bytes(&self, path: &Utf8Path, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::staging_io(parent, e))?;
        }
        fs::write(path, bytes).map_err(|e| Error::staging_io(path, e))?;
        debug!("Wrote {} ({} bytes)", path, bytes.len());
        Ok(())
    }

    /// Read and decode a staged JSON file
    pub fn read_json<T: DeserializeOwned>(&self, path: &Utf8Path) -> Result<T> {
        let bytes = self.read_bytes(path)?;
        serde_json::from_slice(&bytes).map_err(|e| Error::staging_decode(path, e))
    }

    /// Read and decode a staged JSON file that may be absent
    pub fn read_json_opt<T: DeserializeOwned>(&self, path: &Utf8Path) -> Result<Option<T>> {
        if !path.is_file() {
            return Ok(None);
        }
        self.read_json(path).map(Some)
    }

    /// Read raw bytes of a staged file
    pub fn read_bytes(&self, path: &Utf8Path) -> Result<Vec<u8>> {
        fs::read(path).map_err(|e| Error::staging_io(path, e))
    }

    /// Copy a staged file verbatim
    pub fn copy(&self, from: &Utf8Path, to: &Utf8Path) -> Result<()> {
        let bytes = self.read_bytes(from)?;
        self.write_bytes(to, &bytes)
    }
}

/// Whether a staged file name is a schema definition or schema body
/// rather than an API record
pub fn is_schema_file(file_name: &str) -> bool {
    if file_name.ends_with(SCHEMA_DEFINITION_SUFFIX) {
        return true;
    }
    file_name
        .rsplit_once('.')
        .is_some_and(|(stem, _)| stem.ends_with(SCHEMA_BODY_MARKER))
}

/// Whether a staged file name is an API record
pub fn is_api_file(file_name: &str) -> bool {
    file_name.ends_with(".json") && !is_schema_file(file_name)
}

/// API name of an API record file (`orders-v2.json` → `orders-v2`)
pub fn api_file_stem(file_name: &str) -> &str {
    file_name.strip_suffix(".json").unwrap_or(file_name)
}
