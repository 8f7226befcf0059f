use super::conversion::IntoSequence;
use crate::error::InputError;
use crate::model::Group;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Title used when raw XML is given without a display name.
pub const DEFAULT_TITLE: &str = "Task Sequence";

/// A task-sequence object as exported by the management system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskSequencePackage {
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(alias = "LastRefreshTime", alias = "lastRefreshTime")]
    pub last_refresh_time: DateTime<Local>,
    /// The serialized sequence XML.
    #[serde(alias = "Sequence")]
    pub sequence: String,
}

impl TaskSequencePackage {
    pub fn from_json(json: &str) -> Result<Self, InputError> {
        serde_json::from_str(json).map_err(|e| InputError::Malformed(e.to_string()))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, InputError> {
        Self::from_json(&read_existing(path.as_ref())?)
    }
}

/// The mutually exclusive shapes the input can take.
#[derive(Debug, Clone)]
pub enum InputSource {
    Xml(String),
    File(PathBuf),
    Package(TaskSequencePackage),
}

/// A parsed task sequence together with its display metadata.
#[derive(Debug, Clone)]
pub struct ResolvedSequence {
    pub title: String,
    pub last_updated: DateTime<Local>,
    pub root: Group,
}

impl InputSource {
    /// Reads and parses the input into an immutable sequence tree.
    ///
    /// `display_name` overrides the title for XML and file inputs; packages
    /// always use their own name.
    pub fn resolve(self, display_name: Option<&str>) -> Result<ResolvedSequence, InputError> {
        let title = || display_name.unwrap_or(DEFAULT_TITLE).to_string();
        match self {
            InputSource::Package(package) => {
                log::debug!("Resolving task sequence package '{}'", package.name);
                Ok(ResolvedSequence {
                    root: package.sequence.as_str().into_sequence()?,
                    title: package.name,
                    last_updated: package.last_refresh_time,
                })
            }
            InputSource::Xml(xml) => Ok(ResolvedSequence {
                root: xml.as_str().into_sequence()?,
                title: title(),
                last_updated: Local::now(),
            }),
            InputSource::File(path) => {
                log::debug!("Reading task sequence XML from '{}'", path.display());
                let xml = read_existing(&path)?;
                Ok(ResolvedSequence {
                    root: xml.as_str().into_sequence()?,
                    title: title(),
                    last_updated: Local::now(),
                })
            }
        }
    }
}

fn read_existing(path: &Path) -> Result<String, InputError> {
    if !path.exists() {
        return Err(InputError::NotFound(path.to_path_buf()));
    }
    fs::read_to_string(path)
        .map_err(|e| InputError::Io(format!("'{}': {}", path.display(), e)))
}
