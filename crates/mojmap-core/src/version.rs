//! Shape of the upstream version catalog and per-version metadata.
//!
//! These types only describe data a caller has already retrieved; nothing here performs network
//! or disk access.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::{Error, Result};

/// Oldest version for which mapping files are published.
pub const MIN_MAPPINGS_VERSION: &str = "1.14.4";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionType {
    Release,
    Snapshot,
    OldBeta,
    OldAlpha,
}

impl VersionType {
    pub fn as_str(self) -> &'static str {
        match self {
            VersionType::Release => "release",
            VersionType::Snapshot => "snapshot",
            VersionType::OldBeta => "old_beta",
            VersionType::OldAlpha => "old_alpha",
        }
    }
}

impl fmt::Display for VersionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionInfo {
    pub version: String,
    #[serde(rename = "type")]
    pub kind: VersionType,
    /// Location of the per-version metadata document ([`VersionPackage`]).
    pub url: String,
    #[serde(with = "time::serde::rfc3339")]
    pub release_time: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatestVersions {
    pub release: String,
    pub snapshot: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionCatalog {
    pub latest: LatestVersions,
    pub versions: IndexMap<String, VersionInfo>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LauncherManifest {
    latest: LatestVersions,
    versions: Vec<LauncherVersion>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LauncherVersion {
    id: String,
    #[serde(rename = "type")]
    kind: VersionType,
    url: String,
    #[serde(with = "time::serde::rfc3339")]
    release_time: OffsetDateTime,
}

impl VersionCatalog {
    /// Builds a catalog from the launcher's version manifest, keyed by version id in manifest
    /// order.
    pub fn from_launcher_manifest(json: &str) -> Result<Self> {
        let manifest: LauncherManifest = serde_json::from_str(json)?;
        let versions = manifest
            .versions
            .into_iter()
            .map(|v| {
                let info = VersionInfo {
                    version: v.id.clone(),
                    kind: v.kind,
                    url: v.url,
                    release_time: v.release_time,
                };
                (v.id, info)
            })
            .collect();
        Ok(Self {
            latest: manifest.latest,
            versions,
        })
    }

    pub fn get(&self, id: &str) -> Option<&VersionInfo> {
        self.versions.get(id)
    }

    pub fn require(&self, id: &str) -> Result<&VersionInfo> {
        self.get(id)
            .ok_or_else(|| Error::UnknownVersion(id.to_string()))
    }

    /// Version ids in catalog order. Snapshots are skipped unless `include_snapshots` is set;
    /// old betas and alphas are always listed.
    pub fn version_ids(&self, include_snapshots: bool) -> Vec<&str> {
        self.versions
            .values()
            .filter(|v| include_snapshots || v.kind != VersionType::Snapshot)
            .map(|v| v.version.as_str())
            .collect()
    }

    /// Whether mapping files can exist for `id`.
    ///
    /// Dotted release ids are compared numerically against [`MIN_MAPPINGS_VERSION`]. Other ids
    /// (snapshots, pre-releases) are compared by release instant against the `1.14.4` entry; when
    /// the catalog does not contain that entry they are assumed to have mappings.
    pub fn has_mappings(&self, id: &str) -> bool {
        let Some(info) = self.get(id) else {
            return false;
        };
        if let Some(ordering) = compare_release_ids(id, MIN_MAPPINGS_VERSION) {
            return ordering != Ordering::Less;
        }
        match self.get(MIN_MAPPINGS_VERSION) {
            Some(min) => info.release_time >= min.release_time,
            None => true,
        }
    }
}

/// Compares two purely numeric dotted ids (`1.14.4`, `1.20`). Returns `None` if either is not one.
fn compare_release_ids(a: &str, b: &str) -> Option<Ordering> {
    fn parts(id: &str) -> Option<Vec<u32>> {
        id.split('.').map(|part| part.parse().ok()).collect()
    }

    let (mut a, mut b) = (parts(a)?, parts(b)?);
    let len = a.len().max(b.len());
    a.resize(len, 0);
    b.resize(len, 0);
    Some(a.cmp(&b))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Client,
    #[default]
    Server,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Client => "client",
            Side::Server => "server",
        }
    }

    /// Key of this side's mapping file in [`VersionPackage::downloads`].
    pub fn mappings_key(self) -> &'static str {
        match self {
            Side::Client => "client_mappings",
            Side::Server => "server_mappings",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "client" => Ok(Side::Client),
            "server" => Ok(Side::Server),
            other => Err(format!("unknown side {other:?} (expected `client` or `server`)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Download {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

/// Per-version metadata document. Only the parts needed to locate mapping files are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionPackage {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub downloads: IndexMap<String, Download>,
}

impl VersionPackage {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// URL of the mapping file for `side`, or `None` when this version publishes none.
    pub fn mappings_url(&self, side: Side) -> Option<&str> {
        self.downloads
            .get(side.mappings_key())
            .map(|download| download.url.as_str())
    }

    pub fn require_mappings_url(&self, side: Side) -> Result<&str> {
        self.mappings_url(side).ok_or_else(|| Error::MissingMappings {
            version: self.id.clone().unwrap_or_else(|| "<unknown>".to_string()),
            side,
        })
    }
}
