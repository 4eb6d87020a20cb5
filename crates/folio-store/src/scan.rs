// SPDX-License-Identifier: Apache-2.0

use crate::StoreError;
use folio_model::{Project, ProjectId, ProjectSource};
use serde::Serialize;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum SkipReason {
    UnreadableFile,
    MalformedJson,
    InvalidId,
    MissingRequiredFields,
}

impl SkipReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnreadableFile => "unreadable_file",
            Self::MalformedJson => "malformed_json",
            Self::InvalidId => "invalid_id",
            Self::MissingRequiredFields => "missing_required_fields",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub file: String,
    pub reason: SkipReason,
    pub detail: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    pub projects: Vec<Project>,
    pub skipped: Vec<SkippedFile>,
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn read_one(path: &Path) -> Result<Project, SkippedFile> {
    let file = file_name_of(path);
    let skip = |reason: SkipReason, detail: String| SkippedFile {
        file: file.clone(),
        reason,
        detail,
    };

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let id = ProjectId::parse(&stem)
        .map_err(|e| skip(SkipReason::InvalidId, e.to_string()))?;
    let raw = std::fs::read_to_string(path)
        .map_err(|e| skip(SkipReason::UnreadableFile, e.to_string()))?;
    let source: ProjectSource = serde_json::from_str(&raw)
        .map_err(|e| skip(SkipReason::MalformedJson, e.to_string()))?;
    Project::from_source(id, source)
        .map_err(|e| skip(SkipReason::MissingRequiredFields, e.to_string()))
}

/// Scans a projects directory, returning valid records and a record of every
/// file that was skipped and why. Non-`.json` entries are ignored outright.
pub fn scan_projects(dir: &Path) -> Result<ScanReport, StoreError> {
    if !dir.exists() {
        warn!(dir = %dir.display(), "projects directory not found; serving empty catalog");
        return Ok(ScanReport::default());
    }
    let entries = std::fs::read_dir(dir).map_err(|e| StoreError::io(dir, e))?;

    let mut report = ScanReport::default();
    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| StoreError::io(dir, e))?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) == Some("json") && path.is_file() {
            paths.push(path);
        }
    }
    // Deterministic base order; display order is the query layer's concern.
    paths.sort();

    for path in paths {
        match read_one(&path) {
            Ok(project) => report.projects.push(project),
            Err(skipped) => {
                warn!(
                    file = %skipped.file,
                    reason = skipped.reason.as_str(),
                    detail = %skipped.detail,
                    "skipping project file"
                );
                report.skipped.push(skipped);
            }
        }
    }
    Ok(report)
}

/// Loads all valid projects, discarding the skip report.
pub fn load_projects(dir: &Path) -> Result<Vec<Project>, StoreError> {
    scan_projects(dir).map(|report| report.projects)
}

/// Loads a single project by id. Returns `Ok(None)` when the file is absent
/// or fails validation; the skip semantics match a full scan.
pub fn load_project(dir: &Path, id: &ProjectId) -> Result<Option<Project>, StoreError> {
    let path = dir.join(format!("{}.json", id.as_str()));
    if !path.is_file() {
        return Ok(None);
    }
    match read_one(&path) {
        Ok(project) => Ok(Some(project)),
        Err(skipped) => {
            warn!(
                file = %skipped.file,
                reason = skipped.reason.as_str(),
                detail = %skipped.detail,
                "skipping project file"
            );
            Ok(None)
        }
    }
}
