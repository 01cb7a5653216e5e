//! JSON envelopes for callers that want the archive inline.

use crate::error::GenerateError;
use crate::project::GeneratedProject;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;
use std::fs;

#[derive(Debug, Clone, Serialize)]
pub struct ArchiveEnvelope {
    /// Base64 of the zip bytes.
    pub archive: String,
    pub filename: String,
    /// Where a preview of the generated tree is served.
    pub preview: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorEnvelope {
    pub error: String,
    pub details: String,
}

impl ArchiveEnvelope {
    pub fn from_project(project: &GeneratedProject) -> Result<Self, GenerateError> {
        let bytes = fs::read(&project.archive).map_err(|e| GenerateError::io(&project.archive, e))?;
        Ok(Self {
            archive: STANDARD.encode(bytes),
            filename: format!("{}.zip", project.slug),
            preview: format!("/preview/{}", project.slug),
        })
    }
}

impl ErrorEnvelope {
    pub fn from_error(err: &GenerateError) -> Self {
        Self {
            error: err.category().to_string(),
            details: err.to_string(),
        }
    }

    /// Spec that failed validation and was not repaired.
    pub fn invalid_spec(errors: &[String]) -> Self {
        Self {
            error: "Invalid spec".to_string(),
            details: errors.join("; "),
        }
    }
}
