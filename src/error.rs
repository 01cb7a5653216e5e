//! Error taxonomy for the generation pipeline.
//!
//! Validation problems are not errors: they are reported through
//! [`crate::spec::validate::ValidationReport`]. Everything here aborts a run.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// Repair would have to invent intent (name, pages, section kind).
    #[error("unrecoverable spec: {0}")]
    UnrecoverableSpec(String),

    /// A section's kind/variant pair has no registered component.
    #[error("no component registered for kind `{kind}` variant `{variant}` (valid: {valid})")]
    UnknownComponent {
        kind: String,
        variant: String,
        valid: String,
    },

    #[error("section `{section}`: `{key}` is not a valid attribute name")]
    InvalidAttribute { section: String, key: String },

    #[error("invalid color `{0}`: expected #rgb or #rrggbb")]
    InvalidColor(String),

    #[error("invalid font name `{0}`")]
    InvalidFont(String),

    #[error("slug `{0}` is not URL-safe")]
    InvalidSlug(String),

    /// A trusted scaffold file lacks the anchor a rewrite needs.
    #[error("{}: {message}", path.display())]
    Template { path: PathBuf, message: String },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: {source}", path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("archive task failed: {0}")]
    ArchiveTask(String),

    #[error("a generation for slug `{0}` is already in progress")]
    SlugBusy(String),

    #[error(transparent)]
    Pattern(#[from] regex::Error),
}

impl GenerateError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Short user-facing category shown ahead of the detail string.
    pub fn category(&self) -> &'static str {
        match self {
            Self::UnrecoverableSpec(_)
            | Self::InvalidAttribute { .. }
            | Self::InvalidColor(_)
            | Self::InvalidFont(_)
            | Self::InvalidSlug(_) => "Invalid spec",
            Self::UnknownComponent { .. } => "Unknown component",
            Self::Template { .. } | Self::Pattern(_) => "Scaffold error",
            Self::Io { .. } => "File system error",
            Self::Archive { .. } | Self::ArchiveTask(_) => "Archive error",
            Self::SlugBusy(_) => "Generation in progress",
        }
    }

    /// HTTP-style status: 4xx for bad input, 5xx for generation failures.
    pub fn status(&self) -> u16 {
        match self {
            Self::UnrecoverableSpec(_)
            | Self::UnknownComponent { .. }
            | Self::InvalidAttribute { .. }
            | Self::InvalidColor(_)
            | Self::InvalidFont(_)
            | Self::InvalidSlug(_) => 422,
            Self::SlugBusy(_) => 409,
            Self::Template { .. }
            | Self::Pattern(_)
            | Self::Io { .. }
            | Self::Archive { .. }
            | Self::ArchiveTask(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_separates_bad_input_from_generation_failures() {
        assert_eq!(GenerateError::InvalidColor("blue".to_string()).status(), 422);
        assert_eq!(GenerateError::SlugBusy("demo".to_string()).status(), 409);
        let io = GenerateError::io("x", std::io::Error::other("disk full"));
        assert_eq!(io.status(), 500);
        assert_eq!(io.category(), "File system error");
    }
}
