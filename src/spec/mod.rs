//! Spec layer: JSON schema checks, repair, and the typed in-memory Spec.
//!
//! This module is intentionally separate from synthesis and packaging.
//! It owns:
//! - the typed Spec (project, architecture, theme, pages, sections)
//! - the canonical slug function
//! - validation of untrusted JSON and conservative repair into a Spec

pub mod model;
pub mod repair;
pub mod slug;
pub mod validate;

pub use model::{Architecture, Page, Project, Section, Spec, Theme};
pub use repair::repair;
pub use slug::{is_url_safe, slugify};
pub use validate::validate;
