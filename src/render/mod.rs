//! Page synthesis: Spec sections => page source text.

pub mod attrs;
pub mod page;

pub use page::{resolve_sections, write_page};
