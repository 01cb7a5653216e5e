//! Typed Spec, the shape the rest of the pipeline consumes.
//!
//! JSON shape:
//! {
//!   "project": { "name": "Demo", "slug": "demo" },
//!   "architecture": "landing",                 // optional
//!   "theme": { "primaryColor": "#2563eb", "font": "Inter" },  // optional
//!   "pages": [
//!     {
//!       "id": "home", "name": "Home", "route": "/",
//!       "sections": [
//!         { "id": "sec_home_1", "kind": "hero", "variant": "split",
//!           "content": { "title": "T" } }
//!       ]
//!     }
//!   ]
//! }

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spec {
    pub project: Project,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub architecture: Option<Architecture>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,

    pub pages: Vec<Page>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Architecture {
    #[default]
    Landing,
    Ecommerce,
    Marketplace,
}

impl Architecture {
    pub const ALL: [Architecture; 3] = [Self::Landing, Self::Ecommerce, Self::Marketplace];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Landing => "landing",
            Self::Ecommerce => "ecommerce",
            Self::Marketplace => "marketplace",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == s)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    pub name: String,
    pub route: String,

    #[serde(default)]
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,

    /// Key order is preserved from the input document. Absent and `{}`
    /// are kept distinct.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Map<String, Value>>,
}

impl Section {
    pub const DEFAULT_VARIANT: &'static str = "default";

    pub fn variant_or_default(&self) -> &str {
        self.variant
            .as_deref()
            .filter(|v| !v.is_empty())
            .unwrap_or(Self::DEFAULT_VARIANT)
    }
}
