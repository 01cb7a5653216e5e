//! Static registries: section components and architecture scaffolds.
//!
//! Both tables are immutable data. Export conventions are recorded here
//! rather than sniffed from the template sources.

use crate::spec::Architecture;

/// How a section template exposes its component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportStyle {
    /// `export default function Hero`
    Default,
    /// `export function FeaturesGrid`
    Named,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Component {
    pub kind: &'static str,
    pub variant: &'static str,
    /// Identifier used in the generated import and markup.
    pub ident: &'static str,
    /// File stem under `components/sections/`.
    pub module: &'static str,
    pub export: ExportStyle,
}

/// Directory holding section templates, relative to the scaffold root.
pub const SECTIONS_DIR: &str = "components/sections";

/// Import alias prefix for [`SECTIONS_DIR`].
pub const SECTIONS_IMPORT: &str = "@/components/sections";

const fn component(
    kind: &'static str,
    variant: &'static str,
    ident: &'static str,
    module: &'static str,
    export: ExportStyle,
) -> Component {
    Component {
        kind,
        variant,
        ident,
        module,
        export,
    }
}

pub const COMPONENTS: &[Component] = &[
    component("navbar", "default", "Navbar", "navbar", ExportStyle::Default),
    component("hero", "default", "Hero", "hero", ExportStyle::Default),
    component("hero", "split", "HeroSplit", "hero-split", ExportStyle::Default),
    component("hero", "centered", "HeroCentered", "hero-centered", ExportStyle::Named),
    component("features", "default", "FeaturesGrid", "features-grid", ExportStyle::Named),
    component("features", "list", "FeaturesList", "features-list", ExportStyle::Named),
    component("pricing", "default", "PricingTable", "pricing-table", ExportStyle::Default),
    component("testimonials", "default", "Testimonials", "testimonials", ExportStyle::Default),
    component("faq", "default", "Faq", "faq", ExportStyle::Named),
    component("cta", "default", "CallToAction", "call-to-action", ExportStyle::Named),
    component("product-grid", "default", "ProductGrid", "product-grid", ExportStyle::Named),
    component("listing-grid", "default", "ListingGrid", "listing-grid", ExportStyle::Named),
    component("footer", "default", "Footer", "footer", ExportStyle::Default),
];

/// Resolve a kind/variant pair to its registered component.
pub fn resolve(kind: &str, variant: &str) -> Option<&'static Component> {
    COMPONENTS
        .iter()
        .find(|c| c.kind == kind && c.variant == variant)
}

/// Every registered pair as `kind/variant`, for error messages.
pub fn valid_pairs() -> Vec<String> {
    COMPONENTS
        .iter()
        .map(|c| format!("{}/{}", c.kind, c.variant))
        .collect()
}

/// Scaffold folder (under the scaffold root) for each architecture.
pub fn scaffold_folder(architecture: Architecture) -> &'static str {
    match architecture {
        Architecture::Landing => "landing",
        Architecture::Ecommerce => "ecommerce",
        Architecture::Marketplace => "marketplace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn pairs_and_identifiers_are_unique() {
        let pairs: BTreeSet<_> = COMPONENTS.iter().map(|c| (c.kind, c.variant)).collect();
        let idents: BTreeSet<_> = COMPONENTS.iter().map(|c| c.ident).collect();
        assert_eq!(pairs.len(), COMPONENTS.len());
        assert_eq!(idents.len(), COMPONENTS.len());
    }

    #[test]
    fn resolves_registered_pairs_only() {
        assert_eq!(resolve("hero", "split").map(|c| c.ident), Some("HeroSplit"));
        assert_eq!(resolve("hero", "default").map(|c| c.export), Some(ExportStyle::Default));
        assert!(resolve("carousel", "default").is_none());
        assert!(resolve("hero", "diagonal").is_none());
    }

    #[test]
    fn valid_pairs_lists_every_component() {
        let pairs = valid_pairs();
        assert_eq!(pairs.len(), COMPONENTS.len());
        assert!(pairs.contains(&"hero/split".to_string()));
    }
}
