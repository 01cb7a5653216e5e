//! Project orchestration: one generation request end to end.
//!
//! ```text
//! Spec ──► preflight ──► copy_tree() ──► write_page() ──► apply_theme() ──► pack()
//!              │              │               │                 │             │
//!              ▼              ▼               ▼                 ▼             ▼
//!          slug lock     {out}/{slug}/    app/page.tsx    layout + css   {out}/{slug}.zip
//! ```

pub mod archive;
pub mod locks;
pub mod scaffold;

use crate::error::GenerateError;
use crate::registry::scaffold_folder;
use crate::render::{resolve_sections, write_page};
use crate::spec::{Spec, is_url_safe, slugify};
use crate::theme::{FontSpec, Palette, apply_theme};
use std::fs;
use std::path::PathBuf;
use tracing::info;

pub use archive::pack;
pub use locks::SlugLocks;
pub use scaffold::copy_tree;

#[derive(Debug, Clone)]
pub struct Config {
    /// Holds one scaffold folder per architecture.
    pub scaffold_root: PathBuf,
    /// Generated trees and archives land here.
    pub output_root: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedProject {
    pub slug: String,
    pub tree: PathBuf,
    pub archive: PathBuf,
    pub files: u64,
}

pub struct Orchestrator {
    config: Config,
    locks: SlugLocks,
}

impl Orchestrator {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            locks: SlugLocks::default(),
        }
    }

    /// Generate the tree and archive for `spec`.
    ///
    /// Any failure aborts the run. Output written before the failure is
    /// left in place and must be treated as undefined.
    pub async fn generate(&self, mut spec: Spec) -> Result<GeneratedProject, GenerateError> {
        let slug = resolve_slug(&spec)?;
        spec.project.slug = Some(slug.clone());

        // Everything that can be rejected without touching disk is checked
        // before the scaffold is copied.
        preflight(&spec)?;

        let _guard = self.locks.acquire(&slug)?;

        let architecture = spec.architecture.unwrap_or_default();
        let source = self
            .config
            .scaffold_root
            .join(scaffold_folder(architecture));
        let tree = self.config.output_root.join(&slug);
        let archive = self.config.output_root.join(format!("{}.zip", slug));

        info!(
            %slug,
            architecture = architecture.as_str(),
            scaffold = %source.display(),
            "generating project"
        );

        fs::create_dir_all(&self.config.output_root)
            .map_err(|e| GenerateError::io(&self.config.output_root, e))?;
        let copied = copy_tree(&source, &tree)?;
        info!(files = copied, tree = %tree.display(), "copied scaffold");

        let page = write_page(&spec, &tree)?;
        info!(page = %page.display(), "wrote page");

        if let Some(theme) = &spec.theme {
            apply_theme(&tree, theme)?;
        }

        let files = pack(tree.clone(), archive.clone()).await?;
        info!(files, archive = %archive.display(), "packed archive");

        Ok(GeneratedProject {
            slug,
            tree,
            archive,
            files,
        })
    }
}

/// The project's slug: the provided one if URL-safe, otherwise derived
/// from the name with the same [`slugify`] repair uses.
fn resolve_slug(spec: &Spec) -> Result<String, GenerateError> {
    let name = spec.project.name.trim();
    if name.is_empty() {
        return Err(GenerateError::UnrecoverableSpec(
            "project name is missing".to_string(),
        ));
    }

    match spec.project.slug.as_deref() {
        Some(slug) if !slug.is_empty() => {
            if is_url_safe(slug) {
                Ok(slug.to_string())
            } else {
                Err(GenerateError::InvalidSlug(slug.to_string()))
            }
        }
        _ => {
            let slug = slugify(name);
            if slug.is_empty() {
                return Err(GenerateError::UnrecoverableSpec(format!(
                    "project name {:?} yields an empty slug",
                    name
                )));
            }
            Ok(slug)
        }
    }
}

fn preflight(spec: &Spec) -> Result<(), GenerateError> {
    let page = spec.pages.first().ok_or_else(|| {
        GenerateError::UnrecoverableSpec("spec has no pages".to_string())
    })?;
    resolve_sections(page)?;

    if let Some(theme) = &spec.theme {
        if let Some(hex) = &theme.primary_color {
            Palette::from_hex(hex)?;
        }
        if let Some(font) = &theme.font {
            FontSpec::new(font)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::page::PAGE_FILE;
    use crate::spec::repair;
    use crate::testutil::{LAYOUT_TSX, write_scaffold};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::io::Read;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Orchestrator) {
        let dir = tempfile::tempdir().unwrap();
        write_scaffold(&dir.path().join("scaffold/landing"));
        write_scaffold(&dir.path().join("scaffold/ecommerce"));
        let orchestrator = Orchestrator::new(Config {
            scaffold_root: dir.path().join("scaffold"),
            output_root: dir.path().join("out"),
        });
        (dir, orchestrator)
    }

    fn demo_spec() -> Spec {
        repair(&json!({
            "project": { "name": "Demo" },
            "pages": [{
                "route": "/",
                "sections": [{
                    "kind": "hero",
                    "variant": "split",
                    "content": { "title": "T", "subtitle": "S" }
                }]
            }]
        }))
        .unwrap()
    }

    fn read_entry(archive: &std::path::Path, name: &str) -> String {
        let mut zip = zip::ZipArchive::new(fs::File::open(archive).unwrap()).unwrap();
        let mut text = String::new();
        zip.by_name(name).unwrap().read_to_string(&mut text).unwrap();
        text
    }

    #[tokio::test]
    async fn end_to_end_demo() {
        let (dir, orchestrator) = setup();
        let out = orchestrator.generate(demo_spec()).await.unwrap();

        assert_eq!(out.slug, "demo");
        assert_eq!(out.tree, dir.path().join("out/demo"));
        assert_eq!(out.archive, dir.path().join("out/demo.zip"));

        let page = fs::read_to_string(out.tree.join(PAGE_FILE)).unwrap();
        assert!(page.contains("import HeroSplit from \"@/components/sections/hero-split\";"));
        assert!(page.contains("<HeroSplit title=\"T\" subtitle=\"S\" />"));

        assert_eq!(read_entry(&out.archive, PAGE_FILE), page);
        assert!(!out.tree.join("node_modules").exists());

        // No theme: layout is an untouched copy.
        assert_eq!(
            fs::read_to_string(out.tree.join("app/layout.tsx")).unwrap(),
            LAYOUT_TSX
        );
    }

    #[tokio::test]
    async fn slug_is_derived_when_the_spec_skipped_repair() {
        let (dir, orchestrator) = setup();
        let mut spec = demo_spec();
        spec.project.name = "My Cool Site!".to_string();
        spec.project.slug = None;

        let out = orchestrator.generate(spec).await.unwrap();
        assert_eq!(out.slug, "my-cool-site");
        assert!(dir.path().join("out/my-cool-site.zip").is_file());
    }

    #[tokio::test]
    async fn two_runs_are_byte_identical() {
        let (dir, orchestrator) = setup();
        let mut spec = demo_spec();
        spec.theme = Some(crate::spec::Theme {
            primary_color: Some("#2563eb".to_string()),
            font: Some("Playfair Display".to_string()),
        });

        let first = orchestrator.generate(spec.clone()).await.unwrap();
        let snapshot: Vec<Vec<u8>> = ["app/page.tsx", "app/layout.tsx", "app/globals.css"]
            .iter()
            .map(|f| fs::read(first.tree.join(f)).unwrap())
            .collect();
        let archive = fs::read(&first.archive).unwrap();

        let second = orchestrator.generate(spec).await.unwrap();
        for (f, before) in ["app/page.tsx", "app/layout.tsx", "app/globals.css"]
            .iter()
            .zip(&snapshot)
        {
            assert_eq!(&fs::read(second.tree.join(f)).unwrap(), before, "{f}");
        }
        assert_eq!(fs::read(&second.archive).unwrap(), archive);

        let layout = fs::read_to_string(dir.path().join("out/demo/app/layout.tsx")).unwrap();
        assert!(layout.contains("Playfair_Display"));
        let css = fs::read_to_string(dir.path().join("out/demo/app/globals.css")).unwrap();
        assert!(css.contains("--font-sans: var(--font-playfair-display);"));
    }

    #[tokio::test]
    async fn unknown_component_writes_nothing() {
        let (dir, orchestrator) = setup();
        let mut spec = demo_spec();
        spec.pages[0].sections[0].kind = "carousel".to_string();

        let err = orchestrator.generate(spec).await.unwrap_err();
        assert!(matches!(err, GenerateError::UnknownComponent { .. }));
        assert!(!dir.path().join("out/demo").exists());
        assert!(!dir.path().join("out/demo.zip").exists());
    }

    #[tokio::test]
    async fn architecture_selects_the_scaffold_folder() {
        let (dir, orchestrator) = setup();
        fs::write(dir.path().join("scaffold/ecommerce/SHOP.md"), "shop\n").unwrap();
        let mut spec = demo_spec();
        spec.architecture = Some(crate::spec::Architecture::Ecommerce);

        let out = orchestrator.generate(spec).await.unwrap();
        assert!(out.tree.join("SHOP.md").is_file());

        spec = demo_spec();
        spec.architecture = Some(crate::spec::Architecture::Marketplace);
        spec.project.slug = Some("market".to_string());
        let err = orchestrator.generate(spec).await.unwrap_err();
        assert!(matches!(err, GenerateError::Io { .. }), "{err}");
    }

    #[tokio::test]
    async fn busy_slug_is_rejected() {
        let (_dir, orchestrator) = setup();
        let _held = orchestrator.locks.acquire("demo").unwrap();
        let err = orchestrator.generate(demo_spec()).await.unwrap_err();
        assert!(matches!(err, GenerateError::SlugBusy(ref s) if s == "demo"));
    }

    #[tokio::test]
    async fn lock_is_released_after_a_failed_run() {
        let (_dir, orchestrator) = setup();
        let mut spec = demo_spec();
        spec.architecture = Some(crate::spec::Architecture::Marketplace);
        assert!(orchestrator.generate(spec).await.is_err());
        assert!(!orchestrator.locks.is_held("demo"));
    }

    #[tokio::test]
    async fn rejects_unsafe_slugs_and_bad_themes() {
        let (_dir, orchestrator) = setup();

        let mut spec = demo_spec();
        spec.project.slug = Some("../escape".to_string());
        assert!(matches!(
            orchestrator.generate(spec).await,
            Err(GenerateError::InvalidSlug(_))
        ));

        let mut spec = demo_spec();
        spec.theme = Some(crate::spec::Theme {
            primary_color: Some("nope".to_string()),
            font: None,
        });
        assert!(matches!(
            orchestrator.generate(spec).await,
            Err(GenerateError::InvalidColor(_))
        ));

        let mut spec = demo_spec();
        spec.project.name = " ".to_string();
        assert!(matches!(
            orchestrator.generate(spec).await,
            Err(GenerateError::UnrecoverableSpec(_))
        ));
    }
}
