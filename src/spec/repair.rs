//! Conservative auto-repair: untyped JSON in, typed [`Spec`] out.
//!
//! Repair only fills the defaults listed below and drops optional fields
//! that are malformed. It never invents a name, a page, a section kind or
//! any content value.
//!
//! - slug: derived from the name when absent or not URL-safe
//! - page id: `page_{i}` (1-based)
//! - page name: title case of the id's `_` segments
//! - page route: `/` for the first page, `/{id}` otherwise
//! - section id: `sec_{pageId}_{j}` (1-based)
//!
//! A generated id never shadows one the input provided: the index moves
//! past any taken id. Provided ids that already collide are unrecoverable.

use crate::error::GenerateError;
use crate::spec::{Architecture, Page, Project, Section, Spec, Theme, is_url_safe, slugify};
use crate::theme::color::parse_hex;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use tracing::debug;

type Result<T> = std::result::Result<T, GenerateError>;

pub fn repair(value: &Value) -> Result<Spec> {
    let root = value
        .as_object()
        .ok_or_else(|| unrecoverable("spec root is not an object"))?;

    let project = repair_project(root)?;

    let pages = match root.get("pages") {
        Some(Value::Array(pages)) if !pages.is_empty() => pages,
        _ => return Err(unrecoverable("spec has no pages; pages cannot be invented")),
    };
    let mut page_ids = provided_ids(pages, "page")?;
    let pages = pages
        .iter()
        .enumerate()
        .map(|(i, page)| repair_page(i, page, &mut page_ids))
        .collect::<Result<Vec<_>>>()?;

    let architecture = match root.get("architecture") {
        None => None,
        Some(raw) => {
            let parsed = raw.as_str().and_then(Architecture::parse);
            if parsed.is_none() {
                debug!(value = %raw, "dropping malformed architecture");
            }
            parsed
        }
    };

    Ok(Spec {
        project,
        architecture,
        theme: root.get("theme").and_then(repair_theme),
        pages,
    })
}

fn repair_project(root: &Map<String, Value>) -> Result<Project> {
    let project = root.get("project").and_then(Value::as_object);

    let name = project
        .and_then(|p| p.get("name"))
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| unrecoverable("project name is missing; a name cannot be invented"))?;

    let slug = match project.and_then(|p| p.get("slug")).and_then(Value::as_str) {
        Some(slug) if is_url_safe(slug) => slug.to_string(),
        provided => {
            let derived = slugify(name);
            if derived.is_empty() {
                return Err(unrecoverable(format!(
                    "project name {:?} yields an empty slug",
                    name
                )));
            }
            debug!(?provided, slug = %derived, "derived slug from project name");
            derived
        }
    };

    Ok(Project {
        name: name.to_string(),
        slug: Some(slug),
    })
}

fn repair_page(index: usize, raw: &Value, taken: &mut BTreeSet<String>) -> Result<Page> {
    let page = raw
        .as_object()
        .ok_or_else(|| unrecoverable(format!("pages[{}] is not an object", index)))?;

    let id = non_empty(page, "id").unwrap_or_else(|| next_free_id("page", index + 1, taken));
    let name = non_empty(page, "name").unwrap_or_else(|| title_case(&id));
    let route = non_empty(page, "route").unwrap_or_else(|| {
        if index == 0 {
            "/".to_string()
        } else {
            format!("/{}", id)
        }
    });

    let sections = match page.get("sections") {
        Some(Value::Array(sections)) => {
            let mut section_ids = provided_ids(sections, &format!("page {:?} section", id))?;
            sections
                .iter()
                .enumerate()
                .map(|(j, section)| repair_section(&id, j, section, &mut section_ids))
                .collect::<Result<Vec<_>>>()?
        }
        _ => Vec::new(),
    };

    Ok(Page {
        id,
        name,
        route,
        sections,
    })
}

fn repair_section(
    page_id: &str,
    index: usize,
    raw: &Value,
    taken: &mut BTreeSet<String>,
) -> Result<Section> {
    let at = format!("page {:?} section {}", page_id, index + 1);
    let section = raw
        .as_object()
        .ok_or_else(|| unrecoverable(format!("{} is not an object", at)))?;

    let kind = non_empty(section, "kind")
        .ok_or_else(|| unrecoverable(format!("{} has no kind; kind cannot be guessed", at)))?;
    let id = non_empty(section, "id")
        .unwrap_or_else(|| next_free_id(&format!("sec_{}", page_id), index + 1, taken));

    let variant = non_empty(section, "variant");
    let content = section.get("content").and_then(Value::as_object).cloned();

    Ok(Section {
        id,
        kind,
        variant,
        content,
    })
}

fn repair_theme(raw: &Value) -> Option<Theme> {
    let theme = raw.as_object()?;

    let primary_color = theme
        .get("primaryColor")
        .and_then(Value::as_str)
        .filter(|hex| parse_hex(hex).is_ok())
        .map(str::to_string);
    let font = theme
        .get("font")
        .and_then(Value::as_str)
        .filter(|f| !f.trim().is_empty())
        .map(str::to_string);

    if primary_color.is_none() && font.is_none() {
        return None;
    }
    Some(Theme {
        primary_color,
        font,
    })
}

/// Ids the input already carries. A repeat cannot be repaired without
/// rewriting a provided value.
fn provided_ids(items: &[Value], what: &str) -> Result<BTreeSet<String>> {
    let mut ids = BTreeSet::new();
    for item in items {
        if let Some(id) = item.as_object().and_then(|obj| non_empty(obj, "id"))
            && !ids.insert(id.clone())
        {
            return Err(unrecoverable(format!("duplicate {} id {:?}", what, id)));
        }
    }
    Ok(ids)
}

/// `{prefix}_{n}` for the first `n >= start` not yet taken; records it.
fn next_free_id(prefix: &str, start: usize, taken: &mut BTreeSet<String>) -> String {
    let mut n = start;
    loop {
        let id = format!("{}_{}", prefix, n);
        if taken.insert(id.clone()) {
            return id;
        }
        n += 1;
    }
}

fn non_empty(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

/// "about_us" => "About Us"
fn title_case(id: &str) -> String {
    id.split('_')
        .filter(|seg| !seg.is_empty())
        .map(|seg| {
            let mut chars = seg.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn unrecoverable(msg: impl Into<String>) -> GenerateError {
    GenerateError::UnrecoverableSpec(msg.into())
}
