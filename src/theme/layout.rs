//! The root layout file as a small typed document.
//!
//! The layout is parsed line-wise into ordered blocks. Font imports and
//! font-factory declarations are first-class blocks so they can be removed
//! and re-inserted through explicit operations; everything else is carried
//! through verbatim. Applying the same operations twice yields the same text.

use crate::error::GenerateError;
use regex::Regex;
use std::path::PathBuf;

/// Layout location, relative to the project root.
pub const LAYOUT_FILE: &str = "app/layout.tsx";

/// Class applied by the scaffold for the default font family.
pub const FONT_FAMILY_CLASS: &str = "font-sans";
pub const ANTIALIASED_CLASS: &str = "antialiased";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Block {
    TypeImport(String),
    FontImport(String),
    /// `const binding = Factory({ ... });` carrying font configuration.
    FontFactory { binding: String, lines: Vec<String> },
    Line(String),
}

impl Block {
    fn text(&self) -> Option<&str> {
        match self {
            Block::TypeImport(s) | Block::FontImport(s) | Block::Line(s) => Some(s),
            Block::FontFactory { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutDocument {
    blocks: Vec<Block>,
    trailing_newline: bool,
}

impl LayoutDocument {
    pub fn parse(src: &str) -> Result<Self, GenerateError> {
        let factory_start = Regex::new(r"^\s*const\s+(\w+)\s*=\s*\w+\(\{\s*$")?;
        let lines: Vec<&str> = src.lines().collect();

        let mut blocks = Vec::with_capacity(lines.len());
        let mut i = 0;
        while i < lines.len() {
            let line = lines[i];
            let trimmed = line.trim_start();

            if trimmed.starts_with("import type ") {
                blocks.push(Block::TypeImport(line.to_string()));
            } else if trimmed.starts_with("import ") && trimmed.contains("next/font/") {
                blocks.push(Block::FontImport(line.to_string()));
            } else if let Some(caps) = factory_start.captures(line)
                && let Some(len) = lines[i..].iter().position(|l| l.trim() == "});")
            {
                let body = &lines[i..=i + len];
                let is_font = body.iter().any(|l| l.contains("variable:"))
                    && body
                        .iter()
                        .any(|l| l.contains("subsets:") || l.contains("display:"));
                if is_font {
                    blocks.push(Block::FontFactory {
                        binding: caps[1].to_string(),
                        lines: body.iter().map(|l| l.to_string()).collect(),
                    });
                } else {
                    blocks.extend(body.iter().map(|l| Block::Line(l.to_string())));
                }
                i += len + 1;
                continue;
            } else {
                blocks.push(Block::Line(line.to_string()));
            }
            i += 1;
        }

        Ok(Self {
            blocks,
            trailing_newline: src.ends_with('\n'),
        })
    }

    pub fn render(&self) -> String {
        let mut lines: Vec<&str> = Vec::with_capacity(self.blocks.len());
        for block in &self.blocks {
            match block {
                Block::FontFactory { lines: body, .. } => {
                    lines.extend(body.iter().map(String::as_str))
                }
                other => lines.extend(other.text()),
            }
        }
        let mut out = lines.join("\n");
        if self.trailing_newline {
            out.push('\n');
        }
        out
    }

    /// Bindings of the font factories currently declared.
    #[cfg(test)]
    pub fn font_bindings(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                Block::FontFactory { binding, .. } => Some(binding.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn remove_font_imports(&mut self) {
        self.blocks.retain(|b| !matches!(b, Block::FontImport(_)));
    }

    /// Drop every font factory together with one blank line following it.
    pub fn remove_font_factories(&mut self) {
        let mut kept = Vec::with_capacity(self.blocks.len());
        let mut drop_blank = false;
        for block in self.blocks.drain(..) {
            match block {
                Block::FontFactory { .. } => drop_blank = true,
                Block::Line(ref s) if drop_blank && s.trim().is_empty() => drop_blank = false,
                other => {
                    drop_blank = false;
                    kept.push(other);
                }
            }
        }
        self.blocks = kept;
    }

    /// Insert after the last type-only import, or at the top.
    pub fn insert_font_import(&mut self, line: String) {
        let at = self
            .blocks
            .iter()
            .rposition(|b| matches!(b, Block::TypeImport(_)))
            .map_or(0, |i| i + 1);
        self.blocks.insert(at, Block::FontImport(line));
    }

    /// Insert before the metadata export, or before the root layout
    /// function when there is no metadata.
    pub fn insert_font_factory(
        &mut self,
        binding: String,
        lines: Vec<String>,
    ) -> Result<(), GenerateError> {
        let anchor = self
            .position_of(|s| s.trim_start().starts_with("export const metadata"))
            .or_else(|| self.position_of(|s| s.trim_start().starts_with("export default function")))
            .ok_or_else(|| template_error("no metadata export or root layout function"))?;

        self.blocks.insert(anchor, Block::Line(String::new()));
        self.blocks
            .insert(anchor, Block::FontFactory { binding, lines });
        Ok(())
    }

    /// Rewrite the `<body>` class attribute so it reads
    /// `${binding.variable} font-sans <remaining classes> antialiased`.
    pub fn rewrite_root_classes(&mut self, binding: &str) -> Result<(), GenerateError> {
        let class_attr = Regex::new(r#"className=(?:\{`([^`]*)`\}|"([^"]*)")"#)?;
        let font_var = Regex::new(r"^\$\{\w+\.variable\}$")?;

        let body = self
            .position_of(|s| s.contains("<body"))
            .ok_or_else(|| template_error("no <body> element"))?;
        let index = self.blocks[body..]
            .iter()
            .position(|b| b.text().is_some_and(|s| class_attr.is_match(s)))
            .map(|i| body + i)
            .ok_or_else(|| template_error("<body> has no className attribute"))?;

        let Some(Block::Line(line)) = self.blocks.get(index) else {
            return Err(template_error("<body> className is not on a plain line"));
        };
        let Some(caps) = class_attr.captures(line) else {
            return Err(template_error("<body> has no className attribute"));
        };
        let current = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map_or("", |m| m.as_str());

        let mut tokens = vec![format!("${{{}.variable}}", binding), FONT_FAMILY_CLASS.to_string()];
        tokens.extend(
            current
                .split_whitespace()
                .filter(|t| !font_var.is_match(t))
                .filter(|t| *t != FONT_FAMILY_CLASS && *t != ANTIALIASED_CLASS)
                .map(str::to_string),
        );
        tokens.push(ANTIALIASED_CLASS.to_string());

        let replacement = format!("className={{`{}`}}", tokens.join(" "));
        let rewritten = class_attr.replace(line, regex::NoExpand(&replacement)).into_owned();
        self.blocks[index] = Block::Line(rewritten);
        Ok(())
    }

    fn position_of(&self, pred: impl Fn(&str) -> bool) -> Option<usize> {
        self.blocks
            .iter()
            .position(|b| matches!(b, Block::Line(s) if pred(s)))
    }
}

fn template_error(message: &str) -> GenerateError {
    GenerateError::Template {
        path: PathBuf::from(LAYOUT_FILE),
        message: message.to_string(),
    }
}
