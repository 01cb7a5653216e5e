//! Scaffold fixtures shared by unit tests.

use crate::registry::{COMPONENTS, ExportStyle, SECTIONS_DIR};
use std::fs;
use std::path::Path;

pub const LAYOUT_TSX: &str = r#"import type { Metadata } from "next";
import { Geist, Geist_Mono } from "next/font/google";
import "./globals.css";

const geistSans = Geist({
  variable: "--font-geist-sans",
  subsets: ["latin"],
});

const geistMono = Geist_Mono({
  variable: "--font-geist-mono",
  subsets: ["latin"],
});

export const metadata: Metadata = {
  title: "Create Next App",
  description: "Generated by create next app",
};

export default function RootLayout({
  children,
}: Readonly<{
  children: React.ReactNode;
}>) {
  return (
    <html lang="en">
      <body
        className={`${geistSans.variable} ${geistMono.variable} antialiased`}
      >
        {children}
      </body>
    </html>
  );
}
"#;

pub const GLOBALS_CSS: &str = r#"@import "tailwindcss";

@custom-variant dark (&:is(.dark *));

@theme inline {
  --color-background: var(--background);
  --color-primary: var(--primary);
  --color-primary-foreground: var(--primary-foreground);
  --font-sans: var(--font-geist-sans);
  --font-mono: var(--font-geist-mono);
}

:root {
  --radius: 0.625rem;
  --background: oklch(1 0 0);
  --foreground: oklch(0.145 0 0);
  --primary: oklch(0.205 0 0);
  --primary-foreground: oklch(0.985 0 0);
  --sidebar-primary: oklch(0.205 0 0);
}

.dark {
  --background: oklch(0.145 0 0);
  --foreground: oklch(0.985 0 0);
  --primary: oklch(0.922 0 0);
  --primary-foreground: oklch(0.205 0 0);
  --sidebar-primary: oklch(0.488 0.243 264.376);
}
"#;

pub const PAGE_TSX: &str = "export default function Page() {\n  return <main />;\n}\n";

/// Write a minimal project scaffold rooted at `root`, including entries
/// the copier and packager must skip.
pub fn write_scaffold(root: &Path) {
    let files: &[(&str, &str)] = &[
        ("package.json", "{ \"name\": \"scaffold\" }\n"),
        ("package-lock.json", "{}\n"),
        ("app/page.tsx", PAGE_TSX),
        ("app/layout.tsx", LAYOUT_TSX),
        ("app/globals.css", GLOBALS_CSS),
        ("public/logo.svg", "<svg/>\n"),
        (".git/HEAD", "ref: refs/heads/main\n"),
        ("node_modules/react/index.js", "module.exports = {};\n"),
        (".next/cache/x", "cache\n"),
    ];
    for (rel, text) in files {
        write(&root.join(rel), text);
    }

    for component in COMPONENTS {
        let source = match component.export {
            ExportStyle::Default => format!(
                "export default function {}(props: any) {{\n  return <section />;\n}}\n",
                component.ident
            ),
            ExportStyle::Named => format!(
                "export function {}(props: any) {{\n  return <section />;\n}}\n",
                component.ident
            ),
        };
        write(
            &root.join(SECTIONS_DIR).join(format!("{}.tsx", component.module)),
            &source,
        );
    }
}

fn write(path: &Path, text: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, text).unwrap();
}
