use anyhow::{Context, anyhow, bail};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

mod envelope;
mod error;
mod project;
mod registry;
mod render;
mod spec;
mod theme;

#[cfg(test)]
mod testutil;

use envelope::{ArchiveEnvelope, ErrorEnvelope};
use error::GenerateError;
use project::{Config, Orchestrator};

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "sitegen")]
#[command(about = "Generate a website project from a JSON spec", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a spec and list every violation.
    Validate {
        /// Spec file, or `-` for stdin.
        #[arg(long)]
        spec: String,
    },

    /// Repair a spec and print the result as JSON.
    Repair {
        #[arg(long)]
        spec: String,
    },

    /// Validate, repair, and generate the project tree and archive.
    Generate {
        #[arg(long)]
        spec: String,

        /// Directory holding one scaffold folder per architecture.
        #[arg(long, env = "SITEGEN_SCAFFOLD", default_value = "scaffold")]
        scaffold: PathBuf,

        /// Output root for `{slug}/` and `{slug}.zip`.
        #[arg(short = 'o', long, env = "SITEGEN_OUT", default_value = "out")]
        out: PathBuf,

        /// Fail on any validation violation instead of repairing.
        #[arg(long)]
        strict: bool,

        /// Print a JSON envelope (base64 archive or error) on stdout.
        #[arg(long)]
        envelope: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    install_tracing();
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Validate { spec } => {
            let value = read_spec(&spec)?;
            let report = spec::validate(&value);
            if !report.valid {
                for e in &report.errors {
                    println!("{}", e);
                }
                bail!("spec has {} violation(s)", report.errors.len());
            }
            println!("spec is valid");
        }

        Commands::Repair { spec } => {
            let value = read_spec(&spec)?;
            let repaired = spec::repair(&value).map_err(describe)?;
            println!("{}", serde_json::to_string_pretty(&repaired)?);
        }

        Commands::Generate {
            spec,
            scaffold,
            out,
            strict,
            envelope,
        } => {
            let value = read_spec(&spec)?;

            // 1) Validate; violations decide whether repair is attempted.
            let report = spec::validate(&value);
            for e in &report.errors {
                warn!(violation = %e, "spec violation");
            }
            if !report.valid && strict {
                if envelope {
                    print_json(&ErrorEnvelope::invalid_spec(&report.errors))?;
                }
                bail!("spec has {} violation(s)", report.errors.len());
            }

            // 2) Repair + generate.
            let orchestrator = Orchestrator::new(Config {
                scaffold_root: scaffold,
                output_root: out,
            });
            let result = match spec::repair(&value) {
                Ok(spec) => orchestrator.generate(spec).await,
                Err(e) => Err(e),
            };

            // 3) Report.
            match result {
                Ok(project) if envelope => {
                    let env = ArchiveEnvelope::from_project(&project).map_err(describe)?;
                    print_json(&env)?;
                }
                Ok(project) => {
                    println!("Wrote {}", project.tree.display());
                    println!("Wrote {}", project.archive.display());
                }
                Err(e) => {
                    error!(status = e.status(), category = e.category(), "generation failed");
                    if envelope {
                        print_json(&ErrorEnvelope::from_error(&e))?;
                    }
                    return Err(describe(e));
                }
            }
        }
    }

    Ok(())
}

fn install_tracing() {
    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Ok(directive) = "sitegen=info".parse() {
        filter = filter.add_directive(directive);
    }
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn read_spec(path: &str) -> Result<serde_json::Value> {
    let text = if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("read spec from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path).with_context(|| format!("read spec file {}", path))?
    };
    serde_json::from_str(&text).with_context(|| format!("parse spec {} as JSON", path))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

/// "category: details", the form failures are shown to users in.
fn describe(err: GenerateError) -> anyhow::Error {
    anyhow!("{}: {}", err.category(), err)
}
