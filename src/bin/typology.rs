//! typology command-line front end.
//!
//! # Commands
//!
//! - `assess [FILE|-]` — read an assessment JSON document (stdin by default)
//!   and print the resulting profile as JSON
//! - `catalog` — print the active reference catalog as YAML
//! - `version` — print the crate version
//!
//! # Environment Variables
//!
//! - `TYPOLOGY_CATALOG` — path to a YAML catalog replacing the built-in one
//! - `RUST_LOG` — Tracing filter (default: "info")
//!
//! # Usage
//!
//! ```bash
//! echo '{"foundation": [0,2,1,2,0,1,0,1,1]}' | cargo run --bin typology -- assess
//! ```

use std::io::Read;

use anyhow::{Context, Result};
use typology::{Assessment, ContentCatalog, ProfileEngine};

const USAGE: &str = "usage: typology <assess [FILE|-] | catalog | version>";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("assess") => {
            let engine = ProfileEngine::new(load_catalog()?);
            let input = read_input(args.get(1).map(String::as_str))?;
            let assessment: Assessment =
                serde_json::from_str(&input).context("Failed to parse assessment JSON")?;
            tracing::info!("Assessing input {}", assessment.key());
            let profile = engine.assess(&assessment)?;
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
        Some("catalog") => {
            print!("{}", load_catalog()?.to_yaml()?);
        }
        Some("version") | Some("--version") | Some("-v") => {
            println!("typology {}", typology::VERSION);
        }
        _ => {
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    }
    Ok(())
}

fn load_catalog() -> Result<ContentCatalog> {
    match std::env::var("TYPOLOGY_CATALOG") {
        Ok(path) => ContentCatalog::from_yaml_file(&path)
            .with_context(|| format!("Failed to load catalog from {}", path)),
        Err(_) => {
            tracing::debug!("Using built-in catalog");
            Ok(ContentCatalog::builtin().clone())
        }
    }
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))
        }
    }
}
