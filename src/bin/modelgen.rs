//! Model Generation CLI
//!
//! Loads a type catalog, derives the validation models, and writes the
//! name-to-model mapping as JSON for the deployment step to register with
//! the gateway.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use gateway_models::{
    GeneratorConfig, ModelRegistry, OrderingStrategy, OutputFormat, TypeCatalog,
};

#[derive(Parser)]
#[command(name = "modelgen")]
#[command(about = "Generate gateway validation models from a type catalog")]
struct Cli {
    /// Path to the catalog of type declaration files
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// REST API identifier used in cross-reference URIs
    #[arg(short, long)]
    rest_api_id: Option<String>,

    /// Path to a config file (modelgen.toml)
    #[arg(long)]
    config: Option<String>,

    /// Write the JSON mapping here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit compact JSON instead of pretty
    #[arg(long)]
    compact: bool,

    /// Use dependencies-first topological ordering instead of the
    /// reference-count heuristic (changes pointer-vs-inline output)
    #[arg(long)]
    topological: bool,

    /// Cache repeated inlines of the same unregistered type
    #[arg(long)]
    memoize_inlines: bool,

    /// Dry run - generate and summarize without writing output
    #[arg(long)]
    dry_run: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = GeneratorConfig::load_from(cli.config.as_deref())
        .context("failed to load configuration")?;

    // CLI flags override file and environment configuration
    if let Some(catalog) = cli.catalog {
        config.catalog.path = catalog;
    }
    if let Some(rest_api_id) = cli.rest_api_id {
        config.gateway.rest_api_id = rest_api_id;
    }
    if cli.topological {
        config.generator.ordering = OrderingStrategy::Topological;
    }
    if cli.memoize_inlines {
        config.generator.memoize_inlines = true;
    }
    if cli.compact {
        config.output.format = OutputFormat::Compact;
    }

    if config.gateway.rest_api_id.is_empty() {
        anyhow::bail!("no rest_api_id given (use --rest-api-id or [gateway] in modelgen.toml)");
    }

    let catalog_path = config.catalog_path();
    println!("📦 Model Generation");
    println!("  Catalog: {}", catalog_path.display());
    println!("  API:     {}", config.gateway.rest_api_id);
    println!();

    let catalog = TypeCatalog::load(&catalog_path)
        .with_context(|| format!("failed to load catalog at {}", catalog_path.display()))?;
    println!("📂 Loaded {} type declarations", catalog.len());
    println!("   Bundle hash: {}", catalog.bundle_hash());

    let registry = ModelRegistry::generate(&catalog, &config.options())?;

    println!();
    println!("📊 Generated {} models:", registry.len());
    for name in registry.registration_order() {
        if let Some(entry) = registry.get(name) {
            println!(
                "  {} -> {} ({} properties, {} required)",
                name,
                entry.model_name,
                entry.schema.properties.len(),
                entry.schema.required.len()
            );
        }
    }
    println!("  Output fingerprint: {}", registry.fingerprint()?);

    if cli.dry_run {
        println!();
        println!("🔍 Dry run - not writing output");
        return Ok(());
    }

    let models = registry.into_models();
    let rendered = match config.output.format {
        OutputFormat::Pretty => serde_json::to_string_pretty(&models)?,
        OutputFormat::Compact => serde_json::to_string(&models)?,
    };

    match cli.output {
        Some(path) => {
            fs::write(&path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!();
            println!("✅ Wrote {}", path.display());
        }
        None => {
            println!();
            println!("{rendered}");
        }
    }

    Ok(())
}
