//! Command-line interface for xsd-validator

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
use xsd_validator::documents::Document;
#[cfg(feature = "cli")]
use xsd_validator::loaders::{Loader, Location};
#[cfg(feature = "cli")]
use xsd_validator::registry::Registry;
#[cfg(feature = "cli")]
use xsd_validator::{extract, resolver};

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "xsd-validator")]
#[command(author, version, about = "Schema resolution for SII, UBL and CII/Factur-X documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve the schema that applies to an XML document
    Resolve {
        /// Path to the XML document
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Schemas root to build the registry from
        #[arg(short, long, value_name = "DIR", conflicts_with = "registry")]
        schemas: Option<PathBuf>,

        /// Previously saved registry table (JSON)
        #[arg(short, long, value_name = "TABLE")]
        registry: Option<PathBuf>,
    },

    /// Build the schema registry and print or save it
    Registry {
        /// Schemas root to scan
        #[arg(value_name = "DIR")]
        schemas: PathBuf,

        /// Write the registry as a JSON table instead of printing it
        #[arg(short, long, value_name = "TABLE")]
        output: Option<PathBuf>,
    },
}

#[cfg(feature = "cli")]
fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Resolve {
            file,
            schemas,
            registry,
        } => cmd_resolve(file, schemas, registry),
        Commands::Registry { schemas, output } => cmd_registry(schemas, output),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(feature = "cli")]
fn cmd_resolve(
    file: PathBuf,
    schemas: Option<PathBuf>,
    registry: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let registry = match (registry, schemas) {
        (Some(table), _) => Registry::load(table)?,
        (None, Some(root)) => Registry::build(root)?,
        (None, None) => return Err("pass --schemas DIR or --registry TABLE".into()),
    };

    let loader = Loader::new();
    let xml = loader.load_document(&Location::from(file.as_path()))?;
    let doc = Document::parse(&xml)?;

    let extracted = extract::extract(&doc)?;
    let path = resolver::resolve(&registry, &extracted.namespace, extracted.version.as_deref())?;
    println!("{}", path.display());

    Ok(())
}

#[cfg(feature = "cli")]
fn cmd_registry(
    schemas: PathBuf,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let registry = Registry::build(&schemas)?;

    match output {
        Some(table) => {
            registry.save(&table)?;
            println!("{} entries -> {}", registry.len(), table.display());
        }
        None => {
            for (key, resource) in registry.entries() {
                println!("{} -> {}", key, resource.display());
            }
        }
    }

    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Rebuild with --features cli");
    std::process::exit(1);
}
