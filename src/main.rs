//! sbom-provenance: Content-addressed provenance registration for SBOMs
//!
//! Reads `CycloneDX` documents and records their components, build edges and
//! attestation claims as signed provenance statements.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use sbom_provenance::{
    cli,
    config::{
        BehaviorConfig, InputConfig, InspectConfig, OutputConfig, RegisterConfig, SignerConfig,
    },
    pipeline::exit_codes,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build long version string with format support info
const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nSupported input formats:",
        "\n  CycloneDX: 1.5, 1.6 (JSON)",
        "\n\nStatement kinds:",
        "\n  artifact, computation, declaration"
    )
}

#[derive(Parser)]
#[command(name = "sbom-provenance")]
#[command(author = "Binarly.io")]
#[command(version, long_version = build_long_version())]
#[command(about = "Content-addressed provenance registration for SBOMs", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Every statement committed
    1  One or more claims skipped (--strict)
    2  Error occurred

EXAMPLES:
    # Register a document and print the committed statements
    sbom-provenance register bom.cdx.json

    # CI/CD gate: fail when a claim does not match any component
    sbom-provenance register bom.cdx.json --strict

    # Export the statement manifest
    sbom-provenance register bom.cdx.json --manifest statements.json")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `register` subcommand
#[derive(Parser)]
struct RegisterArgs {
    /// Path to the document
    document: Option<PathBuf>,

    /// Fetch the document from a URL instead of a file
    #[arg(long, conflicts_with = "document")]
    url: Option<String>,

    /// Write the statement manifest to this file
    #[arg(short = 'O', long)]
    manifest: Option<PathBuf>,

    /// Name of the signing identity
    #[arg(long, default_value = "Build system")]
    signer: String,

    /// Description recorded for the signing identity
    #[arg(
        long,
        default_value = "The build system identifier used to register integrity statements"
    )]
    signer_description: String,

    /// Exit with code 1 when any claim is skipped
    #[arg(long)]
    strict: bool,

    /// Purge the statement store after the run (and after any manifest export)
    #[arg(long)]
    purge: bool,
}

/// Arguments for the `inspect` subcommand
#[derive(Parser)]
struct InspectArgs {
    /// Path to the document
    document: Option<PathBuf>,

    /// Fetch the document from a URL instead of a file
    #[arg(long, conflicts_with = "document")]
    url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a document's provenance statements
    Register(RegisterArgs),

    /// Inspect a document without committing anything
    Inspect(InspectArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(exit_codes::ERROR);
    }
}

/// Dispatch to command handlers
fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Register(args) => {
            let config = RegisterConfig {
                input: InputConfig {
                    path: args.document,
                    url: args.url,
                },
                signer: SignerConfig {
                    name: args.signer,
                    description: Some(args.signer_description),
                },
                output: OutputConfig {
                    manifest: args.manifest,
                    quiet: cli.quiet,
                },
                behavior: BehaviorConfig {
                    strict: args.strict,
                    purge: args.purge,
                },
            };

            let exit_code = cli::run_register(config)?;
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
            Ok(())
        }

        Commands::Inspect(args) => {
            let config = InspectConfig {
                input: InputConfig {
                    path: args.document,
                    url: args.url,
                },
                quiet: cli.quiet,
            };

            let exit_code = cli::run_inspect(config)?;
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
            Ok(())
        }

        Commands::Completions { shell } => {
            generate(
                shell,
                &mut Cli::command(),
                "sbom-provenance",
                &mut io::stdout(),
            );
            Ok(())
        }
    }
}
