// Secret Defines - inject secret-store credentials into firmware builds
//
// This is the main entry point for the application. Anything printed to
// stdout by `inject` and `lookup` is consumed by the host build, so status
// output and logs go to stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use secret_defines::config::{default_locations, Config};
use secret_defines::injector::{inject, lookup_secret};
use secret_defines::mapping::SECRET_MAPPINGS;
use secret_defines::render::{render, OutputFormat};
use secret_defines::sink::DefinitionSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Secret Defines - inject secret-store credentials into firmware builds
#[derive(Parser, Debug)]
#[command(name = "secret-defines")]
#[command(version)]
#[command(about = "Inject secret-store credentials into firmware builds", long_about = None)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Look up all build secrets and print them as build definitions
    Inject {
        /// Path to the configuration file (default: secret-defines.yaml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format (default: from configuration, else flags)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Look up a single secret and print its value
    Lookup {
        /// Collection in the secret store (e.g. wifi)
        collection: String,

        /// Attribute in the secret store (e.g. ssid)
        attribute: String,

        /// Path to the configuration file (default: secret-defines.yaml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// List the build definitions and the secrets they are read from
    Keys,

    /// Check prerequisites and system configuration
    Doctor {
        /// Path to the configuration file (default: secret-defines.yaml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = Config::load(path).context("Failed to load configuration")?;
    config
        .validate()
        .context("Configuration validation failed")?;
    Ok(config)
}

fn run_inject(config_path: Option<&Path>, format: Option<OutputFormat>) -> Result<()> {
    let config = load_config(config_path)?;
    let format = format.unwrap_or(config.output.format);
    let store = config.secret_tool();

    // Only publish once every lookup succeeded
    let mut defines = DefinitionSet::new();
    inject(&store, &SECRET_MAPPINGS, &mut defines).context("Failed to look up build secrets")?;

    let output = render(&defines, format)?;
    write_stdout(&output)?;

    tracing::info!(count = defines.len(), %format, "injected build definitions");
    Ok(())
}

fn run_lookup(collection: &str, attribute: &str, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let store = config.secret_tool();

    let value = lookup_secret(&store, collection, attribute)
        .with_context(|| format!("Failed to look up {}/{}", collection, attribute))?;

    write_stdout(&value)
}

/// Print build-facing output; a closed or full stdout is an error, not a panic.
fn write_stdout(text: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", text)
        .and_then(|_| stdout.flush())
        .context("Failed to write to stdout")
}

fn run_keys() {
    println!("{:<16} {:<12} ATTRIBUTE", "DEFINITION", "COLLECTION");
    for mapping in &SECRET_MAPPINGS {
        println!(
            "{:<16} {:<12} {}",
            mapping.name, mapping.collection, mapping.attribute
        );
    }
}

fn run_doctor(config_path: Option<&Path>) -> Result<()> {
    println!("🔍 Secret Defines Doctor");
    println!("Checking prerequisites...\n");

    let mut all_checks_passed = true;

    // Check 1: configuration
    print!("1. Checking configuration... ");
    let config = match load_config(config_path) {
        Ok(config) => {
            println!("✓");
            config
        }
        Err(e) => {
            println!("✗");
            println!("   ❌ {:#}", e);
            println!("   💡 Falling back to defaults for the remaining checks");
            all_checks_passed = false;
            Config::default()
        }
    };

    // Check 2: store program
    print!("2. Checking if '{}' is installed... ", config.store.program);
    match which::which(&config.store.program) {
        Ok(path) => println!("✓ ({})", path.display()),
        Err(_) => {
            println!("✗");
            println!(
                "   ❌ '{}' is not installed or not in PATH",
                config.store.program
            );
            if config.store.program == secret_defines::store::DEFAULT_PROGRAM {
                println!("   📦 Install libsecret-tools (Debian/Ubuntu) or libsecret (Fedora/Arch)");
            }
            all_checks_passed = false;
        }
    }

    // Check 3: where the configuration would come from
    print!("3. Locating configuration file... ");
    match config_path {
        Some(path) => println!("✓ ({})", path.display()),
        None => match default_locations().into_iter().find(|p| p.is_file()) {
            Some(path) => println!("✓ ({})", path.display()),
            None => println!("⊘ (none found, using defaults)"),
        },
    }

    println!();
    if all_checks_passed {
        println!("✅ All checks passed! Your system is ready.");
        Ok(())
    } else {
        println!("❌ Some checks failed. Please fix the issues above.");
        Err(anyhow::anyhow!("Doctor checks failed"))
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Inject { config, format } => run_inject(config.as_deref(), format),
        Commands::Lookup {
            collection,
            attribute,
            config,
        } => run_lookup(&collection, &attribute, config.as_deref()),
        Commands::Keys => {
            run_keys();
            Ok(())
        }
        Commands::Doctor { config } => run_doctor(config.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("\nError: {:#}", e);
        eprintln!("💡 Run 'secret-defines doctor' to check your configuration.");
        std::process::exit(1);
    }
}
