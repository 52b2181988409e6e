//! # envsec demo application
//!
//! A small CLI that loads [`DemoConfig`](config::DemoConfig) from the
//! environment and prints it. It exists to exercise envsec by hand.
//!
//! ```sh
//! DEMO_DATABASE_URL=pg://localhost cargo run --example envsec_demo -- show
//!
//! mkdir -p /tmp/demo/secrets && echo hunter2 > /tmp/demo/secrets/DEMO_PASSWORD
//! DEMO_DATABASE_URL=pg://localhost DEMO_PASSWORD__SECRET= \
//!     cargo run --example envsec_demo -- --env-root /tmp/demo --secrets-dir /secrets/ show
//!
//! cargo run --example envsec_demo -- vars
//! RUST_LOG=envsec=debug cargo run --example envsec_demo -- show
//! ```

mod config;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use envsec::{Envsec, ResolverArgs};

use config::DemoConfig;

/// envsec demo: load configuration from env vars, files and secrets.
#[derive(Parser, Debug)]
#[command(name = "envsec-demo")]
struct Cli {
    #[command(flatten)]
    envsec: ResolverArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve the configuration and print it.
    Show,
    /// List the variables the configuration reads.
    Vars,
}

fn show(envsec: &Envsec) {
    let mut config = DemoConfig::default();
    if let Err(e) = envsec.load(&mut config) {
        eprintln!("Failed to load config:\n{e}");
        std::process::exit(1);
    }
    config.loaded = true;

    let password = if config.password.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    };
    let entries = [
        ("name", config.name.clone()),
        ("database_url", config.database_url.clone()),
        ("password", password.to_string()),
        ("port", config.port.to_string()),
        ("verbose", config.verbose.to_string()),
    ];
    let width = entries.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    for (key, value) in &entries {
        println!("{key:<width$}  {value}");
    }
    if config.verbose {
        println!();
        println!(
            "root={} secrets_dir={}",
            envsec.root().display(),
            envsec.secrets_dir()
        );
    }
}

fn vars() {
    let mut config = DemoConfig::default();
    for (directive, vars) in Envsec::variables(&mut config) {
        let required = if directive.is_required() { " (required)" } else { "" };
        println!("{}{required}: {}", directive.key, vars);
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let envsec = cli.envsec.into_envsec();

    match cli.command {
        Commands::Show => show(&envsec),
        Commands::Vars => vars(),
    }
}
