mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{
    generate::GenerateArgs, goals::GoalsSubcommand, history::HistorySubcommand,
    lookup::LookupSubcommand, reference::ReferenceSubcommand,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "clo",
    about = "Compose course learning outcomes, variants and rubrics from program outcome tables",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .clo/)
    #[arg(long, global = true, env = "CLO_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create .clo/ with a config and the default reference tables
    Init {
        /// Overwrite existing config and reference tables
        #[arg(long)]
        force: bool,
    },

    /// Launch the composer form and JSON API
    Serve {
        /// Port to listen on (0 = OS-assigned)
        #[arg(long, default_value = "3141")]
        port: u16,

        /// Don't open browser automatically
        #[arg(long)]
        no_open: bool,
    },

    /// Compose one CLO and append it to the history table
    Generate(GenerateArgs),

    /// Query the outcome, taxonomy and assessment tables
    Lookup {
        #[command(subcommand)]
        subcommand: LookupSubcommand,
    },

    /// Browse the IEG → PEO → PLO mapping
    Goals {
        #[command(subcommand)]
        subcommand: GoalsSubcommand,
    },

    /// Manage saved CLOs
    History {
        #[command(subcommand)]
        subcommand: HistorySubcommand,
    },

    /// Validate or import reference tables
    Reference {
        #[command(subcommand)]
        subcommand: ReferenceSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init { force } => cmd::init::run(&root, force),
        Commands::Serve { port, no_open } => cmd::serve::run(&root, port, no_open),
        Commands::Generate(args) => cmd::generate::run(&root, args, cli.json),
        Commands::Lookup { subcommand } => cmd::lookup::run(&root, subcommand, cli.json),
        Commands::Goals { subcommand } => cmd::goals::run(&root, subcommand, cli.json),
        Commands::History { subcommand } => cmd::history::run(&root, subcommand, cli.json),
        Commands::Reference { subcommand } => cmd::reference::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
