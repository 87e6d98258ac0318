use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use docdir::{DirectoryConfig, DocumentDirectoryService, DocumentRecord};

use crate::{logging, server};

#[derive(Parser)]
#[command(name = "docdir", version, about = "Resolve the latest documents of a collection")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// JSON settings file (`local.settings.json` layout)
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// Base directory of all collections; overrides settings and environment
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve collections over HTTP
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        #[arg(long, default_value_t = 8000)]
        port: u16,
    },
    /// Report whether a collection directory exists
    Exists {
        upper: String,
        #[arg(long)]
        lower: Option<String>,
    },
    /// Print the latest documents of a collection
    Fetch {
        upper: String,
        #[arg(long)]
        lower: Option<String>,
        /// Print records, content included, as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Parse the command line and run it.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded or the command fails.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    execute(cli).await
}

/// Run an already-parsed command line.
///
/// # Errors
///
/// See [`run`].
pub async fn execute(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    tracing::debug!("Using document root {}", config.root.display());
    let service = DocumentDirectoryService::new(config);

    match cli.command {
        Commands::Serve { host, port } => server::serve(service, &host, port, cli.verbose).await,
        Commands::Exists { upper, lower } => {
            println!("{}", service.exists(&upper, lower.as_deref()));
            Ok(())
        }
        Commands::Fetch { upper, lower, json } => {
            let docs = service.fetch_documents(&upper, lower.as_deref()).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&docs)?);
            } else {
                for doc in &docs {
                    println!("{}", summary_line(doc));
                }
            }
            Ok(())
        }
    }
}

fn load_config(cli: &Cli) -> Result<DirectoryConfig> {
    let root = cli.root.as_ref().map(|p| p.to_string_lossy().into_owned());
    let config = DirectoryConfig::from_lookup(cli.settings.as_deref(), |key| {
        if key == docdir::ROOT_ENV_VARS[0] && root.is_some() {
            return root.clone();
        }
        std::env::var(key).ok()
    })?;
    Ok(config)
}

fn summary_line(doc: &DocumentRecord) -> String {
    format!(
        "{}\t{}\t{}\t{} bytes",
        doc.doc_type,
        doc.logical_name,
        doc.path.display(),
        doc.content.as_ref().map_or(0, String::len)
    )
}
