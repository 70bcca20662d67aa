use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use celeba_fetch::{commands, FetchConfig};

#[derive(Parser)]
#[clap(name = "celeba-fetch")]
#[clap(about = "Download and unpack the CelebA image archive")]
#[clap(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[clap(flatten)]
    options: GlobalOptions,
    #[clap(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct GlobalOptions {
    /// Project root holding the data/ directory (default: current directory)
    #[clap(long, global = true)]
    root: Option<PathBuf>,
    /// Config file (default: <root>/celeba-fetch.toml if present)
    #[clap(long, global = true)]
    config: Option<PathBuf>,
    /// Override the archive URL
    #[clap(long, global = true)]
    url: Option<String>,
    /// Extra download attempts after a network failure
    #[clap(long, global = true)]
    retries: Option<u8>,
}

#[derive(Subcommand)]
enum Commands {
    /// Download the archive and unpack it if needed (the default)
    Fetch,
    /// Show what is already on disk
    Status,
    /// Remove the downloaded archive and/or the extracted images
    Clean {
        /// Only remove the archive
        #[clap(long)]
        archive: bool,
        /// Only remove the extracted images
        #[clap(long)]
        extracted: bool,
    },
}

fn load_config(options: &GlobalOptions) -> Result<FetchConfig> {
    let root = match &options.root {
        Some(root) => root.clone(),
        None => std::env::current_dir()?,
    };

    let mut config = FetchConfig::load(&root, options.config.as_deref())?;
    if let Some(url) = &options.url {
        config = config.with_remote_url(url.clone());
    }
    if let Some(retries) = options.retries {
        config = config.with_retries(retries);
    }
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli.options)?;

    match cli.command.unwrap_or(Commands::Fetch) {
        Commands::Fetch => commands::fetch::fetch_dataset(&config)?,
        Commands::Status => commands::status::show_status(&config)?,
        Commands::Clean { archive, extracted } => {
            commands::clean::clean_dataset(&config, archive, extracted)?
        }
    }

    Ok(())
}
