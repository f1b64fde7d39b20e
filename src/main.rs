//! # Support Bot CLI (`supportbot`)
//!
//! ## Usage
//!
//! ```bash
//! supportbot [--config ./supportbot.toml] <command>
//! ```
//!
//! Without `--config` the built-in catalog and default settings are used.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `supportbot ask "<text>"` | Answer one message and exit |
//! | `supportbot chat` | Interactive chat on the terminal |
//! | `supportbot samples` | Run the sample questions through the engine |
//! | `supportbot catalog` | List catalog entries and the catalog fingerprint |
//! | `supportbot serve` | Start the HTTP answer service |
//! | `supportbot completions <shell>` | Print shell completions |
//!
//! ## Examples
//!
//! ```bash
//! supportbot ask "What payment methods do you accept?"
//! supportbot ask "refund?" --threshold 0.1 --explain
//! supportbot ask "free shipping" --json
//! supportbot serve --config ./supportbot.toml
//! ```

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use support_bot::ask::{self, AskOptions};
use support_bot::config::{self, Config};
use support_bot::{chat, logging, server};

/// Support Bot CLI: answers customer questions from a canned catalog.
#[derive(Parser)]
#[command(
    name = "supportbot",
    about = "Support Bot, a TF-IDF customer-support answer bot",
    version,
    long_about = "Support Bot matches each message against a catalog of known questions \
    using TF-IDF cosine similarity and replies with the closest answer, or with a \
    generic help message when nothing is close enough."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Optional. When omitted, the built-in catalog and default engine
    /// settings are used.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Answer a single message.
    Ask {
        /// The customer message.
        question: String,

        /// Override the similarity threshold for this call (0.0 to 1.0).
        #[arg(long)]
        threshold: Option<f64>,

        /// Print the response as JSON.
        #[arg(long)]
        json: bool,

        /// Show the best candidate, its raw similarity, and the matched terms.
        #[arg(long)]
        explain: bool,
    },

    /// Start an interactive chat session.
    ///
    /// Reads one message per line. Type `/samples` for example questions,
    /// `/clear` to reset the history, `/quit` to leave.
    Chat,

    /// Answer every sample question.
    Samples {
        /// Override the similarity threshold (0.0 to 1.0).
        #[arg(long)]
        threshold: Option<f64>,

        /// Print the results as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List the loaded catalog.
    Catalog {
        /// Print the catalog as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Start the HTTP answer service.
    ///
    /// Binds to the address configured in `[server].bind`.
    Serve,

    /// Print a shell completion script to stdout.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "supportbot", &mut std::io::stdout());
        return Ok(());
    }

    let cfg = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => Config::default(),
    };
    logging::init(&cfg.logging);

    match cli.command {
        Commands::Ask {
            question,
            threshold,
            json,
            explain,
        } => {
            ask::run_ask(
                &cfg,
                &question,
                AskOptions {
                    threshold,
                    json,
                    explain,
                },
            )?;
        }
        Commands::Chat => {
            chat::run_chat(&cfg)?;
        }
        Commands::Samples { threshold, json } => {
            ask::run_samples(
                &cfg,
                AskOptions {
                    threshold,
                    json,
                    explain: false,
                },
            )?;
        }
        Commands::Catalog { json } => {
            ask::run_catalog(&cfg, json)?;
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
        Commands::Completions { .. } => {}
    }

    Ok(())
}
