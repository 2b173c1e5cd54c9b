//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use folio_core::contact::ContactForm;
use folio_core::{config, interrupt, logging};

mod commands;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Terminal portfolio page with an animated role typewriter")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Contact form endpoint (overrides [contact].endpoint)
    #[arg(long, global = true, env = "FOLIO_CONTACT_ENDPOINT", value_name = "URL")]
    endpoint: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Run the role typewriter on stdout
    Type {
        /// Role to cycle through (repeatable; defaults to the configured roles)
        #[arg(long = "role", value_name = "ROLE")]
        roles: Vec<String>,

        /// Stop after this many text updates
        #[arg(long, value_name = "N")]
        steps: Option<u64>,

        /// Skip all typing delays and pauses
        #[arg(long)]
        instant: bool,
    },

    /// Validate and send a contact message
    Contact {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        subject: String,
        #[arg(long, default_value = "")]
        message: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Print a fresh config generated from the defaults
    Generate,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    interrupt::init()?;

    let _log_guard = match logging::init() {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: file logging disabled: {e:#}");
            None
        }
    };

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let Cli { command, endpoint } = cli;
    let endpoint = endpoint.as_deref();

    // default to the page
    let Some(command) = command else {
        let config = config::Config::load().context("load config")?;
        return commands::page::run(config, endpoint);
    };

    match command {
        Commands::Type {
            roles,
            steps,
            instant,
        } => {
            let config = config::Config::load().context("load config")?;
            commands::typewriter::run(
                &config,
                commands::typewriter::TypeOptions {
                    roles,
                    steps,
                    instant,
                },
            )
            .await
        }

        Commands::Contact {
            name,
            email,
            subject,
            message,
        } => {
            let config = config::Config::load().context("load config")?;
            let form = ContactForm {
                name,
                email,
                subject,
                message,
            };
            commands::contact::run(&config, &form, endpoint).await
        }

        Commands::Config { command } => {
            let path = config::paths::config_path();
            match command {
                ConfigCommands::Path => println!("{}", path.display()),
                ConfigCommands::Init => {
                    config::Config::init(&path)
                        .with_context(|| format!("init config at {}", path.display()))?;
                    println!("Created config at {}", path.display());
                }
                ConfigCommands::Generate => print!("{}", config::Config::generate()?),
            }
            Ok(())
        }
    }
}
