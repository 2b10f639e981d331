use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod context;
mod logging;
mod render;

use context::AppContext;

#[derive(Parser)]
#[command(name = "registro")]
#[command(about = "Registro - event attendee registration form", long_about = None)]
struct Cli {
    /// Keep everything in memory; nothing is read from or written to disk
    #[arg(long, global = true)]
    ephemeral: bool,

    /// Directory holding config.toml, logs/ and data/
    #[arg(long, global = true, env = "REGISTRO_HOME")]
    config_dir: Option<PathBuf>,

    /// Also print log events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Save the form configuration used by the registration form
    Configure {
        /// Hide the session selector (no session is required)
        #[arg(long)]
        no_sessions: bool,
        /// Ask for the attendee's company
        #[arg(long)]
        company: bool,
        /// Ask for the attendee's phone number
        #[arg(long)]
        phone: bool,
        /// Accent color as #rrggbb
        #[arg(long, value_name = "COLOR")]
        primary_color: Option<String>,
    },
    /// Print the saved form configuration
    ShowConfig,
    /// Submit one registration
    Register {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        /// Session to attend, by catalog number (1-3) or exact name
        #[arg(long = "session", value_name = "SESSION")]
        sessions: Vec<String>,
        /// Value of a configured extra field
        #[arg(long = "field", value_name = "NAME=VALUE", value_parser = commands::register::parse_field)]
        fields: Vec<(String, String)>,
    },
    /// List stored registrations
    List {
        /// Print the stored JSON document
        #[arg(long)]
        json: bool,
    },
    /// Fill in the registration form interactively
    Form,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let ctx = tracing::subscriber::with_default(logging::bootstrap(cli.verbose), || {
        if cli.ephemeral {
            AppContext::ephemeral()
        } else {
            AppContext::persistent(cli.config_dir.clone())
        }
    })?;
    let _log_guard = logging::init(&ctx.settings.logging, ctx.logs_dir.as_deref(), cli.verbose)?;

    match cli.command {
        Commands::Configure {
            no_sessions,
            company,
            phone,
            primary_color,
        } => commands::configure::run(&ctx, !no_sessions, company, phone, primary_color).await?,
        Commands::ShowConfig => commands::configure::show(&ctx).await?,
        Commands::Register {
            name,
            email,
            sessions,
            fields,
        } => commands::register::run(&ctx, name, email, &sessions, fields).await?,
        Commands::List { json } => commands::list::run(&ctx, json).await?,
        Commands::Form => commands::form::run(&ctx).await?,
    }

    Ok(())
}
