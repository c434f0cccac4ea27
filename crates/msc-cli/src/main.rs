use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use msc_core::content::ContentQuery;
use msc_infrastructure::{ConfigService, MscPaths};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::AppContext;

#[derive(Parser)]
#[command(name = "msc")]
#[command(about = "MSC Center CLI - account session and training content", long_about = None)]
struct Cli {
    /// Backend base URL (overrides config and MSC_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Directory holding config.toml and session.toml
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session
    Login {
        email: String,
        /// Prompted for without echo when omitted. A value given here is
        /// visible in the process list and shell history.
        #[arg(long)]
        password: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show the current identity
    Whoami,
    /// Re-fetch the current identity from the backend
    Refresh,
    /// Create an account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
    },
    /// List training programs
    Programs,
    /// List projects
    Projects {
        #[command(flatten)]
        page: PageArgs,
    },
    /// Show one project
    Project { slug: String },
    /// List blog posts
    Posts {
        #[command(flatten)]
        page: PageArgs,
    },
    /// Show one blog post
    Post { slug: String },
    /// List mentors, or show one by id or slug
    Mentors { id: Option<String> },
    /// Talk to the MSC assistant
    Chat,
}

#[derive(clap::Args)]
struct PageArgs {
    #[arg(long, default_value_t = 1)]
    page: u32,
    #[arg(long, default_value_t = 9)]
    limit: u32,
    #[arg(long)]
    category: Option<String>,
}

impl PageArgs {
    fn query(&self) -> ContentQuery {
        let query = ContentQuery::page(self.page, self.limit);
        match &self.category {
            Some(category) => query.with_category(category.clone()),
            None => query,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_service = ConfigService::new(MscPaths::new(cli.config_dir.as_deref()));
    let mut config = config_service
        .load()
        .context("Failed to load configuration")?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url.trim_end_matches('/').to_string();
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let session_file = config_service.session_file(&config)?;
    let ctx = AppContext::new(&config, session_file);

    match cli.command {
        Commands::Login { email, password } => commands::auth::login(&ctx, &email, password).await?,
        Commands::Logout => commands::auth::logout(&ctx).await?,
        Commands::Whoami => commands::auth::whoami(&ctx).await?,
        Commands::Refresh => commands::auth::refresh(&ctx).await?,
        Commands::Register { name, email, phone } => {
            commands::auth::register(&ctx, name, email, phone).await?
        }
        Commands::Programs => commands::content::programs(&ctx).await?,
        Commands::Projects { page } => commands::content::projects(&ctx, page.query()).await?,
        Commands::Project { slug } => commands::content::project(&ctx, slug).await?,
        Commands::Posts { page } => commands::content::posts(&ctx, page.query()).await?,
        Commands::Post { slug } => commands::content::post(&ctx, slug).await?,
        Commands::Mentors { id } => commands::mentors::show(id.as_deref())?,
        Commands::Chat => commands::chat::run()?,
    }

    Ok(())
}
