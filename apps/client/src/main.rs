use std::sync::Arc;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use jobboard_client::models::Page;
use jobboard_client::{ApiClient, Config, FileSessionStore};

#[derive(Parser)]
#[command(name = "jobboard", version, about = "Job board command-line client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in and store the session
    Login {
        /// Username or email
        #[arg(long)]
        identifier: String,
        #[arg(long, env = "JOBBOARD_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Browse job postings
    #[command(subcommand)]
    Jobs(JobsCommand),
    /// Inspect applications
    #[command(subcommand)]
    Applications(ApplicationsCommand),
}

#[derive(Subcommand)]
enum JobsCommand {
    List(PageArgs),
    Search {
        query: String,
        #[command(flatten)]
        page: PageArgs,
    },
    Show {
        id: String,
    },
}

#[derive(Subcommand)]
enum ApplicationsCommand {
    /// Applications submitted by an applier
    History {
        applier_id: String,
        #[command(flatten)]
        page: PageArgs,
    },
}

#[derive(Args)]
struct PageArgs {
    #[arg(long, default_value_t = 1)]
    page: u32,
    #[arg(long)]
    per_page: Option<u32>,
}

impl PageArgs {
    fn to_page(&self, default_per_page: u32) -> Page {
        Page::new(self.page, self.per_page.unwrap_or(default_per_page))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "jobboard={0},jobboard_client={0}",
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!(
        "jobboard v{} -> {} (session: {})",
        env!("CARGO_PKG_VERSION"),
        config.api_url,
        config.session_file.display()
    );

    let store = Arc::new(FileSessionStore::new(config.session_file.clone()));
    let client = ApiClient::from_config(&config, store)?;

    match cli.command {
        Command::Login {
            identifier,
            password,
        } => {
            let session = client.auth().login(&identifier, &password).await?;
            println!("Signed in; session valid until {}", session.expires_at);
        }
        Command::Logout => {
            client.auth().logout().await?;
            println!("Signed out");
        }
        Command::Whoami => match client.auth().current_user().await {
            Some(user) => print_json(&serde_json::to_value(user)?)?,
            None => bail!("not signed in"),
        },
        Command::Jobs(JobsCommand::List(page)) => {
            let jobs = client
                .jobs()
                .list_with_images(page.to_page(Page::JOBS_PER_PAGE))
                .await?;
            print_json(&jobs)?;
        }
        Command::Jobs(JobsCommand::Search { query, page }) => {
            let jobs = client
                .jobs()
                .search_with_images(&query, page.to_page(Page::JOBS_PER_PAGE))
                .await?;
            print_json(&jobs)?;
        }
        Command::Jobs(JobsCommand::Show { id }) => {
            print_json(&client.jobs().get(&id).await?)?;
        }
        Command::Applications(ApplicationsCommand::History { applier_id, page }) => {
            let history = client
                .applications()
                .history(&applier_id, page.to_page(Page::APPLICATIONS_PER_PAGE))
                .await?;
            print_json(&history)?;
        }
    }

    Ok(())
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
