use anyhow::Context;
use clap::Parser;
use classfinder::cli::{prompt_login, App, Prompter};
use classfinder::config::AppConfig;
use classfinder::db::SavedCourseDb;
use classfinder::ratings::RatingsClient;
use classfinder::schedule::ScheduleClient;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "classfinder")]
#[command(about = "Search the class schedule with professor ratings attached")]
struct Cli {
    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,
    /// SQLite file holding saved courses (overrides the config file)
    #[arg(long)]
    db: Option<PathBuf>,
    #[arg(long, env = "CLASSFINDER_USER_ID")]
    user_id: Option<String>,
    /// API bearer token
    #[arg(long, env = "CLASSFINDER_TOKEN", hide_env_values = true)]
    token: Option<String>,
    /// Treat instructor matches with zero ratings as unmatched
    #[arg(long)]
    suppress_zero_ratings: bool,
    #[arg(long, short)]
    verbose: bool,
    /// Drop and recreate the saved-courses table, then exit
    #[arg(long)]
    rebuild_db: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "classfinder=debug" } else { "classfinder=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = AppConfig::load(cli.config.as_deref()).context("Failed to load config")?;
    if let Some(db) = cli.db {
        config.database_path = db;
    }
    if cli.suppress_zero_ratings {
        config.suppress_zero_rating_matches = true;
    }

    let db = SavedCourseDb::connect(&config.database_path, config.storage_probe_retries)
        .context("Unable to connect to the saved-course database")?;

    if cli.rebuild_db {
        db.rebuild().context("Failed to rebuild the saved-course table")?;
        println!("Rebuilt {}", config.database_path.display());
        return Ok(());
    }

    let mut prompter = Prompter::new(std::io::stdin().lock(), std::io::stdout());
    let (user_id, token) = prompt_login(&mut prompter, cli.user_id, cli.token)?;

    let schedule = ScheduleClient::new(&config, token)?;
    let first_name = schedule
        .verify_subscriptions(&user_id, &config.probe_year_term, &config.probe_teaching_area)
        .await?;
    prompter.say(format!("Welcome {}", first_name))?;
    info!(user_id = %user_id, "Logged in");

    let ratings = RatingsClient::new(&config)?;
    let mut app = App {
        user_id,
        config: &config,
        schedule: &schedule,
        ratings: &ratings,
        db: &db,
        prompter,
    };
    app.run().await?;

    Ok(())
}
