use clap::{Parser, Subcommand};

mod app;
mod auth;
mod config;
mod db;
mod error;
mod extract;
mod recipes;
mod seed;
mod state;
#[cfg(test)]
mod test_support;

use crate::{config::AppConfig, db::PgStore, state::AppState};

#[derive(Parser)]
#[command(name = "recipebox")]
#[command(about = "Recipe sharing backend")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (default)
    Serve,
    /// Replace all data with fake users and recipes
    Seed {
        #[arg(long, default_value = "20")]
        users: usize,
        #[arg(long, default_value = "100")]
        recipes: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "recipebox=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            let addr = config.bind_addr()?;
            let state = AppState::init(config).await?;
            app::serve(app::build_app(state), addr).await?;
        }
        Commands::Seed { users, recipes } => {
            let store = PgStore::connect(&config).await?;
            store.migrate().await?;
            seed::run(&store, users, recipes).await?;
        }
    }

    Ok(())
}
