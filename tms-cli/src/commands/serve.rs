//! HTTP server command for the tms lecture API
//!
//! Settings come from the config file, then the environment, then flags.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use tms_server::db::pool::DEFAULT_MAX_CONNECTIONS;
use tms_server::db::{create_pool_with_options, schema, MemoryLectureStore, PgLectureStore};
use tms_server::{run_server, AppState, ServerConfig, TmsConfig};

/// Arguments for the serve command
#[derive(Parser, Debug, Default)]
pub struct ServeArgs {
    /// Config file (default: ~/.tms/config.toml, skipped when missing)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Address to bind to (default: 127.0.0.1:8080)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (overrides config file)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Maximum pooled database connections (default: 5)
    #[arg(long)]
    pub max_connections: Option<u32>,

    /// Create missing timetable tables before serving
    #[arg(long)]
    pub migrate: bool,

    /// Serve lectures from a JSON fixture file instead of Postgres
    #[arg(long, value_name = "FILE")]
    pub fixture: Option<PathBuf>,
}

/// Where lectures are read from
#[derive(Debug, Clone, PartialEq)]
enum Backend {
    Postgres {
        url: String,
        max_connections: u32,
        migrate: bool,
    },
    Fixture(PathBuf),
}

/// Merge flags over the config file.
fn resolve(args: ServeArgs, file: TmsConfig) -> Result<(ServerConfig, Backend)> {
    let defaults = ServerConfig::default();
    let server = ServerConfig {
        bind_addr: args.bind.or(file.server.bind).unwrap_or(defaults.bind_addr),
        cors_permissive: args.cors_permissive || file.server.cors_permissive.unwrap_or(false),
    };

    if let Some(path) = args.fixture {
        return Ok((server, Backend::Fixture(path)));
    }

    let url = args
        .database_url
        .or(file.database.url)
        .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, .env, or [database] url in the config file")?;

    let backend = Backend::Postgres {
        url,
        max_connections: args
            .max_connections
            .or(file.database.max_connections)
            .unwrap_or(DEFAULT_MAX_CONNECTIONS),
        migrate: args.migrate || file.database.migrate.unwrap_or(false),
    };

    Ok((server, backend))
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let file = match &args.config {
        Some(path) => TmsConfig::load(path)?,
        None => TmsConfig::load_default()?,
    };
    let (config, backend) = resolve(args, file)?;

    let state = match backend {
        Backend::Fixture(path) => {
            let store = MemoryLectureStore::from_path(&path)
                .await
                .with_context(|| format!("Failed to load fixture {}", path.display()))?;
            tracing::info!(
                fixture = %path.display(),
                lectures = store.lecture_count(),
                "Serving lectures from fixture"
            );
            AppState::new(store)
        }
        Backend::Postgres {
            url,
            max_connections,
            migrate,
        } => {
            let pool = create_pool_with_options(&url, max_connections)
                .await
                .context("Failed to create database pool")?;

            if migrate {
                schema::ensure_schema(&pool)
                    .await
                    .context("Failed to create timetable schema")?;
            }

            AppState::new(PgLectureStore::new(pool))
        }
    };

    tracing::info!("Starting tms server on {}", config.bind_addr);

    // Run server (blocks until shutdown)
    run_server(state, config).await.context("Server error")?;

    Ok(())
}
