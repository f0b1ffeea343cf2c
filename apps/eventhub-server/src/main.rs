mod server;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use modkit::{DbModule, Module, ModuleCtx, ModuleCtxBuilder, RestfulModule};
use modkit_db::{absolutize_sqlite_dsn, redact_credentials_in_dsn, ConnectOpts, DbHandle};
use registrations::config::RegistrationsConfig;
use registrations::Registrations;
use runtime::{AppConfig, CliArgs, DatabaseConfig};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const MOCK_DSN: &str = "sqlite::memory:";

/// EventHub Server - event registration backend
#[derive(Parser)]
#[command(name = "eventhub-server")]
#[command(about = "EventHub Server - event registration backend")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an in-memory SQLite database
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // CLI args passed down to config/app
    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
        mock: cli.mock,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    let logging_config = config.logging.clone().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.server.home_dir));
    tracing::info!("EventHub Server starting");

    if args.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config, args).await,
        Commands::Check => check_config(&config, &args),
    }
}

/// DSN to connect to: the configured one, or in-memory SQLite under `--mock`.
/// Relative SQLite paths resolve against `home_dir`.
fn effective_dsn(
    db_config: Option<&DatabaseConfig>,
    args: &CliArgs,
    home_dir: &Path,
    create_dirs: bool,
) -> Result<String> {
    if args.mock {
        return Ok(MOCK_DSN.to_string());
    }
    let db_config = db_config.ok_or_else(|| anyhow!("Database configuration is required"))?;
    let dsn = db_config.url.trim();
    if dsn.is_empty() {
        return Err(anyhow!("Database URL not configured"));
    }
    DbHandle::detect(dsn)?;
    if dsn.starts_with("sqlite://") {
        return absolutize_sqlite_dsn(dsn, home_dir, create_dirs);
    }
    Ok(dsn.to_string())
}

fn module_ctx(config: &AppConfig, db: Option<DbHandle>, module: &dyn Module) -> ModuleCtx {
    let mut builder =
        ModuleCtxBuilder::new().with_config_provider(Arc::new(config.modules.clone()));
    if let Some(db) = db {
        builder = builder.with_db(db);
    }
    builder.build().for_module(module.name())
}

async fn run_server(config: AppConfig, args: CliArgs) -> Result<()> {
    let home_dir = PathBuf::from(&config.server.home_dir);
    let addr = server::bind_addr(&config.server)?;

    let dsn = effective_dsn(config.database.as_ref(), &args, &home_dir, true)?;
    let mut connect_opts = ConnectOpts {
        acquire_timeout: Some(Duration::from_secs(5)),
        ..Default::default()
    };
    if let Some(n) = config.database.as_ref().and_then(|d| d.max_conns) {
        connect_opts.max_conns = Some(n);
    }
    tracing::info!("Connecting to database: {}", redact_credentials_in_dsn(&dsn));
    let db = DbHandle::connect(&dsn, connect_opts)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected DB backend: {:?}", db.engine());

    tracing::info!("Initializing modules...");
    let registrations = Registrations::new();
    let ctx = module_ctx(&config, Some(db.clone()), &registrations);
    registrations.init(&ctx).await?;
    registrations.migrate(&db).await?;
    let routes = registrations.register_rest(&ctx, axum::Router::new())?;
    let routes = server::protect(routes, server::caller_auth(config.auth.as_ref())?);

    let router = server::build_router(routes, &config.server);
    server::serve(router, addr).await?;

    db.close().await?;
    tracing::info!("EventHub Server stopped");
    Ok(())
}

fn check_config(config: &AppConfig, args: &CliArgs) -> Result<()> {
    tracing::info!("Checking configuration...");

    server::bind_addr(&config.server)?;
    server::caller_auth(config.auth.as_ref())?;
    effective_dsn(
        config.database.as_ref(),
        args,
        Path::new(&config.server.home_dir),
        false,
    )?;

    let ctx = module_ctx(config, None, &Registrations::new());
    let _: RegistrationsConfig = ctx.module_config()?;

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);
    Ok(())
}
