use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use runtime::{AppConfig, CliArgs};
use std::path::PathBuf;
use users_directory::{UsersDirectory, UsersDirectoryConfig};

mod shell;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const MODULE_NAME: &str = "users_directory";

/// User Console - manage users of a REST user directory
#[derive(Parser)]
#[command(name = "user-console")]
#[command(about = "User Console - manage users of a REST user directory")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base URL of the users REST service (overrides config)
    #[arg(long)]
    base_url: Option<String>,

    /// Users shown per page (overrides config)
    #[arg(long)]
    page_size: Option<usize>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive shell (default)
    Shell,
    /// Fetch users and print one page
    List {
        /// Page to print (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        print_config: cli.print_config,
        verbose: cli.verbose,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    let logging_config = config.logging.as_ref().cloned().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, &config.home_dir());
    tracing::info!("User console starting");

    let module_cfg = effective_module_config(&config, &cli)?;
    config
        .modules
        .insert(MODULE_NAME.to_string(), serde_json::to_value(&module_cfg)?);

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => shell::run(UsersDirectory::init(module_cfg)?).await,
        Commands::List { page } => list_page(module_cfg, page).await,
        Commands::Check => check_config(&config, module_cfg),
    }
}

/// Module section from the config bag with CLI overrides applied.
/// A module without its own timeout inherits `app.timeout_sec`.
fn effective_module_config(config: &AppConfig, cli: &Cli) -> Result<UsersDirectoryConfig> {
    let mut cfg: UsersDirectoryConfig = config.module_config(MODULE_NAME)?;
    if let Some(url) = &cli.base_url {
        cfg.base_url = url.clone();
    }
    if let Some(size) = cli.page_size {
        if size == 0 {
            return Err(anyhow!("--page-size must be at least 1"));
        }
        cfg.users_per_page = size;
    }
    if cfg.timeout_sec == 0 {
        cfg.timeout_sec = config.app.timeout_sec;
    }
    Ok(cfg)
}

async fn list_page(cfg: UsersDirectoryConfig, page: usize) -> Result<()> {
    let directory = UsersDirectory::init(cfg)?;
    directory.store().load().await?;

    let mut pagination = directory.pagination();
    pagination.select_page(page);
    print!("{}", directory.render(&pagination, &directory.form()));
    Ok(())
}

fn check_config(config: &AppConfig, cfg: UsersDirectoryConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    UsersDirectory::init(cfg)?;
    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);
    Ok(())
}
