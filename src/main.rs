use clap::{Parser, Subcommand};
use std::process::ExitCode;
use std::time::Duration;

mod domain;
mod application;
mod infrastructure;

use application::errors::BotError;
use application::messaging::Dispatcher;
use application::services::UpdateLoop;
use domain::traits::Bot;
use infrastructure::adapters::console::ConsoleAdapter;
use infrastructure::adapters::telegram::TelegramAdapter;
use infrastructure::config::Config;
use infrastructure::database::SqliteStore;

#[derive(Parser)]
#[command(name = "post-browser-bot")]
#[command(about = "Browse users and their posts from a Telegram chat", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Bot token (overrides config and TELEGRAM_BOT_TOKEN)
    #[arg(short, long)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the Telegram bot
    Run,
    /// Drive the bot from stdin against the configured database
    Console,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() -> ExitCode {
    let dotenv = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    if dotenv.is_err() {
        tracing::debug!("No .env file found");
    }

    let cli = Cli::parse();

    match cli.command {
        Commands::Run => run_bot(&cli.config, cli.token),
        Commands::Console => run_console(&cli.config),
        Commands::Version => {
            println!("post-browser-bot v{}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Commands::InitConfig => init_config(),
    }
}

fn load_config(config_path: &str) -> Option<Config> {
    match Config::load_or_default(config_path) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::error!("Failed to load config: {}", e);
            None
        }
    }
}

fn open_store(config: &Config) -> Option<SqliteStore> {
    match SqliteStore::open(&config.database.path) {
        Ok(store) => {
            tracing::info!("Successfully connected to database {}", config.database.path.display());
            Some(store)
        }
        Err(e) => {
            tracing::error!("Database connection failed: {}", e);
            None
        }
    }
}

fn runtime() -> Option<tokio::runtime::Runtime> {
    match tokio::runtime::Runtime::new() {
        Ok(rt) => Some(rt),
        Err(e) => {
            tracing::error!("Failed to start runtime: {}", e);
            None
        }
    }
}

fn run_bot(config_path: &str, token_override: Option<String>) -> ExitCode {
    let Some(mut config) = load_config(config_path) else {
        return ExitCode::FAILURE;
    };
    if let Some(token) = token_override {
        config.telegram.token = Some(token);
    }
    if let Err(e) = config.validate() {
        tracing::error!("Invalid configuration: {}", e);
        return ExitCode::FAILURE;
    }
    let token = config.telegram.token.clone().unwrap_or_default();

    tracing::info!("Starting {} (locale: {})", config.bot.name, config.bot.locale);

    let Some(store) = open_store(&config) else {
        return ExitCode::FAILURE;
    };
    let Some(rt) = runtime() else {
        return ExitCode::FAILURE;
    };

    rt.block_on(async {
        let mut bot = match TelegramAdapter::new(
            token,
            config.telegram.api_url.clone(),
            config.telegram.poll_timeout(),
        ) {
            Ok(bot) => bot,
            Err(e) => {
                tracing::error!("Failed to create Telegram client: {}", e);
                return ExitCode::FAILURE;
            }
        };

        if let Err(e) = bot.start().await {
            tracing::error!("Failed to start bot: {}", e);
            return ExitCode::FAILURE;
        }

        let dispatcher = Dispatcher::new(store, config.bot.locale);
        UpdateLoop::new(bot, dispatcher, config.telegram.retry_delay())
            .run()
            .await;

        ExitCode::SUCCESS
    })
}

fn run_console(config_path: &str) -> ExitCode {
    let Some(config) = load_config(config_path) else {
        return ExitCode::FAILURE;
    };
    let Some(store) = open_store(&config) else {
        return ExitCode::FAILURE;
    };
    let Some(rt) = runtime() else {
        return ExitCode::FAILURE;
    };

    rt.block_on(async {
        let mut bot = ConsoleAdapter::new();
        if let Err(e) = bot.start().await {
            tracing::error!("Failed to start bot: {}", e);
            return ExitCode::FAILURE;
        }

        let mut updates = UpdateLoop::new(bot, Dispatcher::new(store, config.bot.locale), Duration::ZERO);
        loop {
            match updates.poll_once().await {
                Ok(_) => {}
                Err(BotError::Closed) => break,
                Err(e) => tracing::error!("Failed to read input: {}", e),
            }
        }

        ExitCode::SUCCESS
    })
}

fn init_config() -> ExitCode {
    match serde_yaml::to_string(&Config::default()) {
        Ok(yaml) => {
            println!("{}", yaml);
            println!("\nSave this to config.yaml and adjust as needed.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Failed to render config: {}", e);
            ExitCode::FAILURE
        }
    }
}
