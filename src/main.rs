use clap::{Parser, Subcommand};
use std::sync::Arc;

use relaybot::infrastructure::adapters::console::ConsoleGateway;
use relaybot::{Options, Router};

#[derive(Parser)]
#[command(name = "relaybot")]
#[command(about = "A minimal event-relay router for chat bots", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Bot token (overrides config)
    #[arg(short, long)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot on the console gateway
    Run,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run => {
            run_bot(cli.config, cli.token).await;
        }
        Commands::Version => {
            println!("relaybot v{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::InitConfig => {
            init_config(&cli.config);
        }
    }
}

async fn run_bot(config_path: String, token_override: Option<String>) {
    let mut options = if std::path::Path::new(&config_path).exists() {
        match Options::load(&config_path) {
            Ok(options) => options,
            Err(e) => {
                tracing::warn!("Failed to load config: {}, using environment", e);
                Options::load_env()
            }
        }
    } else {
        Options::load_env()
    };
    if let Some(token) = token_override {
        options.token = Some(token);
    }

    let gateway = Arc::new(ConsoleGateway::new());
    let router = match Router::new(options, gateway.clone()) {
        Ok(router) => router,
        Err(e) => {
            tracing::error!("Startup aborted: {}", e);
            return;
        }
    };

    // Feed stdin lines through the gateway as console-user messages. A
    // detached thread, so a failed startup never blocks on a pending read.
    {
        let gateway = Arc::clone(&gateway);
        std::thread::spawn(move || {
            use std::io::BufRead;
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                match line {
                    Ok(line) if line.trim() == "/quit" => break,
                    Ok(line) => gateway.inject_line(&line),
                    Err(_) => break,
                }
            }
            gateway.close();
        });
    }

    if let Err(e) = router.start().await {
        tracing::error!("Startup aborted: {}", e);
    }
}

fn init_config(path: &str) {
    if std::path::Path::new(path).exists() {
        tracing::warn!("{} already exists, not overwriting", path);
        return;
    }
    match serde_yaml::to_string(&Options::default()) {
        Ok(yaml) => {
            if let Err(e) = std::fs::write(path, yaml) {
                tracing::error!("Failed to write {}: {}", path, e);
            } else {
                tracing::info!("Wrote default config to {}", path);
            }
        }
        Err(e) => tracing::error!("Failed to serialize default config: {}", e),
    }
}
