//! woo-edge - WooCommerce REST client and edge route
//!
//! Entry point for the woo-edge application.

use clap::Parser;
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;
use woo_edge::cli::{Cli, Commands, ConfigCommands, RequestArgs, ServeArgs};
use woo_edge::config::{Config, LogFormat, LogOutput, LoggingConfig};
use woo_edge::error::exit_code;
use woo_edge::{RequestOptions, WooClient, WooError};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(e.exit_code() as u8);
        }
    };

    if let Err(e) = init_logging(&cli, &config.logging) {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::from(exit_code::GENERAL_ERROR as u8);
    }

    match run(&cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins over the CLI flags, which win over the configured level.
fn init_logging(
    cli: &Cli,
    logging: &LoggingConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = logging.env_filter(cli.log_level(), rust_log.as_deref())?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    match (logging.format, logging.output) {
        (LogFormat::Json, LogOutput::Stdout) => builder.json().with_writer(std::io::stdout).try_init(),
        (LogFormat::Json, LogOutput::Stderr) => builder.json().with_writer(std::io::stderr).try_init(),
        (LogFormat::Text, LogOutput::Stdout) => builder.with_writer(std::io::stdout).try_init(),
        (LogFormat::Text, LogOutput::Stderr) => builder.with_writer(std::io::stderr).try_init(),
    }
}

/// Main application logic.
fn run(cli: &Cli, config: Config) -> woo_edge::Result<()> {
    match &cli.command {
        Commands::Serve(args) => cmd_serve(config, args),
        Commands::Request(args) => cmd_request(config, args),
        Commands::Config(subcmd) => cmd_config(config, subcmd),
    }
}

fn runtime() -> woo_edge::Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Runtime::new()?)
}

/// Handle the `serve` command.
fn cmd_serve(mut config: Config, args: &ServeArgs) -> woo_edge::Result<()> {
    if let Some(bind) = &args.bind {
        config.server.bind = bind.clone();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config.validate()?;

    tracing::info!(
        bind = %config.server.bind,
        port = %config.server.port,
        store = config.store.url.as_deref().unwrap_or("<unset>"),
        "Starting woo-edge server"
    );

    runtime()?.block_on(async { woo_edge::serve(&config).await })
}

/// Handle the `request` command.
fn cmd_request(config: Config, args: &RequestArgs) -> woo_edge::Result<()> {
    let mut options = config.bindings()?.client_options();
    if args.query_string_auth {
        options = options.query_string_auth(true);
    }

    let request = RequestOptions {
        params: args.query_params()?,
        body: args.body()?,
        headers: args.headers()?,
        signal: None,
    };

    tracing::info!(method = %args.method, endpoint = %args.endpoint, "Sending request");

    runtime()?.block_on(async {
        let client = WooClient::new(options)?;

        // Ctrl-C cancels the in-flight request.
        let token = CancellationToken::new();
        let trigger = token.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                trigger.cancel();
            }
        });

        let response = client
            .request::<serde_json::Value>(args.method, &args.endpoint, request.signal(token))
            .await?;

        match response {
            Some(value) => {
                let pretty = serde_json::to_string_pretty(&value)?;
                println!("{}", pretty);
            }
            None => println!("(no content)"),
        }

        Ok(())
    })
}

/// Handle the `config` subcommand.
fn cmd_config(config: Config, subcmd: &ConfigCommands) -> woo_edge::Result<()> {
    match subcmd {
        ConfigCommands::Validate => {
            config.validate()?;
            match config.bindings() {
                Ok(_) => println!("✓ Configuration is valid"),
                Err(e) => println!("✓ Configuration is valid (warning: {})", e),
            }
            tracing::debug!(?config, "Validated configuration");
            Ok(())
        }
        ConfigCommands::Show => {
            let yaml = serde_yaml::to_string(&config).map_err(|e| {
                WooError::config_with_source("Failed to serialize configuration", e)
            })?;
            println!("{}", yaml);
            Ok(())
        }
    }
}
