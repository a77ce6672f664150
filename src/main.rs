use batch_rest_client::domain::ports::ConfigProvider;
use batch_rest_client::utils::error::{BatchClientError, ErrorSeverity};
use batch_rest_client::utils::{logger, validation::Validate};
use batch_rest_client::{app::commands, BatchServiceClient, CliConfig};
use clap::Parser;

fn exit_with(e: &BatchClientError) -> ! {
    tracing::error!(
        "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 4,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

#[tokio::main]
async fn main() {
    let mut config = CliConfig::parse();

    // The config file decides the log format, so it is read before logging starts.
    let loaded = config.load_file();
    if config.json_logs() {
        logger::init_json_logger(config.log_level());
    } else {
        logger::init_cli_logger(config.verbose);
    }
    if let Err(e) = loaded {
        exit_with(&e);
    }

    tracing::info!("Starting batch-cli {}", config.command.name());
    tracing::debug!(
        "Account {} (api-version {})",
        config.account_url(),
        config.api_version()
    );

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        exit_with(&e);
    }

    let client = match BatchServiceClient::from_config(&config) {
        Ok(client) => client,
        Err(e) => exit_with(&e),
    };

    match commands::run(&client, &config.command).await {
        Ok(output) => match serde_json::to_string_pretty(&output) {
            Ok(text) => println!("{}", text),
            Err(e) => exit_with(&BatchClientError::from(e)),
        },
        Err(e) => exit_with(&e),
    }
}
