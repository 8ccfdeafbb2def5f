use std::sync::Arc;
use tax_interview_orchestrator::{
    config::Config,
    console::StdConsole,
    engine::OpenAiClient,
    rules::RulesTable,
    session::{Interviewer, SessionOptions},
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    dotenv::dotenv().ok();

    info!("Tax Interview Orchestrator starting");

    // Resources are loaded up front; a missing credential or rules
    // table is fatal before the first stage runs.
    let config = Config::from_env()?;
    let rules = RulesTable::load(&config.rules_path)?;

    let client = Arc::new(OpenAiClient::new(config.api_key.clone()));

    let interviewer = Interviewer::new(
        client.clone(),
        client,
        SessionOptions {
            chat_model: config.chat_model.clone(),
            reasoning_model: config.reasoning_model.clone(),
            turn_limit: config.turn_limit,
        },
    );

    let mut console = StdConsole;

    match interviewer.run(&mut console, &rules).await {
        Ok(()) => {
            info!("Session complete");
            Ok(())
        }
        Err(e) => {
            eprintln!("Session failed: {}", e);
            Err(Box::new(e) as Box<dyn std::error::Error>)
        }
    }
}
