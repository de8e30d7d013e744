//! `wayfarer agent` — Run one loop for a single question.

use std::sync::Arc;
use wayfarer_agent::{LoopOutcome, ReactAgent, UserPrompt};
use wayfarer_config::AppConfig;
use wayfarer_core::message::{ConversationRecord, Role};

pub async fn run(message: String) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    // Fail early with setup instructions when no key is configured
    if !config.has_api_key() {
        eprintln!();
        eprintln!("  ERROR: No API key configured!");
        eprintln!();
        eprintln!("  Set one of these environment variables:");
        eprintln!("    WAYFARER_API_KEY = 'sk-...'");
        eprintln!("    OPENAI_API_KEY   = 'sk-...'");
        eprintln!();
        eprintln!("  Or add it to your config file:");
        eprintln!("    {}", AppConfig::config_path().display());
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    }

    let prompt = UserPrompt::new(message)?;
    let provider = wayfarer_providers::build_from_config(&config)?;
    let tools = Arc::new(wayfarer_tools::default_registry());
    let agent = ReactAgent::from_config(&config, provider, tools);

    eprintln!("  Thinking...");
    match agent.run(&prompt).await {
        LoopOutcome::Completed {
            answer,
            conversation,
        } => {
            print_conversation(&conversation);
            println!("\n  Final answer: {answer}");
            Ok(())
        }
        LoopOutcome::Exhausted { conversation } => {
            print_conversation(&conversation);
            Err(format!(
                "No final answer after {} iterations",
                agent.settings().max_iterations
            )
            .into())
        }
        LoopOutcome::Faulted { error } => Err(error.into()),
    }
}

fn print_conversation(conversation: &ConversationRecord) {
    for message in conversation.messages() {
        let label = match message.role {
            Role::Assistant => "assistant",
            Role::System => "system",
        };
        println!("\n  [{label}]");
        for line in message.content.lines() {
            println!("  {line}");
        }
    }
}
