//! `wayfarer status` — Show effective configuration.

use wayfarer_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    println!("🧭 Wayfarer Status");
    println!("==================");
    println!("  Config dir:      {}", AppConfig::config_dir().display());
    println!("  Endpoint:        {}", config.base_url);
    println!("  Model:           {}", config.model);
    println!("  Temperature:     {}", config.temperature);
    println!("  API key:         {}", if config.has_api_key() { "set" } else { "missing" });
    println!("  Max iterations:  {}", config.agent.max_iterations);
    println!(
        "  System prompt:   {}",
        if config.agent.system_prompt_override.is_some() { "custom" } else { "built-in" }
    );
    println!("  Gateway:         {}:{}", config.gateway.host, config.gateway.port);

    let tools = wayfarer_tools::default_registry();
    println!("  Tools:           {}", tools.names().join(", "));

    if AppConfig::config_path().exists() {
        println!("\n  ✅ Config file found");
    } else {
        println!("\n  ⚠️  No config file — run `wayfarer onboard` first");
    }

    Ok(())
}
