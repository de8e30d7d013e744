//! `wayfarer gateway` — Start the HTTP server.

use wayfarer_config::AppConfig;

pub async fn run(port_override: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    if let Some(port) = port_override {
        config.gateway.port = port;
    }

    println!("🧭 Wayfarer Gateway");
    println!("   Listening: {}:{}", config.gateway.host, config.gateway.port);
    println!("   Chat:      POST /api/chat");
    println!("   Health:    GET  /api/health");

    wayfarer_gateway::start(config).await?;

    Ok(())
}
