//! `wayfarer onboard` — First-time setup.

use wayfarer_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_dir = AppConfig::config_dir();
    let config_path = AppConfig::config_path();

    println!("🧭 Wayfarer — First-Time Setup");
    println!("==============================\n");

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
        println!("✅ Created config directory: {}", config_dir.display());
    } else {
        println!("  Config directory exists: {}", config_dir.display());
    }

    if config_path.exists() {
        println!("\n⚠️  Config already exists at: {}", config_path.display());
        println!("   Edit it manually or delete and re-run onboard.\n");
        return Ok(());
    }

    std::fs::write(&config_path, AppConfig::default_toml())?;
    println!("✅ Created config.toml at: {}", config_path.display());
    println!("\n📝 Next steps:");
    println!("   1. Set your API key: export WAYFARER_API_KEY=sk-...");
    println!("      (or add api_key to the config file)");
    println!("   2. Ask a question:   wayfarer agent -m \"What should I see in Paris today?\"");
    println!("   3. Or serve HTTP:    wayfarer gateway");

    Ok(())
}
