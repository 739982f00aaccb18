use anyhow::Result;
use apptsync_core::ApptsyncConfig;
use apptsync_core::cache::DurableCache;
use owo_colors::OwoColorize;

pub fn run(server_override: Option<String>) -> Result<()> {
    let config_path = ApptsyncConfig::config_path()?;
    let mut config = ApptsyncConfig::load()?;
    if let Some(url) = server_override {
        config.server_url = url;
    }
    let cache = config.cache();

    println!("{}", "Paths".bold());
    println!("  Config:         {}", config_path.display());
    println!(
        "  Cache:          {}",
        cache.store().path_for(apptsync_core::constants::CACHE_KEY).display()
    );

    println!("\n{}", "Effective settings".bold());
    for line in config.to_toml()?.lines() {
        println!("  {line}");
    }

    let cached = cache.load().map(|list| list.len()).unwrap_or(0);
    println!("\n{}", format!("{cached} appointment(s) cached").dimmed());

    Ok(())
}
