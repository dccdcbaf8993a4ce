use anyhow::Result;
use eventdesk_core::config::Config;
use owo_colors::OwoColorize;

pub fn run(config: &Config) -> Result<()> {
    let config_path = Config::config_path()?;

    if !config_path.exists() {
        Config::create_default_config(&config_path)?;
        println!("{}", format!("Created {}", config_path.display()).green());
        println!();
    }

    println!("{}", "Paths".bold());
    println!("  Config:         {}", config_path.display());
    println!();
    println!("{}", "Values".bold());
    println!("  api_base:       {}", config.api_base);
    println!("  use_test_data:  {}", config.use_test_data);
    println!("  log_level:      {}", config.log_level);

    Ok(())
}
