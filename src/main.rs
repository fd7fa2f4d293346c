use anyhow::Result;
use syncpanel::config::Config;
use syncpanel::logger::Logger;
use syncpanel::ui;

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::args().nth(1).as_deref() == Some("--generate-config") {
        let path = Config::get_default_config_path()?;
        return Config::generate_default_config(&path);
    }

    let config = Config::load()?;
    let logger = Logger::from_config(&config.logging);
    logger.install(&config.logging)?;

    // Run the TUI application
    ui::run_app(&config, logger).await
}
