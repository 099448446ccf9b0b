pub mod cli;
pub mod converter;
pub mod core;
pub mod providers;

use crate::converter::Converter;
use crate::core::config::AppConfig;
use crate::core::currency::Currency;
use crate::providers::frankfurter::FrankfurterProvider;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

pub enum AppCommand {
    Interactive,
    Convert {
        amount: f64,
        from: Currency,
        to: Currency,
    },
    Currencies,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Currency converter starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Currencies => {
            cli::currencies::display_currencies();
            Ok(())
        }
        AppCommand::Convert { amount, from, to } => {
            let provider = Arc::new(FrankfurterProvider::new(&config.provider.base_url));
            cli::convert::run(provider, amount, from, to).await
        }
        AppCommand::Interactive => {
            let (source, target) = config.currency_pair()?;
            let provider = Arc::new(FrankfurterProvider::new(&config.provider.base_url));
            cli::session::run(Converter::new(provider, source, target)).await
        }
    }
}
