//! One-shot conversion command.

use crate::cli::ui;
use crate::converter::{ConversionState, Converter, InputChange};
use crate::core::currency::Currency;
use crate::core::rate::RateProvider;
use anyhow::Result;
use std::sync::Arc;

pub async fn run<P: RateProvider + 'static>(
    provider: Arc<P>,
    amount: f64,
    from: Currency,
    to: Currency,
) -> Result<()> {
    let mut converter = Converter::new(provider, from, to);
    converter.apply(InputChange::Amount(amount));
    converter.wait_settled().await;

    match converter.state() {
        ConversionState::Converted(conversion) => {
            println!(
                "{}",
                ui::style_text(
                    &ui::output_line(converter.state(), to),
                    ui::StyleType::Value
                )
            );
            if let Some(as_of) = conversion.as_of {
                println!(
                    "{}",
                    ui::style_text(&format!("rate as of {as_of}"), ui::StyleType::Subtle)
                );
            }
            Ok(())
        }
        ConversionState::Failed(message) => anyhow::bail!("{message}"),
        state => unreachable!("conversion settled in unexpected state: {state:?}"),
    }
}
