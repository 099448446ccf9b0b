//! Interactive conversion session. Reads input changes from the terminal and
//! renders the converter state after each request settles.

use crate::cli::{currencies, ui};
use crate::converter::{ConversionState, Converter, InputChange};
use crate::core::currency::Currency;
use crate::core::rate::RateProvider;
use anyhow::Result;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
Enter an amount to convert, or one of:
  from CODE     change the source currency
  to CODE       change the target currency
  currencies    list supported currencies
  help          show this help
  quit          exit the session";

#[derive(Debug, PartialEq)]
enum Command {
    Change(InputChange),
    Currencies,
    Help,
    Quit,
    Invalid(String),
}

fn parse_command(line: &str) -> Command {
    let mut parts = line.split_whitespace();
    let Some(first) = parts.next() else {
        return Command::Invalid("Enter an amount or a command".to_string());
    };

    match first.to_lowercase().as_str() {
        "quit" | "exit" | "q" => Command::Quit,
        "help" | "?" => Command::Help,
        "currencies" => Command::Currencies,
        "from" | "to" => {
            let Some(code) = parts.next() else {
                return Command::Invalid(format!("Usage: {first} CODE"));
            };
            match code.parse::<Currency>() {
                Ok(currency) if first.eq_ignore_ascii_case("from") => {
                    Command::Change(InputChange::Source(currency))
                }
                Ok(currency) => Command::Change(InputChange::Target(currency)),
                Err(message) => Command::Invalid(message),
            }
        }
        _ => match first.parse::<f64>() {
            Ok(amount) if amount.is_finite() => Command::Change(InputChange::Amount(amount)),
            _ => Command::Invalid(format!(
                "Unrecognized input: {line}. Type `help` for commands."
            )),
        },
    }
}

fn render<P: RateProvider + 'static>(converter: &Converter<P>) {
    let line = ui::output_line(converter.state(), converter.target());
    match converter.state() {
        ConversionState::Failed(_) => {
            println!("{}", ui::style_text(&line, ui::StyleType::Error));
        }
        ConversionState::Converted(conversion) => {
            println!("{}", ui::style_text(&line, ui::StyleType::Value));
            if let Some(as_of) = conversion.as_of {
                println!(
                    "{}",
                    ui::style_text(&format!("rate as of {as_of}"), ui::StyleType::Subtle)
                );
            }
        }
        _ => println!("{line}"),
    }
}

pub async fn run<P: RateProvider + 'static>(mut converter: Converter<P>) -> Result<()> {
    println!("{}", ui::style_text("Currency Converter", ui::StyleType::Title));
    println!(
        "{}",
        ui::style_text(
            &format!(
                "Converting {} to {}. Type `help` for commands.",
                converter.source(),
                converter.target()
            ),
            ui::StyleType::Subtle
        )
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match parse_command(line) {
            Command::Quit => break,
            Command::Help => println!("{HELP}"),
            Command::Currencies => currencies::display_currencies(),
            Command::Invalid(message) => {
                println!("{}", ui::style_text(&message, ui::StyleType::Error));
            }
            Command::Change(change) => {
                converter.apply(change);
                if converter.is_loading() {
                    // Input stays disabled until the request settles.
                    let spinner = ui::new_spinner("Fetching conversion...");
                    converter.wait_settled().await;
                    spinner.finish_and_clear();
                }
                render(&converter);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(
            parse_command("10.5"),
            Command::Change(InputChange::Amount(10.5))
        );
    }

    #[test]
    fn test_parse_currency_selectors() {
        assert_eq!(
            parse_command("from usd"),
            Command::Change(InputChange::Source(Currency::USD))
        );
        assert_eq!(
            parse_command("to BGN"),
            Command::Change(InputChange::Target(Currency::BGN))
        );
    }

    #[test]
    fn test_parse_unsupported_currency() {
        assert!(matches!(parse_command("to GBP"), Command::Invalid(_)));
    }

    #[test]
    fn test_parse_selector_without_code() {
        assert!(matches!(parse_command("from"), Command::Invalid(_)));
    }

    #[test]
    fn test_parse_quit_and_help() {
        assert_eq!(parse_command("quit"), Command::Quit);
        assert_eq!(parse_command("q"), Command::Quit);
        assert_eq!(parse_command("help"), Command::Help);
    }

    #[test]
    fn test_parse_rejects_non_finite_amount() {
        assert!(matches!(parse_command("nan"), Command::Invalid(_)));
        assert!(matches!(parse_command("inf"), Command::Invalid(_)));
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(parse_command("ten euros"), Command::Invalid(_)));
    }
}
