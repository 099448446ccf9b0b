use std::fs;
use tracing::info;

use fxconv::core::currency::Currency;

mod test_utils {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub async fn create_rate_mock_server(mock_response: &str) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/latest"))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        mock_server
    }

    pub fn write_config(base_url: &str) -> tempfile::NamedTempFile {
        let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        let config_content = format!(
            r#"
provider:
  base_url: {base_url}
source: "EUR"
target: "BGN"
"#
        );
        std::fs::write(config_file.path(), &config_content).expect("Failed to write config file");
        config_file
    }
}

#[test_log::test(tokio::test)]
async fn test_convert_command_with_mock() {
    let mock_response = r#"{
        "amount": 10.0,
        "base": "EUR",
        "date": "2024-05-31",
        "rates": { "BGN": 19.56 }
    }"#;
    let mock_server = test_utils::create_rate_mock_server(mock_response).await;
    let config_file = test_utils::write_config(&mock_server.uri());

    info!("Running convert against mock rate service");
    let result = fxconv::run_command(
        fxconv::AppCommand::Convert {
            amount: 10.0,
            from: Currency::EUR,
            to: Currency::BGN,
        },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;

    assert!(
        result.is_ok(),
        "Convert command failed with: {:?}",
        result.err()
    );
}

#[test_log::test(tokio::test)]
async fn test_identity_conversion_needs_no_service() {
    // Deliberately unreachable base URL; the identity path must not touch it.
    let config_file = test_utils::write_config("http://127.0.0.1:1");

    let result = fxconv::run_command(
        fxconv::AppCommand::Convert {
            amount: 42.0,
            from: Currency::USD,
            to: Currency::USD,
        },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;

    assert!(
        result.is_ok(),
        "Identity conversion failed with: {:?}",
        result.err()
    );
}

#[test_log::test(tokio::test)]
async fn test_missing_rate_reports_no_amount_found() {
    let mock_response = r#"{
        "amount": 10.0,
        "base": "EUR",
        "date": "2024-05-31",
        "rates": { "USD": 10.85 }
    }"#;
    let mock_server = test_utils::create_rate_mock_server(mock_response).await;
    let config_file = test_utils::write_config(&mock_server.uri());

    let result = fxconv::run_command(
        fxconv::AppCommand::Convert {
            amount: 10.0,
            from: Currency::EUR,
            to: Currency::BGN,
        },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;

    let err = result.expect_err("Conversion should fail without a BGN rate");
    assert_eq!(err.to_string(), "No amount found!");
}

#[test_log::test(tokio::test)]
async fn test_service_error_reports_fetch_failure() {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/latest"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    let config_file = test_utils::write_config(&mock_server.uri());

    let result = fxconv::run_command(
        fxconv::AppCommand::Convert {
            amount: 10.0,
            from: Currency::EUR,
            to: Currency::BGN,
        },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;

    let err = result.expect_err("Conversion should fail on a server error");
    assert_eq!(
        err.to_string(),
        "Something went wrong while fetching the amount!"
    );
}

#[test_log::test(tokio::test)]
async fn test_currencies_command() {
    let config_file = test_utils::write_config("http://127.0.0.1:1");

    let result = fxconv::run_command(
        fxconv::AppCommand::Currencies,
        Some(config_file.path().to_str().unwrap()),
    )
    .await;

    assert!(result.is_ok());
}

#[test_log::test(tokio::test)]
async fn test_invalid_config_currency_fails() {
    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let config_content = r#"
source: "ZZZ"
target: "BGN"
"#;
    fs::write(config_file.path(), config_content).expect("Failed to write config file");

    let config =
        fxconv::core::config::AppConfig::load_from_path(config_file.path()).expect("parse");
    let result = config.currency_pair();
    assert!(result.is_err());
}
