use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use crate::core::rate::{ConversionRequest, RateError, RateProvider, RateQuote};

// FrankfurterProvider implementation for RateProvider
pub struct FrankfurterProvider {
    base_url: String,
}

impl FrankfurterProvider {
    pub fn new(base_url: &str) -> Self {
        FrankfurterProvider {
            base_url: base_url.to_string(),
        }
    }
}

#[derive(Deserialize, Debug)]
struct LatestRatesResponse {
    date: Option<NaiveDate>,
    // A payload without a `rates` object is treated the same as a payload
    // missing the requested currency.
    #[serde(default)]
    rates: HashMap<String, f64>,
}

#[async_trait]
impl RateProvider for FrankfurterProvider {
    #[instrument(
        name = "FrankfurterRateFetch",
        skip(self, cancel),
        fields(source = %request.source, target = %request.target)
    )]
    async fn fetch_rate(
        &self,
        request: ConversionRequest,
        cancel: CancellationToken,
    ) -> Result<RateQuote, RateError> {
        let url = format!("{}/latest", self.base_url);
        debug!("Requesting conversion from {}", url);

        let client = reqwest::Client::builder().user_agent("fxconv/1.0").build()?;
        let send = client
            .get(&url)
            .query(&[
                ("amount", request.amount.to_string()),
                ("from", request.source.to_string()),
                ("to", request.target.to_string()),
            ])
            .send();

        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(RateError::Cancelled),
            response = send => response?,
        };

        let status = response.status();
        if !status.is_success() {
            return Err(RateError::Status(status));
        }

        let text = response.text().await?;
        let data: LatestRatesResponse = serde_json::from_str(&text)?;

        let value = data
            .rates
            .get(request.target.code())
            .copied()
            .ok_or(RateError::MissingRate(request.target))?;

        debug!(value, "Received conversion rate");
        Ok(RateQuote {
            value,
            as_of: data.date,
        })
    }
}
