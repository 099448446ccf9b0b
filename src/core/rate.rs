//! Conversion rate abstractions and core types

use crate::core::currency::Currency;
use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// A single conversion request. Immutable once issued; a newer request
/// supersedes it and cancels its network call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionRequest {
    pub amount: f64,
    pub source: Currency,
    pub target: Currency,
}

/// A rate reported by the exchange-rate service for a conversion request.
/// The service applies the requested amount, so `value` is the converted
/// total rather than a unit rate.
#[derive(Debug, Clone, PartialEq)]
pub struct RateQuote {
    pub value: f64,
    pub as_of: Option<NaiveDate>,
}

#[derive(Debug, Error)]
pub enum RateError {
    #[error("request cancelled")]
    Cancelled,

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("rate service returned {0}")]
    Status(reqwest::StatusCode),

    #[error("failed to decode rate response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("no rate for {0} in response")]
    MissingRate(Currency),
}

#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Fetches the converted amount for the request. Must return
    /// `RateError::Cancelled` promptly once the token is cancelled.
    async fn fetch_rate(
        &self,
        request: ConversionRequest,
        cancel: CancellationToken,
    ) -> Result<RateQuote, RateError>;
}
