//! The conversion engine: holds the current inputs, issues rate requests and
//! settles their results.
//!
//! Every input change supersedes the pending request, if any. Supersession is
//! enforced twice: the pending request's cancellation token is cancelled so
//! the network call aborts promptly, and each request carries a sequence
//! number that must still match when its settlement arrives. A settlement for
//! a superseded request is discarded without a state change.

use crate::core::currency::Currency;
use crate::core::rate::{ConversionRequest, RateError, RateProvider, RateQuote};
use chrono::NaiveDate;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

pub const FETCH_FAILED_MESSAGE: &str = "Something went wrong while fetching the amount!";
pub const MISSING_RATE_MESSAGE: &str = "No amount found!";

/// A change to one of the converter inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputChange {
    Amount(f64),
    Source(Currency),
    Target(Currency),
}

/// A settled conversion, ready to display.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub value: f64,
    pub currency: Currency,
    pub as_of: Option<NaiveDate>,
}

/// Visible state of the converter. Exactly one of these is rendered at any
/// time.
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionState {
    Idle,
    Loading,
    Converted(Conversion),
    Failed(String),
}

struct Inflight {
    seq: u64,
    token: CancellationToken,
}

struct Settlement {
    seq: u64,
    request: ConversionRequest,
    result: Result<RateQuote, RateError>,
}

pub struct Converter<P> {
    provider: Arc<P>,
    amount: Option<f64>,
    source: Currency,
    target: Currency,
    state: ConversionState,
    seq: u64,
    inflight: Option<Inflight>,
    settled_tx: mpsc::UnboundedSender<Settlement>,
    settled_rx: mpsc::UnboundedReceiver<Settlement>,
}

impl<P: RateProvider + 'static> Converter<P> {
    pub fn new(provider: Arc<P>, source: Currency, target: Currency) -> Self {
        let (settled_tx, settled_rx) = mpsc::unbounded_channel();
        Converter {
            provider,
            amount: None,
            source,
            target,
            state: ConversionState::Idle,
            seq: 0,
            inflight: None,
            settled_tx,
            settled_rx,
        }
    }

    pub fn state(&self) -> &ConversionState {
        &self.state
    }

    pub fn source(&self) -> Currency {
        self.source
    }

    pub fn target(&self) -> Currency {
        self.target
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ConversionState::Loading)
    }

    /// Input controls are disabled while a request is loading.
    pub fn inputs_enabled(&self) -> bool {
        !self.is_loading()
    }

    /// Applies an input change and issues the resulting conversion request.
    pub fn apply(&mut self, change: InputChange) {
        // Settlements that raced with this input are committed first, in
        // arrival order, as the event loop would have done.
        while let Ok(settled) = self.settled_rx.try_recv() {
            self.commit(settled);
        }

        match change {
            InputChange::Amount(amount) => self.amount = Some(amount),
            InputChange::Source(source) => self.source = source,
            InputChange::Target(target) => self.target = target,
        }
        self.refresh();
    }

    /// Waits until the current request settles. Returns immediately when no
    /// request is loading.
    pub async fn wait_settled(&mut self) {
        while self.is_loading() {
            match self.settled_rx.recv().await {
                Some(settled) => self.commit(settled),
                None => break,
            }
        }
    }

    fn refresh(&mut self) {
        if let Some(inflight) = self.inflight.take() {
            debug!(seq = inflight.seq, "Cancelling superseded request");
            inflight.token.cancel();
        }

        let Some(amount) = self.amount else {
            // No amount entered yet; nothing to convert.
            self.state = ConversionState::Idle;
            return;
        };

        if self.source == self.target {
            // Identity conversion, no network call.
            self.state = ConversionState::Converted(Conversion {
                value: amount,
                currency: self.target,
                as_of: None,
            });
            return;
        }

        self.seq += 1;
        let seq = self.seq;
        let token = CancellationToken::new();
        let request = ConversionRequest {
            amount,
            source: self.source,
            target: self.target,
        };
        debug!(seq, ?request, "Issuing conversion request");

        self.state = ConversionState::Loading;
        self.inflight = Some(Inflight {
            seq,
            token: token.clone(),
        });

        let provider = Arc::clone(&self.provider);
        let settled_tx = self.settled_tx.clone();
        tokio::spawn(async move {
            let result = provider.fetch_rate(request, token).await;
            // The receiver lives as long as the converter; a send failure
            // just means the session ended.
            let _ = settled_tx.send(Settlement {
                seq,
                request,
                result,
            });
        });
    }

    fn commit(&mut self, settled: Settlement) {
        let current = self.inflight.as_ref().map(|inflight| inflight.seq);
        if current != Some(settled.seq) {
            debug!(seq = settled.seq, "Discarding superseded settlement");
            return;
        }

        match settled.result {
            Err(RateError::Cancelled) => {
                debug!(seq = settled.seq, "Discarding cancelled settlement");
                return;
            }
            Ok(quote) => {
                self.state = ConversionState::Converted(Conversion {
                    value: quote.value,
                    currency: settled.request.target,
                    as_of: quote.as_of,
                });
            }
            Err(RateError::MissingRate(currency)) => {
                debug!(%currency, "Response had no rate for target currency");
                self.state = ConversionState::Failed(MISSING_RATE_MESSAGE.to_string());
            }
            Err(err) => {
                debug!(error = %err, "Conversion request failed");
                self.state = ConversionState::Failed(FETCH_FAILED_MESSAGE.to_string());
            }
        }
        self.inflight = None;
    }
}
