//! Receiving side of a page request.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures_util::Stream;
use tokio::sync::mpsc;

use super::state::{ExchangePage, LoadState};

/// Ordered emissions of one page request.
///
/// Ends after the terminal state, or without one when the request was
/// superseded or cancelled.
#[derive(Debug)]
pub struct ExchangeFeed {
    rx: mpsc::Receiver<LoadState<ExchangePage>>,
}

impl ExchangeFeed {
    pub(crate) fn new(rx: mpsc::Receiver<LoadState<ExchangePage>>) -> Self {
        Self { rx }
    }

    /// Wait for the next emission; `None` once the feed has ended.
    pub async fn next(&mut self) -> Option<LoadState<ExchangePage>> {
        self.rx.recv().await
    }

    /// Drain every remaining emission.
    pub async fn collect(mut self) -> Vec<LoadState<ExchangePage>> {
        let mut states = Vec::new();
        while let Some(state) = self.rx.recv().await {
            states.push(state);
        }
        states
    }

    /// Drain the feed and return only its last emission.
    pub async fn last(mut self) -> Option<LoadState<ExchangePage>> {
        let mut last = None;
        while let Some(state) = self.rx.recv().await {
            last = Some(state);
        }
        last
    }
}

impl Stream for ExchangeFeed {
    type Item = LoadState<ExchangePage>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}
