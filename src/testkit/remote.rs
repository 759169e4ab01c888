//! Scripted [`RemoteSource`] for testing.
//!
//! Listing calls pop the next [`ListScript`] from a queue and fall back to a
//! default once the queue is empty. Detail and asset calls are scripted per
//! exchange id; unscripted ids succeed with
//! [`detail_for`](super::domain::detail_for) and no assets.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::domain::detail_for;
use crate::domain::{CurrencyQuote, ExchangeDetail, ExchangeId, ExchangeStub};
use crate::error::{Error, Result};
use crate::port::outbound::RemoteSource;

/// Behavior of one listing call.
#[derive(Debug, Clone)]
pub enum ListScript {
    Stubs(Vec<ExchangeStub>),
    /// Fail with a transport error carrying this status.
    Fail(Option<u16>),
    /// Wait, then return the stubs.
    Delayed(Duration, Vec<ExchangeStub>),
}

/// Behavior of a detail call for one id.
#[derive(Debug, Clone)]
pub enum DetailScript {
    Detail(ExchangeDetail),
    Fail(Option<u16>),
    NotFound,
    /// Wait, then return the default detail.
    Delay(Duration),
}

/// Behavior of an assets call for one id.
#[derive(Debug, Clone)]
pub enum AssetScript {
    Quotes(Vec<CurrencyQuote>),
    Fail(Option<u16>),
}

fn scripted_failure(status: Option<u16>) -> Error {
    Error::Transport {
        status,
        message: "scripted failure".to_string(),
    }
}

/// A remote source with scripted results and call counters.
pub struct ScriptedRemote {
    list_queue: Mutex<VecDeque<ListScript>>,
    default_list: ListScript,
    details: HashMap<u64, DetailScript>,
    assets: HashMap<u64, AssetScript>,
    list_calls: AtomicU32,
    detail_calls: AtomicU32,
    completed_detail_calls: AtomicU32,
    asset_calls: AtomicU32,
}

impl ScriptedRemote {
    pub fn new() -> Self {
        Self {
            list_queue: Mutex::new(VecDeque::new()),
            default_list: ListScript::Stubs(Vec::new()),
            details: HashMap::new(),
            assets: HashMap::new(),
            list_calls: AtomicU32::new(0),
            detail_calls: AtomicU32::new(0),
            completed_detail_calls: AtomicU32::new(0),
            asset_calls: AtomicU32::new(0),
        }
    }

    /// Every listing call returns these stubs.
    pub fn with_list(mut self, stubs: Vec<ExchangeStub>) -> Self {
        self.default_list = ListScript::Stubs(stubs);
        self
    }

    /// Every listing call fails with this status.
    pub fn with_list_failure(mut self, status: Option<u16>) -> Self {
        self.default_list = ListScript::Fail(status);
        self
    }

    /// Script successive listing calls; the default applies afterwards.
    pub fn with_list_sequence(self, scripts: Vec<ListScript>) -> Self {
        if let Ok(mut queue) = self.list_queue.lock() {
            queue.extend(scripts);
        }
        self
    }

    pub fn with_detail(mut self, id: u64, script: DetailScript) -> Self {
        self.details.insert(id, script);
        self
    }

    pub fn with_assets(mut self, id: u64, script: AssetScript) -> Self {
        self.assets.insert(id, script);
        self
    }

    pub fn list_calls(&self) -> u32 {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Detail calls that started.
    pub fn detail_calls(&self) -> u32 {
        self.detail_calls.load(Ordering::SeqCst)
    }

    /// Detail calls that ran to completion (success or scripted failure).
    pub fn completed_detail_calls(&self) -> u32 {
        self.completed_detail_calls.load(Ordering::SeqCst)
    }

    pub fn asset_calls(&self) -> u32 {
        self.asset_calls.load(Ordering::SeqCst)
    }

    fn next_list_script(&self) -> ListScript {
        self.list_queue
            .lock()
            .ok()
            .and_then(|mut queue| queue.pop_front())
            .unwrap_or_else(|| self.default_list.clone())
    }
}

impl Default for ScriptedRemote {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteSource for ScriptedRemote {
    async fn list_exchanges(&self, _offset: u64, _limit: u32) -> Result<Vec<ExchangeStub>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        match self.next_list_script() {
            ListScript::Stubs(stubs) => Ok(stubs),
            ListScript::Fail(status) => Err(scripted_failure(status)),
            ListScript::Delayed(delay, stubs) => {
                tokio::time::sleep(delay).await;
                Ok(stubs)
            }
        }
    }

    async fn exchange_detail(&self, id: u64) -> Result<ExchangeDetail> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        let result = match self.details.get(&id) {
            None => Ok(detail_for(id)),
            Some(DetailScript::Detail(detail)) => Ok(detail.clone()),
            Some(DetailScript::Fail(status)) => Err(scripted_failure(*status)),
            Some(DetailScript::NotFound) => Err(Error::NotFound {
                id: ExchangeId::from(id),
            }),
            Some(DetailScript::Delay(delay)) => {
                tokio::time::sleep(*delay).await;
                Ok(detail_for(id))
            }
        };
        self.completed_detail_calls.fetch_add(1, Ordering::SeqCst);
        result
    }

    async fn exchange_assets(&self, id: u64) -> Result<Vec<CurrencyQuote>> {
        self.asset_calls.fetch_add(1, Ordering::SeqCst);
        match self.assets.get(&id) {
            None => Ok(Vec::new()),
            Some(AssetScript::Quotes(quotes)) => Ok(quotes.clone()),
            Some(AssetScript::Fail(status)) => Err(scripted_failure(*status)),
        }
    }

    fn source_name(&self) -> &'static str {
        "scripted"
    }
}
