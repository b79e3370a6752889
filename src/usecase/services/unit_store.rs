use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::entities::unit::Unit;
use crate::usecase::ports::unit_source::{FetchError, UnitSource};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(FetchError),
}

/// Holds the collection delivered by the last successful fetch.
pub struct UnitStore {
    source: Arc<dyn UnitSource>,
    units: Vec<Unit>,
    load_state: LoadState,
}

impl UnitStore {
    pub fn new(source: Arc<dyn UnitSource>) -> Self {
        Self {
            source,
            units: Vec::new(),
            load_state: LoadState::Loading,
        }
    }

    pub fn source(&self) -> Arc<dyn UnitSource> {
        self.source.clone()
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn is_loading(&self) -> bool {
        self.load_state == LoadState::Loading
    }

    pub fn begin_fetch(&mut self) {
        self.load_state = LoadState::Loading;
    }

    /// Success replaces the whole collection; failure keeps what was held.
    pub fn apply_fetch(&mut self, result: Result<Vec<Unit>, FetchError>) -> Result<&[Unit], FetchError> {
        match result {
            Ok(units) => {
                info!(units = units.len(), "units loaded");
                self.units = units;
                self.load_state = LoadState::Ready;
                Ok(&self.units)
            }
            Err(err) => {
                warn!(kind = err.kind(), error = %err, kept = self.units.len(), "units fetch failed");
                self.load_state = LoadState::Failed(err.clone());
                Err(err)
            }
        }
    }

    pub async fn fetch_all(&mut self) -> Result<&[Unit], FetchError> {
        self.begin_fetch();
        let result = self.source.fetch_all().await;
        self.apply_fetch(result)
    }

    /// Manual refetch, offered after a failed load.
    pub async fn refresh(&mut self) -> Result<&[Unit], FetchError> {
        info!("refreshing units");
        self.fetch_all().await
    }
}
