use crate::models::{AppData, StatsSnapshot};
use crate::stats;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

/// Durable journal data together with the snapshot derived from it.
///
/// The snapshot is a cache, nothing more: every mutation of `data` must be
/// followed by `refresh_stats` before the lock is released.
pub struct Store {
    pub data: AppData,
    pub stats: StatsSnapshot,
}

impl Store {
    pub fn new(data: AppData) -> Self {
        let stats = stats::compute(&data.entries);
        Self { data, stats }
    }

    pub fn refresh_stats(&mut self) {
        self.stats = stats::compute(&self.data.entries);
    }
}

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub store: Arc<Mutex<Store>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, data: AppData) -> Self {
        Self {
            data_path,
            store: Arc::new(Mutex::new(Store::new(data))),
        }
    }
}
