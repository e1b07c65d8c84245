use crate::companion::{Companion, OfflineCompanion};
use crate::models::AppData;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub data: Arc<Mutex<AppData>>,
    pub companion: Arc<dyn Companion>,
}

impl AppState {
    pub fn new(data_path: PathBuf, data: AppData) -> Self {
        Self::with_companion(data_path, data, Arc::new(OfflineCompanion))
    }

    pub fn with_companion(data_path: PathBuf, data: AppData, companion: Arc<dyn Companion>) -> Self {
        Self {
            data_path,
            data: Arc::new(Mutex::new(data)),
            companion,
        }
    }
}
