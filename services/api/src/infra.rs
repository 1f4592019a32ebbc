use job_board::board::{EventSink, JobBoard, Stores, TracingEventSink};
use job_board::config::StorageConfig;
use job_board::identity::{Clock, SystemClock};
use job_board::store::StoreError;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Open the configured store set: JSON files under `data_dir`, or memory when unset.
pub(crate) fn open_stores(storage: &StorageConfig) -> Result<Stores, StoreError> {
    match &storage.data_dir {
        Some(dir) => {
            info!(data_dir = %dir.display(), "opening file-backed entity stores");
            Stores::open_dir(dir)
        }
        None => {
            info!("using in-memory entity stores; data is lost on shutdown");
            Ok(Stores::in_memory())
        }
    }
}

pub(crate) fn build_board(stores: Stores) -> JobBoard {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock::new());
    let events: Arc<dyn EventSink> = Arc::new(TracingEventSink);
    JobBoard::new(stores, clock, events)
}
