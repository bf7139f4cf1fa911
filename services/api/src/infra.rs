use hireflow::workflows::documents::{
    DocumentCatalog, NotifyError, StatusChangeEvent, StatusNotifier,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) catalog: Arc<DocumentCatalog>,
}

/// Sink retaining every delivered event so the CLI demo can show what
/// downstream consumers would receive.
#[derive(Default, Clone)]
pub(crate) struct RecordingStatusSink {
    events: Arc<Mutex<Vec<StatusChangeEvent>>>,
}

impl StatusNotifier for RecordingStatusSink {
    fn notify(&self, event: &StatusChangeEvent) -> Result<(), NotifyError> {
        let mut guard = self.events.lock().expect("sink mutex poisoned");
        guard.push(event.clone());
        Ok(())
    }
}

impl RecordingStatusSink {
    pub(crate) fn events(&self) -> Vec<StatusChangeEvent> {
        self.events.lock().expect("sink mutex poisoned").clone()
    }
}
