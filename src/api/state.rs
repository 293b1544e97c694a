use std::sync::Arc;

use crate::enrich::TextEnricher;
use crate::store::StatStore;
use crate::telemetry::TelemetrySource;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<StatStore>,
    pub telemetry: Arc<dyn TelemetrySource>,
    pub enricher: Arc<TextEnricher>,
}
