use std::sync::Arc;

use aqscreen_instruments::narrative::{NarrativeStrategy, TemplateNarrative};
use aqscreen_instruments::ScreeningEngine;
use aqscreen_storage::objects::ObjectStore;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ScreeningEngine>,
    pub store: Arc<dyn ObjectStore>,
    pub narrative: Arc<dyn NarrativeStrategy>,
}

impl AppState {
    pub fn new(engine: ScreeningEngine, store: Arc<dyn ObjectStore>) -> Self {
        Self {
            engine: Arc::new(engine),
            store,
            narrative: Arc::new(TemplateNarrative),
        }
    }

    pub fn with_narrative(mut self, narrative: impl NarrativeStrategy + 'static) -> Self {
        self.narrative = Arc::new(narrative);
        self
    }
}
