//! HTTP API for the campus chatbot

mod handlers;
mod sse;
mod types;

pub use handlers::create_router;

use crate::agents::DemoInfo;
use crate::runtime::TurnDriver;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub driver: Arc<TurnDriver>,
    pub demo: Arc<DemoInfo>,
}

impl AppState {
    pub fn new(driver: TurnDriver, demo: DemoInfo) -> Self {
        Self {
            driver: Arc::new(driver),
            demo: Arc::new(demo),
        }
    }
}
