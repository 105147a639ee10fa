// Application state module
// Read-only state shared by every connection task

use super::types::Config;
use crate::routing::RouteTable;

/// Application state
pub struct AppState {
    pub config: Config,
    pub routes: RouteTable,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            routes: RouteTable::application(),
        }
    }
}
