use std::sync::Arc;

pub mod config;
pub mod fatigue;
pub mod gateway;
pub mod store;
pub mod upload;
pub mod view;

pub use config::{load_settings, Settings};
pub use fatigue::{classify, Band};
pub use gateway::{DataGateway, FetchError, HttpDataGateway, UploadError, UploadFile};
pub use store::{DashboardSnapshot, RosterState, RosterStatus, RosterStore, StoreEvent, UploadStatus};
pub use upload::UploadController;
pub use view::{lookup_logo, PitcherCard};

/// One dashboard session: the roster store plus the upload controller that
/// feeds it, both wired to the same gateway.
pub struct Dashboard {
    pub store: Arc<RosterStore>,
    pub uploads: UploadController,
}

impl Dashboard {
    pub fn new(gateway: Arc<dyn DataGateway>) -> Self {
        let store = RosterStore::new(gateway);
        let uploads = UploadController::new(Arc::clone(&store));
        Self { store, uploads }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(Arc::new(HttpDataGateway::new(settings.api_base.as_str())))
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
