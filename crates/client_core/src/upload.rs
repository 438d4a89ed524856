use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::{
    gateway::{DataGateway, UploadFile},
    store::{RosterStatus, RosterStore, UploadStatus},
};

pub const UPLOAD_SUCCESS_MESSAGE: &str = "Upload successful! Reloading data...";

/// Drives one upload attempt at a time through the store's upload status.
/// Submissions are not serialized; concurrent attempts race.
pub struct UploadController {
    store: Arc<RosterStore>,
    gateway: Arc<dyn DataGateway>,
}

impl UploadController {
    pub fn new(store: Arc<RosterStore>) -> Self {
        let gateway = store.gateway();
        Self { store, gateway }
    }

    /// A missing file leaves every piece of state untouched. The file is only
    /// borrowed, so the caller can submit it again right away.
    pub async fn submit(&self, file: Option<&UploadFile>) -> UploadStatus {
        let Some(file) = file else {
            debug!("upload: no file selected; ignoring submit");
            return self.store.upload_status().await;
        };

        self.store.set_upload_status(UploadStatus::Uploading).await;
        info!(file_name = %file.file_name, "upload: submitting");

        match self.gateway.upload(file).await {
            Ok(ack) => {
                let status = UploadStatus::Succeeded(UPLOAD_SUCCESS_MESSAGE.to_string());
                self.store.set_upload_status(status.clone()).await;
                info!(
                    server_message = ack.message.as_deref().unwrap_or_default(),
                    "upload: accepted; refreshing roster"
                );
                // Refresh failures land in the roster status only.
                if let RosterStatus::Failed(reason) = self.store.refresh().await {
                    warn!(%reason, "upload: post-upload refresh failed");
                }
                status
            }
            Err(err) => {
                let status = UploadStatus::Failed(err.to_string());
                self.store.set_upload_status(status.clone()).await;
                warn!(error = %err, "upload: rejected");
                status
            }
        }
    }
}
