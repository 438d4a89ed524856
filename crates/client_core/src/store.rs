use std::sync::Arc;

use shared::{
    domain::{Pitcher, Roster},
    protocol::RosterQuery,
};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

use crate::{gateway::DataGateway, view::PitcherCard};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RosterStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UploadStatus {
    #[default]
    Idle,
    Uploading,
    Succeeded(String),
    Failed(String),
}

/// Session state behind the dashboard. `status` moves only with the fetch
/// lifecycle and `upload_status` only with the upload lifecycle.
#[derive(Debug, Clone, Default)]
pub struct RosterState {
    pub roster: Roster,
    pub search_term: String,
    pub status: RosterStatus,
    pub upload_status: UploadStatus,
    pub last_query: RosterQuery,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    StatusChanged(RosterStatus),
    RosterReplaced { pitchers: usize },
    UploadStatusChanged(UploadStatus),
    SearchTermChanged(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub status: RosterStatus,
    pub upload_status: UploadStatus,
    pub search_term: String,
    pub total_pitchers: usize,
    pub cards: Vec<PitcherCard>,
}

/// Case-insensitive substring match on `name`, keeping roster order.
pub fn filter_by_name<'a>(roster: &'a [Pitcher], search_term: &str) -> Vec<&'a Pitcher> {
    let needle = search_term.to_lowercase();
    roster
        .iter()
        .filter(|pitcher| pitcher.name.to_lowercase().contains(&needle))
        .collect()
}

pub struct RosterStore {
    gateway: Arc<dyn DataGateway>,
    inner: Mutex<RosterState>,
    events: broadcast::Sender<StoreEvent>,
}

impl RosterStore {
    pub fn new(gateway: Arc<dyn DataGateway>) -> Arc<Self> {
        let (events, _) = broadcast::channel(64);
        Arc::new(Self {
            gateway,
            inner: Mutex::new(RosterState::default()),
            events,
        })
    }

    pub fn gateway(&self) -> Arc<dyn DataGateway> {
        Arc::clone(&self.gateway)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    fn emit(&self, event: StoreEvent) {
        let _ = self.events.send(event);
    }

    /// Re-runs the fetch lifecycle with the last query used.
    pub async fn refresh(&self) -> RosterStatus {
        let query = self.inner.lock().await.last_query.clone();
        self.run_fetch(query).await
    }

    pub async fn refresh_with(&self, query: RosterQuery) -> RosterStatus {
        self.inner.lock().await.last_query = query.clone();
        self.run_fetch(query).await
    }

    // The lock is released while the request is in flight, so overlapping
    // refreshes race and whichever finishes last wins.
    async fn run_fetch(&self, query: RosterQuery) -> RosterStatus {
        self.inner.lock().await.status = RosterStatus::Loading;
        self.emit(StoreEvent::StatusChanged(RosterStatus::Loading));
        info!(filtered = !query.is_empty(), "roster: refresh started");

        let result = self.gateway.fetch_roster_with(&query).await;

        let mut guard = self.inner.lock().await;
        match result {
            Ok(roster) => {
                let pitchers = roster.len();
                guard.roster = roster;
                guard.status = RosterStatus::Loaded;
                drop(guard);
                info!(pitchers, "roster: refresh loaded");
                self.emit(StoreEvent::RosterReplaced { pitchers });
                self.emit(StoreEvent::StatusChanged(RosterStatus::Loaded));
                RosterStatus::Loaded
            }
            Err(err) => {
                let status = RosterStatus::Failed(err.to_string());
                guard.status = status.clone();
                let kept = guard.roster.len();
                drop(guard);
                warn!(error = %err, kept_pitchers = kept, "roster: refresh failed; keeping previous roster");
                self.emit(StoreEvent::StatusChanged(status.clone()));
                status
            }
        }
    }

    pub async fn set_search_term(&self, search_term: impl Into<String>) {
        let search_term = search_term.into();
        self.inner.lock().await.search_term = search_term.clone();
        debug!(%search_term, "roster: search term updated");
        self.emit(StoreEvent::SearchTermChanged(search_term));
    }

    pub(crate) async fn set_upload_status(&self, upload_status: UploadStatus) {
        self.inner.lock().await.upload_status = upload_status.clone();
        self.emit(StoreEvent::UploadStatusChanged(upload_status));
    }

    pub async fn visible_pitchers(&self) -> Vec<Pitcher> {
        let guard = self.inner.lock().await;
        filter_by_name(&guard.roster, &guard.search_term)
            .into_iter()
            .cloned()
            .collect()
    }

    pub async fn visible_cards(&self) -> Vec<PitcherCard> {
        let guard = self.inner.lock().await;
        filter_by_name(&guard.roster, &guard.search_term)
            .into_iter()
            .map(PitcherCard::from_pitcher)
            .collect()
    }

    pub async fn snapshot(&self) -> DashboardSnapshot {
        let guard = self.inner.lock().await;
        DashboardSnapshot {
            status: guard.status.clone(),
            upload_status: guard.upload_status.clone(),
            search_term: guard.search_term.clone(),
            total_pitchers: guard.roster.len(),
            cards: filter_by_name(&guard.roster, &guard.search_term)
                .into_iter()
                .map(PitcherCard::from_pitcher)
                .collect(),
        }
    }

    pub async fn state(&self) -> RosterState {
        self.inner.lock().await.clone()
    }

    pub async fn status(&self) -> RosterStatus {
        self.inner.lock().await.status.clone()
    }

    pub async fn upload_status(&self) -> UploadStatus {
        self.inner.lock().await.upload_status.clone()
    }

    pub async fn roster(&self) -> Roster {
        self.inner.lock().await.roster.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Roster {
        vec![
            Pitcher::new("Edwin Diaz", "Mets", "R", 88.0),
            Pitcher::new("Jose Alvarado", "Phillies", "L", 41.0),
            Pitcher::new("Ryan Diaz-Helsley", "Brewers", "R", 93.0),
        ]
    }

    fn names(pitchers: Vec<&Pitcher>) -> Vec<&str> {
        pitchers.into_iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn empty_search_returns_everything_in_order() {
        let roster = roster();
        assert_eq!(
            names(filter_by_name(&roster, "")),
            vec!["Edwin Diaz", "Jose Alvarado", "Ryan Diaz-Helsley"]
        );
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let roster = roster();
        assert_eq!(
            names(filter_by_name(&roster, "diaz")),
            vec!["Edwin Diaz", "Ryan Diaz-Helsley"]
        );
        assert_eq!(
            names(filter_by_name(&roster, "iaz")),
            vec!["Edwin Diaz", "Ryan Diaz-Helsley"]
        );
        assert_eq!(names(filter_by_name(&roster, "ALVA")), vec!["Jose Alvarado"]);
        assert!(filter_by_name(&roster, "Hader").is_empty());
    }

    #[test]
    fn search_does_not_consider_team() {
        let roster = roster();
        assert!(filter_by_name(&roster, "Mets").is_empty());
    }
}
