//! Plain-text and JSON rendering of dashboard snapshots.

use std::fmt::Write;

use client_core::{DashboardSnapshot, PitcherCard, RosterStatus, UploadStatus};
use serde_json::json;

const GAUGE_CELLS: usize = 20;
const REST_ADVISORY: &str = "! High fatigue - consider rest";

pub fn roster_status_line(status: &RosterStatus) -> Option<String> {
    match status {
        RosterStatus::Idle | RosterStatus::Loaded => None,
        RosterStatus::Loading => Some("Loading...".to_string()),
        RosterStatus::Failed(message) => Some(message.clone()),
    }
}

pub fn upload_status_line(status: &UploadStatus) -> Option<String> {
    match status {
        UploadStatus::Idle => None,
        UploadStatus::Uploading => Some("Uploading...".to_string()),
        UploadStatus::Succeeded(message) | UploadStatus::Failed(message) => Some(message.clone()),
    }
}

pub fn gauge(width_percent: f64) -> String {
    let filled = ((width_percent / 100.0) * GAUGE_CELLS as f64).round() as usize;
    let filled = filled.min(GAUGE_CELLS);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(GAUGE_CELLS - filled))
}

pub fn render_card(card: &PitcherCard) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}  [{}]  {}", card.name, card.handedness, card.team);
    let _ = writeln!(
        out,
        "  fatigue {} {}%  ({}, {})",
        gauge(card.bar_width_percent),
        card.fatigue,
        card.band,
        card.band.color()
    );
    let _ = writeln!(out, "  logo: {}", card.logo_url);
    if card.rest_advisory {
        let _ = writeln!(out, "  {REST_ADVISORY}");
    }
    out
}

pub fn render_dashboard(snapshot: &DashboardSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Bullpen Usage & Fatigue Tracker");
    if let Some(line) = upload_status_line(&snapshot.upload_status) {
        let _ = writeln!(out, "Upload: {line}");
    }
    if let Some(line) = roster_status_line(&snapshot.status) {
        let _ = writeln!(out, "{line}");
    }
    if !snapshot.search_term.is_empty() {
        let _ = writeln!(
            out,
            "Search: \"{}\" ({} of {} pitchers)",
            snapshot.search_term,
            snapshot.cards.len(),
            snapshot.total_pitchers
        );
    }
    let _ = writeln!(out);

    if snapshot.cards.is_empty() {
        if snapshot.status == RosterStatus::Loaded {
            let _ = writeln!(out, "No pitchers to show.");
        }
        return out;
    }
    for card in &snapshot.cards {
        out.push_str(&render_card(card));
        out.push('\n');
    }
    out
}

pub fn dashboard_json(snapshot: &DashboardSnapshot) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&json!({
        "status": roster_status_line(&snapshot.status),
        "upload_status": upload_status_line(&snapshot.upload_status),
        "search_term": snapshot.search_term,
        "total_pitchers": snapshot.total_pitchers,
        "cards": snapshot.cards,
    }))
}
