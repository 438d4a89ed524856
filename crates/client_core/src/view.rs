//! Display-ready projection of the roster consumed by renderers.

use serde::Serialize;
use shared::domain::Pitcher;

use crate::fatigue::{classify, Band};

pub const FALLBACK_LOGO: &str =
    "https://upload.wikimedia.org/wikipedia/commons/a/ac/No_image_available.svg";

const TEAM_LOGOS: &[(&str, &str)] = &[
    ("Mets", "/logos/mets.png"),
    ("Phillies", "/logos/phillies.png"),
    ("Angels", "/logos/angels.png"),
    ("Dodgers", "/logos/dodgers.png"),
    ("Yankees", "/logos/yankees.png"),
    ("Braves", "/logos/braves.png"),
    ("D-backs", "/logos/dbacks.png"),
    ("Giants", "/logos/giants.png"),
    ("Padres", "/logos/padres.png"),
    ("Astros", "/logos/astros.png"),
    ("Guardians", "/logos/guardians.png"),
    ("White Sox", "/logos/whitesox.png"),
    ("Brewers", "/logos/brewers.png"),
    ("Red Sox", "/logos/redsox.png"),
];

/// Logo path for a club name. Exact match only; anything unknown gets the
/// fallback image. Renderers that fail to load the returned image should
/// retry once with [`FALLBACK_LOGO`].
pub fn lookup_logo(team: &str) -> &'static str {
    TEAM_LOGOS
        .iter()
        .find(|(name, _)| *name == team)
        .map(|(_, logo)| *logo)
        .unwrap_or(FALLBACK_LOGO)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PitcherCard {
    pub name: String,
    pub team: String,
    pub handedness: String,
    pub fatigue: f64,
    pub band: Band,
    pub rest_advisory: bool,
    pub logo_url: &'static str,
    pub bar_width_percent: f64,
}

impl PitcherCard {
    pub fn from_pitcher(pitcher: &Pitcher) -> Self {
        let band = classify(pitcher.fatigue);
        Self {
            name: pitcher.name.clone(),
            team: pitcher.team.clone(),
            handedness: pitcher.handedness.clone(),
            fatigue: pitcher.fatigue,
            band,
            rest_advisory: band.rest_advisory(),
            logo_url: lookup_logo(&pitcher.team),
            bar_width_percent: bar_width(pitcher.fatigue),
        }
    }
}

fn bar_width(fatigue: f64) -> f64 {
    if fatigue.is_nan() {
        0.0
    } else {
        fatigue.clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_teams_resolve_and_unknown_fall_back() {
        assert_eq!(lookup_logo("Mets"), "/logos/mets.png");
        assert_eq!(lookup_logo("White Sox"), "/logos/whitesox.png");
        assert_eq!(lookup_logo("mets"), FALLBACK_LOGO);
        assert_eq!(lookup_logo("Blue Jays"), FALLBACK_LOGO);
        assert_eq!(lookup_logo(""), FALLBACK_LOGO);
    }

    #[test]
    fn card_derives_band_and_advisory() {
        let card = PitcherCard::from_pitcher(&Pitcher::new("Edwin Diaz", "Mets", "R", 92.5));
        assert_eq!(card.band, Band::Critical);
        assert!(card.rest_advisory);
        assert_eq!(card.logo_url, "/logos/mets.png");
        assert_eq!(card.bar_width_percent, 92.5);

        let rested = PitcherCard::from_pitcher(&Pitcher::new("Josh Hader", "Astros", "L", 12.0));
        assert_eq!(rested.band, Band::Low);
        assert!(!rested.rest_advisory);
    }

    #[test]
    fn bar_width_is_clamped_but_fatigue_passes_through() {
        let overworked = PitcherCard::from_pitcher(&Pitcher::new("A", "X", "R", 142.3));
        assert_eq!(overworked.fatigue, 142.3);
        assert_eq!(overworked.bar_width_percent, 100.0);

        let negative = PitcherCard::from_pitcher(&Pitcher::new("B", "X", "L", -4.0));
        assert_eq!(negative.bar_width_percent, 0.0);

        let nan = PitcherCard::from_pitcher(&Pitcher::new("C", "X", "S", f64::NAN));
        assert_eq!(nan.bar_width_percent, 0.0);
        assert_eq!(nan.band, Band::Low);
    }
}
