use serde::{Deserialize, Serialize};

/// One pitcher as reported by the backend.
///
/// `fatigue` is nominally in `0..=100` but nothing here enforces that; the
/// backend sums weighted pitch counts and can exceed the range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pitcher {
    pub name: String,
    pub team: String,
    #[serde(default)]
    pub handedness: String,
    pub fatigue: f64,
}

impl Pitcher {
    pub fn new(
        name: impl Into<String>,
        team: impl Into<String>,
        handedness: impl Into<String>,
        fatigue: f64,
    ) -> Self {
        Self {
            name: name.into(),
            team: team.into(),
            handedness: handedness.into(),
            fatigue,
        }
    }
}

/// Ordered snapshot returned by a single roster fetch.
pub type Roster = Vec<Pitcher>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Fatigue,
    Name,
    Team,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}
