use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A named administrative unit at any level of the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Division {
    pub id: u64,
    #[serde(rename = "n")]
    pub name: String,
}

impl Division {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecallStatus {
    Ongoing,
    Success,
    Failed,
}

impl RecallStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ongoing => "ONGOING",
            Self::Success => "SUCCESS",
            Self::Failed => "FAILED",
        }
    }

    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Ongoing)
    }
}

pub const FIRST_RECALL_STAGE: u64 = 1;
pub const LAST_RECALL_STAGE: u64 = 4;

/// One recall effort against one office holder, as listed in the roster document.
///
/// Successive stages of the same effort are separate records sharing a
/// `constituency_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecallLegislator {
    pub constituency_id: u64,
    pub municipality_id: u64,
    pub term: u64,
    pub municipality_name: String,
    #[serde(default)]
    pub constituency_num: u64,
    pub politician_name: String,
    pub recall_stage: u64,
    pub recall_status: RecallStatus,
    #[serde(default)]
    pub form_deployed: bool,
    #[serde(rename = "csoURL", default)]
    pub cso_url: String,
    #[serde(rename = "calendarURL", default)]
    pub calendar_url: String,
    #[serde(default)]
    pub voting_date: Option<NaiveDate>,
    #[serde(rename = "votingEventURL", default)]
    pub voting_event_url: Option<String>,
    #[serde(default)]
    pub by_election_date: Option<NaiveDate>,
    #[serde(rename = "byElectionEventURL", default)]
    pub by_election_event_url: Option<String>,
    pub constituency_name: String,
    /// Derived at load time from the politician name and current stage.
    #[serde(rename = "fillFormURL", default)]
    pub fill_form_url: String,
    /// Derived at load time; base of the preview and thank-you pages.
    #[serde(rename = "participateURL", default)]
    pub participate_url: String,
}

/// Which form a live recall effort presents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormVariant {
    Petition,
    VoteReminder,
}

/// Outcome of comparing a requested stage against a legislator's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedirectDecision {
    /// The requested stage is live; render it.
    Proceed,
    /// The effort is over or the requested stage is stale.
    PermanentRedirect,
    /// The requested stage has not been reached yet.
    TemporaryRedirect,
}

/// Static data could not be turned into a usable hierarchy or roster.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed {document} document: {source}")]
    Parse {
        document: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("municipality {0} is listed more than once")]
    DuplicateMunicipality(u64),
    #[error("recall stage {stage} for {politician} is outside 1..=4")]
    InvalidRecallStage { politician: String, stage: u64 },
    #[error("legislator record in constituency {constituency_id} has no politician name")]
    EmptyPoliticianName { constituency_id: u64 },
}
