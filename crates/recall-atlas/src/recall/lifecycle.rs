use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Asia::Taipei;

use super::domain::{FormVariant, RecallLegislator, RecallStatus, RedirectDecision};

/// Calendar date in Taipei at `now`, whatever the host timezone is.
pub fn campaign_date(now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&Taipei).date_naive()
}

pub fn campaign_today() -> NaiveDate {
    campaign_date(Utc::now())
}

impl RecallLegislator {
    pub fn is_ongoing(&self) -> bool {
        self.recall_status == RecallStatus::Ongoing
    }

    /// Stages 1 and 2 collect signatures; 3 and 4 are the vote and by-election.
    pub fn is_petitioning(&self) -> bool {
        matches!(self.recall_stage, 1 | 2)
    }

    /// Decide whether a page for `requested_stage` can be shown.
    ///
    /// A finished effort always redirects permanently, even when the requested
    /// stage matches the recorded one.
    pub fn redirect_decision(&self, requested_stage: u64) -> RedirectDecision {
        if self.recall_status != RecallStatus::Ongoing {
            return RedirectDecision::PermanentRedirect;
        }

        match self.recall_stage.cmp(&requested_stage) {
            std::cmp::Ordering::Greater => RedirectDecision::PermanentRedirect,
            std::cmp::Ordering::Less => RedirectDecision::TemporaryRedirect,
            std::cmp::Ordering::Equal => RedirectDecision::Proceed,
        }
    }

    pub fn form_variant(&self) -> Option<FormVariant> {
        match self.recall_stage {
            1 | 2 => Some(FormVariant::Petition),
            3 | 4 => Some(FormVariant::VoteReminder),
            _ => None,
        }
    }

    pub fn days_until_voting(&self, today: NaiveDate) -> Option<i64> {
        self.voting_date.map(|date| (date - today).num_days())
    }

    pub fn days_until_by_election(&self, today: NaiveDate) -> Option<i64> {
        self.by_election_date.map(|date| (date - today).num_days())
    }
}
