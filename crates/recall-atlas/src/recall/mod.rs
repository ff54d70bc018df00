//! Recall constituency lookup over the administrative hierarchy and the
//! legislator roster, plus the HTTP surface that serves it.

pub mod areas;
mod atlas;
pub mod domain;
pub mod hierarchy;
mod lifecycle;
pub mod petition;
pub mod resolver;
pub mod roster;
pub mod router;

#[cfg(test)]
mod tests;

pub use areas::{build_areas, Area};
pub use atlas::RecallAtlas;
pub use domain::{
    Division, FormVariant, LoadError, RecallLegislator, RecallStatus, RedirectDecision,
    FIRST_RECALL_STAGE, LAST_RECALL_STAGE,
};
pub use hierarchy::{District, Hierarchy, Municipality, Ward};
pub use lifecycle::{campaign_date, campaign_today};
pub use petition::{
    is_valid_mobile_number, is_valid_national_id, normalize_address, PetitionFields,
    PetitionForm, PetitionPreview, PetitionViolation,
};
pub use resolver::{resolve, ConstituencyQuery, Resolution};
pub use roster::LegislatorRoster;
pub use router::recall_router;
