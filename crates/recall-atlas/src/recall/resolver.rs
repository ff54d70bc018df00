use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{Division, RecallLegislator};
use super::hierarchy::Hierarchy;
use super::roster::LegislatorRoster;

/// A drill-down position: a municipality, optionally narrowed to a district and ward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstituencyQuery {
    pub municipality_id: u64,
    #[serde(default)]
    pub district_id: Option<u64>,
    #[serde(default)]
    pub ward_id: Option<u64>,
}

impl ConstituencyQuery {
    pub fn municipality(municipality_id: u64) -> Self {
        Self {
            municipality_id,
            district_id: None,
            ward_id: None,
        }
    }

    pub fn district(municipality_id: u64, district_id: u64) -> Self {
        Self {
            district_id: Some(district_id),
            ..Self::municipality(municipality_id)
        }
    }

    pub fn ward(municipality_id: u64, district_id: u64, ward_id: u64) -> Self {
        Self {
            ward_id: Some(ward_id),
            ..Self::district(municipality_id, district_id)
        }
    }
}

/// Result of a drill-down: either the next level's choices or the final seat holders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'a> {
    NotFound,
    Divisions(&'a [Division]),
    Legislators(&'a [Arc<RecallLegislator>]),
}

impl<'a> Resolution<'a> {
    pub fn found(&self) -> bool {
        !matches!(self, Resolution::NotFound)
    }

    pub fn divisions(&self) -> &'a [Division] {
        match *self {
            Resolution::Divisions(divisions) => divisions,
            _ => &[],
        }
    }

    pub fn legislators(&self) -> &'a [Arc<RecallLegislator>] {
        match *self {
            Resolution::Legislators(legislators) => legislators,
            _ => &[],
        }
    }
}

/// Narrow municipality → district → ward to the recallable legislators.
///
/// A district whose wards map to no recall constituency resolves to
/// `NotFound`, the same as a district id that does not exist.
pub fn resolve<'a>(
    hierarchy: &'a Hierarchy,
    roster: &'a LegislatorRoster,
    query: ConstituencyQuery,
) -> Resolution<'a> {
    if !roster.has_legislator_in_municipality(query.municipality_id) {
        debug!(municipality = query.municipality_id, "no recall in municipality");
        return Resolution::NotFound;
    }

    let Some(municipality) = hierarchy.municipality(query.municipality_id) else {
        debug!(
            municipality = query.municipality_id,
            "municipality missing from hierarchy"
        );
        return Resolution::NotFound;
    };

    let Some(district_id) = query.district_id else {
        return Resolution::Divisions(municipality.divisions());
    };

    let Some(district) = municipality.district(district_id) else {
        debug!(district = district_id, "unknown district");
        return Resolution::NotFound;
    };

    let recallable = district
        .wards()
        .any(|ward| roster.has_constituency(ward.constituency_id()));
    if !recallable {
        debug!(district = district_id, "district has no recallable ward");
        return Resolution::NotFound;
    }

    let Some(ward_id) = query.ward_id else {
        return Resolution::Divisions(district.divisions());
    };

    let Some(ward) = district.ward(ward_id) else {
        debug!(ward = ward_id, "unknown ward");
        return Resolution::NotFound;
    };

    match roster.legislators_in(ward.constituency_id()) {
        [] => {
            debug!(
                ward = ward_id,
                constituency = ward.constituency_id(),
                "ward constituency has no recall"
            );
            Resolution::NotFound
        }
        legislators => Resolution::Legislators(legislators),
    }
}
