use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use super::domain::RecallLegislator;

/// Display grouping of legislators that share a municipality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Area {
    pub municipality_id: u64,
    pub municipality_name: String,
    pub legislators: Vec<Arc<RecallLegislator>>,
}

/// Group by municipality. Areas appear in order of first occurrence and each
/// keeps its legislators in input order.
pub fn build_areas(legislators: &[Arc<RecallLegislator>]) -> Vec<Area> {
    let mut areas: Vec<Area> = Vec::new();
    let mut positions: HashMap<u64, usize> = HashMap::new();

    for legislator in legislators {
        match positions.get(&legislator.municipality_id) {
            Some(&position) => areas[position].legislators.push(Arc::clone(legislator)),
            None => {
                positions.insert(legislator.municipality_id, areas.len());
                areas.push(Area {
                    municipality_id: legislator.municipality_id,
                    municipality_name: legislator.municipality_name.clone(),
                    legislators: vec![Arc::clone(legislator)],
                });
            }
        }
    }

    areas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recall::domain::RecallStatus;

    fn legislator(municipality_id: u64, municipality: &str, name: &str) -> Arc<RecallLegislator> {
        Arc::new(RecallLegislator {
            constituency_id: municipality_id * 100,
            municipality_id,
            term: 11,
            municipality_name: municipality.to_string(),
            constituency_num: 1,
            politician_name: name.to_string(),
            recall_stage: 2,
            recall_status: RecallStatus::Ongoing,
            form_deployed: true,
            cso_url: String::new(),
            calendar_url: String::new(),
            voting_date: None,
            voting_event_url: None,
            by_election_date: None,
            by_election_event_url: None,
            constituency_name: format!("{municipality}第1選舉區"),
            fill_form_url: String::new(),
            participate_url: String::new(),
        })
    }

    #[test]
    fn groups_by_first_occurrence_and_keeps_input_order() {
        let roster = vec![
            legislator(65, "新北市", "林建宏"),
            legislator(63, "臺北市", "陳志明"),
            legislator(65, "新北市", "黃淑芬"),
            legislator(63, "臺北市", "王美玲"),
        ];

        let areas = build_areas(&roster);
        assert_eq!(areas.len(), 2);
        assert_eq!(areas[0].municipality_name, "新北市");
        let first: Vec<&str> = areas[0]
            .legislators
            .iter()
            .map(|l| l.politician_name.as_str())
            .collect();
        assert_eq!(first, vec!["林建宏", "黃淑芬"]);
        assert_eq!(areas[1].municipality_id, 63);
        assert_eq!(areas[1].legislators[1].politician_name, "王美玲");
    }

    #[test]
    fn empty_roster_has_no_areas() {
        assert!(build_areas(&[]).is_empty());
    }
}
