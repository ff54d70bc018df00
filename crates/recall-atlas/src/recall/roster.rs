use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use super::areas::{build_areas, Area};
use super::domain::{LoadError, RecallLegislator, FIRST_RECALL_STAGE, LAST_RECALL_STAGE};
use crate::config::SiteConfig;

/// Every recall effort plus the views derived from it at load time.
#[derive(Debug, Clone, Default)]
pub struct LegislatorRoster {
    legislators: Vec<Arc<RecallLegislator>>,
    by_constituency: HashMap<u64, Vec<Arc<RecallLegislator>>>,
    municipalities: HashSet<u64>,
    areas: Vec<Area>,
}

impl LegislatorRoster {
    pub fn from_path<P: AsRef<Path>>(path: P, site: &SiteConfig) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file, site)
    }

    pub fn from_reader<R: Read>(reader: R, site: &SiteConfig) -> Result<Self, LoadError> {
        let records: Vec<RecallLegislator> =
            serde_json::from_reader(reader).map_err(|source| LoadError::Parse {
                document: "recall legislators",
                source,
            })?;
        Self::load(records, site)
    }

    /// Validate records, fill in their canonical links and build the indices.
    pub fn load(records: Vec<RecallLegislator>, site: &SiteConfig) -> Result<Self, LoadError> {
        let mut legislators = Vec::with_capacity(records.len());
        let mut by_constituency: HashMap<u64, Vec<Arc<RecallLegislator>>> = HashMap::new();
        let mut municipalities = HashSet::new();

        for mut record in records {
            if record.politician_name.trim().is_empty() {
                return Err(LoadError::EmptyPoliticianName {
                    constituency_id: record.constituency_id,
                });
            }
            if !(FIRST_RECALL_STAGE..=LAST_RECALL_STAGE).contains(&record.recall_stage) {
                return Err(LoadError::InvalidRecallStage {
                    politician: record.politician_name,
                    stage: record.recall_stage,
                });
            }

            let stage = record.recall_stage.to_string();
            record.fill_form_url = site.join(&[
                "stages",
                stage.as_str(),
                record.politician_name.as_str(),
            ]);
            record.participate_url =
                site.join(&["legislators", record.politician_name.as_str()]);

            let record = Arc::new(record);
            by_constituency
                .entry(record.constituency_id)
                .or_default()
                .push(Arc::clone(&record));
            municipalities.insert(record.municipality_id);
            legislators.push(record);
        }

        let areas = build_areas(&legislators);
        info!(
            legislators = legislators.len(),
            constituencies = by_constituency.len(),
            areas = areas.len(),
            "recall roster loaded"
        );

        Ok(Self {
            legislators,
            by_constituency,
            municipalities,
            areas,
        })
    }

    /// Records in document order.
    pub fn legislators(&self) -> &[Arc<RecallLegislator>] {
        &self.legislators
    }

    /// Every record filed against the constituency, all stages and terms.
    pub fn legislators_in(&self, constituency_id: u64) -> &[Arc<RecallLegislator>] {
        self.by_constituency
            .get(&constituency_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn has_constituency(&self, constituency_id: u64) -> bool {
        self.by_constituency.contains_key(&constituency_id)
    }

    pub fn has_legislator_in_municipality(&self, municipality_id: u64) -> bool {
        self.municipalities.contains(&municipality_id)
    }

    /// First record in document order for the politician.
    pub fn find_legislator(&self, politician_name: &str) -> Option<&Arc<RecallLegislator>> {
        self.legislators
            .iter()
            .find(|legislator| legislator.politician_name == politician_name)
    }

    pub fn ongoing(&self) -> impl Iterator<Item = &Arc<RecallLegislator>> {
        self.legislators
            .iter()
            .filter(|legislator| legislator.is_ongoing())
    }

    pub fn areas(&self) -> &[Area] {
        &self.areas
    }
}
