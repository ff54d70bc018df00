use std::sync::Arc;

use tracing::info;

use super::areas::Area;
use super::domain::{LoadError, RecallLegislator};
use super::hierarchy::Hierarchy;
use super::resolver::{self, ConstituencyQuery, Resolution};
use super::roster::LegislatorRoster;
use crate::config::{DataConfig, SiteConfig};

/// Read-only view of the static recall data, built once before serving.
///
/// Share it behind an `Arc`; nothing mutates it after [`RecallAtlas::load`].
#[derive(Debug, Clone)]
pub struct RecallAtlas {
    site: SiteConfig,
    hierarchy: Hierarchy,
    roster: LegislatorRoster,
}

impl RecallAtlas {
    pub fn new(site: SiteConfig, hierarchy: Hierarchy, roster: LegislatorRoster) -> Self {
        Self {
            site,
            hierarchy,
            roster,
        }
    }

    pub fn load(data: &DataConfig, site: SiteConfig) -> Result<Self, LoadError> {
        let hierarchy = Hierarchy::from_path(&data.divisions_path)?;
        let roster = LegislatorRoster::from_path(&data.legislators_path, &site)?;
        info!(
            divisions = %data.divisions_path.display(),
            legislators = %data.legislators_path.display(),
            base_url = site.base_url(),
            "recall atlas ready"
        );
        Ok(Self::new(site, hierarchy, roster))
    }

    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    pub fn roster(&self) -> &LegislatorRoster {
        &self.roster
    }

    pub fn resolve(&self, query: ConstituencyQuery) -> Resolution<'_> {
        resolver::resolve(&self.hierarchy, &self.roster, query)
    }

    pub fn find_legislator(&self, politician_name: &str) -> Option<&Arc<RecallLegislator>> {
        self.roster.find_legislator(politician_name)
    }

    pub fn areas(&self) -> &[Area] {
        self.roster.areas()
    }
}
