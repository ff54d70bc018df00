use std::collections::{BTreeMap, HashMap};
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use super::domain::{Division, LoadError};

/// Municipality record as it appears in the administrative-divisions document.
#[derive(Debug, Clone, Deserialize)]
pub struct RawMunicipality {
    pub id: u64,
    #[serde(rename = "n")]
    pub name: String,
    #[serde(rename = "ds")]
    pub districts: BTreeMap<u64, RawDistrict>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawDistrict {
    pub id: u64,
    #[serde(rename = "n")]
    pub name: String,
    #[serde(rename = "ws")]
    pub wards: BTreeMap<u64, RawWard>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawWard {
    pub id: u64,
    #[serde(rename = "n")]
    pub name: String,
    #[serde(rename = "cid")]
    pub constituency_id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ward {
    division: Division,
    constituency_id: u64,
}

impl Ward {
    pub fn id(&self) -> u64 {
        self.division.id
    }

    pub fn name(&self) -> &str {
        &self.division.name
    }

    pub fn division(&self) -> &Division {
        &self.division
    }

    pub fn constituency_id(&self) -> u64 {
        self.constituency_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct District {
    division: Division,
    wards: BTreeMap<u64, Ward>,
    divisions: Vec<Division>,
}

impl District {
    pub fn id(&self) -> u64 {
        self.division.id
    }

    pub fn name(&self) -> &str {
        &self.division.name
    }

    pub fn division(&self) -> &Division {
        &self.division
    }

    pub fn ward(&self, ward_id: u64) -> Option<&Ward> {
        self.wards.get(&ward_id)
    }

    pub fn wards(&self) -> impl Iterator<Item = &Ward> {
        self.wards.values()
    }

    /// Divisions of every ward, ascending by id.
    pub fn divisions(&self) -> &[Division] {
        &self.divisions
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Municipality {
    division: Division,
    districts: BTreeMap<u64, District>,
    divisions: Vec<Division>,
}

impl Municipality {
    pub fn id(&self) -> u64 {
        self.division.id
    }

    pub fn name(&self) -> &str {
        &self.division.name
    }

    pub fn division(&self) -> &Division {
        &self.division
    }

    pub fn district(&self, district_id: u64) -> Option<&District> {
        self.districts.get(&district_id)
    }

    pub fn districts(&self) -> impl Iterator<Item = &District> {
        self.districts.values()
    }

    /// Divisions of every district, ascending by id.
    pub fn divisions(&self) -> &[Division] {
        &self.divisions
    }
}

/// The municipality → district → ward tree, immutable once built.
#[derive(Debug, Clone, Default)]
pub struct Hierarchy {
    municipalities: Vec<Municipality>,
    index: HashMap<u64, usize>,
    divisions: Vec<Division>,
}

impl Hierarchy {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        let raw: Vec<RawMunicipality> =
            serde_json::from_reader(reader).map_err(|source| LoadError::Parse {
                document: "administrative divisions",
                source,
            })?;
        Self::load(raw)
    }

    /// Build the tree and every derived divisions list in one pass.
    pub fn load(raw: Vec<RawMunicipality>) -> Result<Self, LoadError> {
        let mut municipalities = Vec::with_capacity(raw.len());
        let mut index = HashMap::with_capacity(raw.len());

        for raw_municipality in raw {
            if index
                .insert(raw_municipality.id, municipalities.len())
                .is_some()
            {
                return Err(LoadError::DuplicateMunicipality(raw_municipality.id));
            }
            municipalities.push(build_municipality(raw_municipality));
        }

        let mut divisions: Vec<Division> = municipalities
            .iter()
            .map(|municipality| municipality.division.clone())
            .collect();
        sort_divisions(&mut divisions);

        let districts: usize = municipalities.iter().map(|m| m.districts.len()).sum();
        info!(
            municipalities = municipalities.len(),
            districts, "administrative hierarchy loaded"
        );

        Ok(Self {
            municipalities,
            index,
            divisions,
        })
    }

    pub fn municipality(&self, municipality_id: u64) -> Option<&Municipality> {
        self.index
            .get(&municipality_id)
            .map(|&position| &self.municipalities[position])
    }

    /// Municipalities in document order.
    pub fn municipalities(&self) -> &[Municipality] {
        &self.municipalities
    }

    /// One division per municipality, ascending by id.
    pub fn divisions(&self) -> &[Division] {
        &self.divisions
    }
}

fn build_municipality(raw: RawMunicipality) -> Municipality {
    let districts: BTreeMap<u64, District> = raw
        .districts
        .into_iter()
        .map(|(key, district)| (key, build_district(district)))
        .collect();

    let mut divisions: Vec<Division> = districts
        .values()
        .map(|district| district.division.clone())
        .collect();
    sort_divisions(&mut divisions);

    Municipality {
        division: Division::new(raw.id, raw.name),
        districts,
        divisions,
    }
}

fn build_district(raw: RawDistrict) -> District {
    let wards: BTreeMap<u64, Ward> = raw
        .wards
        .into_iter()
        .map(|(key, ward)| {
            (
                key,
                Ward {
                    division: Division::new(ward.id, ward.name),
                    constituency_id: ward.constituency_id,
                },
            )
        })
        .collect();

    let mut divisions: Vec<Division> = wards.values().map(|ward| ward.division.clone()).collect();
    sort_divisions(&mut divisions);

    District {
        division: Division::new(raw.id, raw.name),
        wards,
        divisions,
    }
}

// Stable: equal ids keep map-key order.
fn sort_divisions(divisions: &mut [Division]) {
    divisions.sort_by_key(|division| division.id);
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"[
        {"id": 2, "n": "新北市", "ds": {}},
        {"id": 1, "n": "臺北市", "ds": {
            "30": {"id": 30, "n": "大安區", "ws": {
                "302": {"id": 302, "n": "龍安里", "cid": 7},
                "301": {"id": 301, "n": "錦安里", "cid": 7}
            }},
            "10": {"id": 10, "n": "松山區", "ws": {}}
        }}
    ]"#;

    #[test]
    fn divisions_are_sorted_at_every_level() {
        let hierarchy = Hierarchy::from_reader(DOCUMENT.as_bytes()).expect("document loads");

        let top: Vec<u64> = hierarchy.divisions().iter().map(|d| d.id).collect();
        assert_eq!(top, vec![1, 2]);

        let taipei = hierarchy.municipality(1).expect("taipei present");
        let districts: Vec<u64> = taipei.divisions().iter().map(|d| d.id).collect();
        assert_eq!(districts, vec![10, 30]);

        let daan = taipei.district(30).expect("daan present");
        let wards: Vec<&str> = daan.divisions().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(wards, vec!["錦安里", "龍安里"]);
        assert_eq!(daan.ward(302).map(Ward::constituency_id), Some(7));
    }

    #[test]
    fn municipalities_keep_document_order() {
        let hierarchy = Hierarchy::from_reader(DOCUMENT.as_bytes()).expect("document loads");
        let names: Vec<&str> = hierarchy.municipalities().iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["新北市", "臺北市"]);
    }

    #[test]
    fn equal_ids_keep_key_order() {
        let raw = vec![RawMunicipality {
            id: 1,
            name: "測試市".to_string(),
            districts: BTreeMap::from([
                (
                    5,
                    RawDistrict {
                        id: 9,
                        name: "甲區".to_string(),
                        wards: BTreeMap::new(),
                    },
                ),
                (
                    6,
                    RawDistrict {
                        id: 9,
                        name: "乙區".to_string(),
                        wards: BTreeMap::new(),
                    },
                ),
            ]),
        }];

        let hierarchy = Hierarchy::load(raw).expect("raw tree loads");
        let names: Vec<&str> = hierarchy
            .municipality(1)
            .expect("present")
            .divisions()
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(names, vec!["甲區", "乙區"]);
    }

    #[test]
    fn missing_constituency_is_fatal() {
        let document = r#"[{"id": 1, "n": "臺北市", "ds": {
            "10": {"id": 10, "n": "松山區", "ws": {"101": {"id": 101, "n": "莊敬里"}}}
        }}]"#;

        match Hierarchy::from_reader(document.as_bytes()) {
            Err(LoadError::Parse { document, .. }) => {
                assert_eq!(document, "administrative divisions")
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_municipality_is_fatal() {
        let document = r#"[{"id": 1, "n": "臺北市", "ds": {}}, {"id": 1, "n": "臺北市", "ds": {}}]"#;
        assert!(matches!(
            Hierarchy::from_reader(document.as_bytes()),
            Err(LoadError::DuplicateMunicipality(1))
        ));
    }
}
