use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::address::normalize_address;
use super::validation::{is_valid_mobile_number, is_valid_national_id};
use crate::recall::domain::RecallLegislator;

/// Minguo calendar year 1 is 1912.
const MINGUO_EPOCH_OFFSET: i32 = 1911;

/// Raw petition fields as posted by the fill-form page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetitionFields {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "id-number", default)]
    pub id_number: String,
    #[serde(rename = "birth-year", default)]
    pub birth_year: String,
    #[serde(rename = "birth-month", default)]
    pub birth_month: String,
    #[serde(rename = "birth-day", default)]
    pub birth_day: String,
    #[serde(default)]
    pub address: String,
    #[serde(rename = "mobile-number", default)]
    pub mobile_number: String,
}

/// Rejections surfaced to the citizen filling the form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PetitionViolation {
    #[error("輸入有誤")]
    MissingField { field: &'static str },
    #[error("出生日期輸入錯誤")]
    InvalidBirthDate,
    #[error("身份證輸入錯誤")]
    InvalidIdNumber,
    #[error("手機號碼輸入錯誤")]
    InvalidMobileNumber,
    #[error("候選人不處於連署階段")]
    NotPetitioning,
}

/// Trimmed petition input with a normalized address and a checked birth date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetitionForm {
    name: String,
    id_number: String,
    birth_year: String,
    birth_month: String,
    birth_day: String,
    birth_date: NaiveDate,
    address: String,
    mobile_number: String,
}

impl PetitionForm {
    pub fn from_fields(fields: PetitionFields) -> Result<Self, PetitionViolation> {
        let name = required(&fields.name, "name")?;
        let id_number = required(&fields.id_number, "id-number")?;
        let birth_year = required(&fields.birth_year, "birth-year")?;
        let birth_month = required(&fields.birth_month, "birth-month")?;
        let birth_day = required(&fields.birth_day, "birth-day")?;
        let address = required(&fields.address, "address")?;
        let mobile_number = fields.mobile_number.trim().to_string();

        let birth_date = minguo_date(&birth_year, &birth_month, &birth_day)
            .ok_or(PetitionViolation::InvalidBirthDate)?;

        Ok(Self {
            name,
            id_number,
            birth_year,
            birth_month,
            birth_day,
            birth_date,
            address: normalize_address(&address),
            mobile_number,
        })
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Validate against the legislator's current stage and lay the form out for printing.
    pub fn preview(
        &self,
        legislator: &RecallLegislator,
    ) -> Result<PetitionPreview, PetitionViolation> {
        if !legislator.is_ongoing() || !legislator.is_petitioning() {
            return Err(PetitionViolation::NotPetitioning);
        }

        if !is_valid_national_id(&self.id_number) {
            return Err(PetitionViolation::InvalidIdNumber);
        }

        // Only the first-stage form carries a mobile number box.
        if legislator.recall_stage == 1
            && !self.mobile_number.is_empty()
            && !is_valid_mobile_number(&self.mobile_number)
        {
            return Err(PetitionViolation::InvalidMobileNumber);
        }

        let mut id_number = ['\0'; 10];
        for (slot, character) in id_number.iter_mut().zip(self.id_number.chars()) {
            *slot = character;
        }

        let image_prefix = format!(
            "stage-{}-{}",
            legislator.recall_stage, legislator.politician_name
        );

        Ok(PetitionPreview {
            politician_name: legislator.politician_name.clone(),
            constituency_name: legislator.constituency_name.clone(),
            recall_stage: legislator.recall_stage,
            participate_url: legislator.participate_url.clone(),
            redirect_url: format!("{}/thank-you", legislator.participate_url),
            template: format!("{image_prefix}.html"),
            image_prefix,
            name: self.name.clone(),
            id_number,
            birth_year: self.birth_year.clone(),
            birth_month: self.birth_month.clone(),
            birth_day: self.birth_day.clone(),
            mobile_number: self.mobile_number.clone(),
            address: self.address.clone(),
        })
    }
}

/// Everything the printable petition page needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PetitionPreview {
    pub politician_name: String,
    pub constituency_name: String,
    pub recall_stage: u64,
    pub participate_url: String,
    pub redirect_url: String,
    pub image_prefix: String,
    pub template: String,
    pub name: String,
    /// One box per character on the paper form.
    pub id_number: [char; 10],
    pub birth_year: String,
    pub birth_month: String,
    pub birth_day: String,
    pub mobile_number: String,
    pub address: String,
}

fn required(value: &str, field: &'static str) -> Result<String, PetitionViolation> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(PetitionViolation::MissingField { field });
    }
    Ok(trimmed.to_string())
}

fn minguo_date(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    let year: i32 = parse_digits(year)?;
    let month: u32 = parse_digits(month)?;
    let day: u32 = parse_digits(day)?;
    if year == 0 {
        return None;
    }
    NaiveDate::from_ymd_opt(year.checked_add(MINGUO_EPOCH_OFFSET)?, month, day)
}

fn parse_digits<T: std::str::FromStr>(value: &str) -> Option<T> {
    if value.is_empty() || !value.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recall::domain::RecallStatus;

    fn fields() -> PetitionFields {
        PetitionFields {
            name: " 王小明 ".to_string(),
            id_number: "A123456789".to_string(),
            birth_year: "78".to_string(),
            birth_month: "2".to_string(),
            birth_day: "29".to_string(),
            address: "臺北市信義區信義路5段7號 3 樓".to_string(),
            mobile_number: String::new(),
        }
    }

    fn legislator(stage: u64, status: RecallStatus) -> RecallLegislator {
        RecallLegislator {
            constituency_id: 6307,
            municipality_id: 63000000,
            term: 11,
            municipality_name: "臺北市".to_string(),
            constituency_num: 7,
            politician_name: "陳志明".to_string(),
            recall_stage: stage,
            recall_status: status,
            form_deployed: true,
            cso_url: String::new(),
            calendar_url: String::new(),
            voting_date: None,
            voting_event_url: None,
            by_election_date: None,
            by_election_event_url: None,
            constituency_name: "臺北市第7選舉區".to_string(),
            fill_form_url: format!("http://localhost/stages/{stage}/x"),
            participate_url: "http://localhost/legislators/x".to_string(),
        }
    }

    #[test]
    fn trims_fields_and_normalizes_address() {
        let mut raw = fields();
        raw.birth_year = "77".to_string();
        raw.birth_day = "28".to_string();
        let form = PetitionForm::from_fields(raw).expect("form accepted");
        assert_eq!(form.address(), "臺北市信義區信義路五段7號 三樓");
        assert_eq!(
            form.birth_date(),
            NaiveDate::from_ymd_opt(1988, 2, 28).expect("valid date")
        );
    }

    #[test]
    fn rejects_missing_required_field() {
        let mut raw = fields();
        raw.address = "   ".to_string();
        assert_eq!(
            PetitionForm::from_fields(raw),
            Err(PetitionViolation::MissingField { field: "address" })
        );
    }

    #[test]
    fn rejects_impossible_birth_date() {
        // 1989 is not a leap year.
        assert_eq!(
            PetitionForm::from_fields(fields()),
            Err(PetitionViolation::InvalidBirthDate)
        );

        let mut raw = fields();
        raw.birth_year = "民國78".to_string();
        assert_eq!(
            PetitionForm::from_fields(raw),
            Err(PetitionViolation::InvalidBirthDate)
        );
    }

    #[test]
    fn preview_lays_out_id_and_links() {
        let mut raw = fields();
        raw.birth_day = "28".to_string();
        let form = PetitionForm::from_fields(raw).expect("form accepted");
        let preview = form
            .preview(&legislator(2, RecallStatus::Ongoing))
            .expect("preview builds");

        assert_eq!(preview.id_number[0], 'A');
        assert_eq!(preview.id_number[9], '9');
        assert_eq!(preview.image_prefix, "stage-2-陳志明");
        assert_eq!(preview.template, "stage-2-陳志明.html");
        assert_eq!(
            preview.redirect_url,
            "http://localhost/legislators/x/thank-you"
        );
        assert_eq!(preview.name, "王小明");
    }

    #[test]
    fn preview_requires_live_petition() {
        let mut raw = fields();
        raw.birth_day = "28".to_string();
        let form = PetitionForm::from_fields(raw).expect("form accepted");

        assert_eq!(
            form.preview(&legislator(3, RecallStatus::Ongoing)),
            Err(PetitionViolation::NotPetitioning)
        );
        assert_eq!(
            form.preview(&legislator(2, RecallStatus::Failed)),
            Err(PetitionViolation::NotPetitioning)
        );
    }

    #[test]
    fn preview_checks_id_before_mobile() {
        let mut raw = fields();
        raw.birth_day = "28".to_string();
        raw.id_number = "A123456788".to_string();
        raw.mobile_number = "0812345678".to_string();
        let form = PetitionForm::from_fields(raw).expect("form accepted");
        assert_eq!(
            form.preview(&legislator(1, RecallStatus::Ongoing)),
            Err(PetitionViolation::InvalidIdNumber)
        );
    }

    #[test]
    fn mobile_only_checked_on_first_stage() {
        let mut raw = fields();
        raw.birth_day = "28".to_string();
        raw.mobile_number = "0812345678".to_string();
        let form = PetitionForm::from_fields(raw).expect("form accepted");

        assert_eq!(
            form.preview(&legislator(1, RecallStatus::Ongoing)),
            Err(PetitionViolation::InvalidMobileNumber)
        );
        assert!(form.preview(&legislator(2, RecallStatus::Ongoing)).is_ok());
    }
}
