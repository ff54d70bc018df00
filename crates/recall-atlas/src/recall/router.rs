use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Router,
};
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, warn};

use super::areas::Area;
use super::atlas::RecallAtlas;
use super::domain::{Division, FormVariant, RecallLegislator, RedirectDecision};
use super::lifecycle::campaign_today;
use super::petition::{PetitionFields, PetitionForm, PetitionViolation};
use super::resolver::ConstituencyQuery;

/// Router builder exposing the constituency search API and the per-legislator pages.
pub fn recall_router(atlas: Arc<RecallAtlas>) -> Router {
    Router::new()
        .route("/apis/constituencies", get(constituencies_handler))
        .route("/apis/areas", get(areas_handler))
        .route("/stages/:stage/:name", get(stage_handler))
        .route("/stages/:stage/:name/preview", post(preview_handler))
        .route("/legislators/:name", get(participate_handler))
        .route("/legislators/:name/thank-you", get(thank_you_handler))
        .with_state(atlas)
}

#[derive(Debug, Serialize)]
struct ConstituencyResult {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    divisions: Vec<Division>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    legislators: Vec<Arc<RecallLegislator>>,
}

#[derive(Debug, Serialize)]
struct AreasResult<'a> {
    areas: &'a [Area],
    divisions: &'a [Division],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FormView<'a> {
    variant: FormVariant,
    #[serde(rename = "baseURL")]
    base_url: &'a str,
    #[serde(rename = "previewURL", skip_serializing_if = "Option::is_none")]
    preview_url: Option<String>,
    address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    days_until_voting: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    days_until_by_election: Option<i64>,
    legislator: &'a RecallLegislator,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThankYouView<'a> {
    politician_name: &'a str,
    #[serde(rename = "baseURL")]
    base_url: &'a str,
    #[serde(rename = "participateURL")]
    participate_url: &'a str,
    #[serde(rename = "calendarURL")]
    calendar_url: &'a str,
    #[serde(rename = "csoURL")]
    cso_url: &'a str,
}

pub(crate) async fn constituencies_handler(
    State(atlas): State<Arc<RecallAtlas>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let query = match constituency_query(&params) {
        Ok(query) => query,
        Err(field) => {
            let payload = json!({ "message": format!("{field} error") });
            return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
        }
    };

    let resolution = atlas.resolve(query);
    if !resolution.found() {
        let payload = json!({ "message": "Not Found" });
        return (StatusCode::NOT_FOUND, axum::Json(payload)).into_response();
    }

    let result = ConstituencyResult {
        divisions: resolution.divisions().to_vec(),
        legislators: resolution.legislators().to_vec(),
    };
    let payload = json!({ "message": "OK", "result": result });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn areas_handler(State(atlas): State<Arc<RecallAtlas>>) -> Response {
    let result = AreasResult {
        areas: atlas.areas(),
        divisions: atlas.hierarchy().divisions(),
    };
    let payload = json!({ "message": "OK", "result": result });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn stage_handler(
    State(atlas): State<Arc<RecallAtlas>>,
    Path((stage, name)): Path<(String, String)>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let base_url = atlas.site().base_url();
    let Ok(requested) = stage.parse::<u64>() else {
        return redirect(StatusCode::MOVED_PERMANENTLY, base_url);
    };
    let Some(legislator) = atlas.find_legislator(&name) else {
        debug!(politician = %name, "stage page for unknown legislator");
        return redirect(StatusCode::MOVED_PERMANENTLY, base_url);
    };

    let decision = legislator.redirect_decision(requested);
    debug!(
        politician = %name,
        requested,
        current = legislator.recall_stage,
        ?decision,
        "stage page decision"
    );

    match decision {
        RedirectDecision::PermanentRedirect if !legislator.is_ongoing() => {
            redirect(StatusCode::MOVED_PERMANENTLY, base_url)
        }
        RedirectDecision::PermanentRedirect => {
            redirect(StatusCode::MOVED_PERMANENTLY, &legislator.fill_form_url)
        }
        RedirectDecision::TemporaryRedirect => {
            redirect(StatusCode::FOUND, &legislator.fill_form_url)
        }
        RedirectDecision::Proceed => {
            form_page(&atlas, legislator, &params, campaign_today())
        }
    }
}

pub(crate) async fn participate_handler(
    State(atlas): State<Arc<RecallAtlas>>,
    Path(name): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    match atlas.find_legislator(&name) {
        Some(legislator) if legislator.is_ongoing() => {
            form_page(&atlas, legislator, &params, campaign_today())
        }
        _ => redirect(StatusCode::MOVED_PERMANENTLY, atlas.site().base_url()),
    }
}

pub(crate) async fn preview_handler(
    State(atlas): State<Arc<RecallAtlas>>,
    Path((_stage, name)): Path<(String, String)>,
    Form(fields): Form<PetitionFields>,
) -> Response {
    let legislator = match atlas.find_legislator(&name) {
        Some(legislator) if legislator.is_ongoing() && legislator.is_petitioning() => legislator,
        _ => return violation_response(&name, &PetitionViolation::NotPetitioning),
    };

    let preview = PetitionForm::from_fields(fields).and_then(|form| form.preview(legislator));
    match preview {
        Ok(preview) => (StatusCode::OK, axum::Json(preview)).into_response(),
        Err(violation) => violation_response(&name, &violation),
    }
}

pub(crate) async fn thank_you_handler(
    State(atlas): State<Arc<RecallAtlas>>,
    Path(name): Path<String>,
) -> Response {
    let base_url = atlas.site().base_url();
    let Some(legislator) = atlas
        .find_legislator(&name)
        .filter(|legislator| legislator.is_ongoing())
    else {
        return redirect(StatusCode::MOVED_PERMANENTLY, base_url);
    };

    let view = ThankYouView {
        politician_name: &legislator.politician_name,
        base_url,
        participate_url: &legislator.participate_url,
        calendar_url: &legislator.calendar_url,
        cso_url: &legislator.cso_url,
    };
    let payload = json!({ "message": "OK", "result": view });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

fn constituency_query(params: &HashMap<String, String>) -> Result<ConstituencyQuery, &'static str> {
    let municipality_id = params
        .get("municipality")
        .and_then(|value| value.parse().ok())
        .ok_or("municipality")?;

    Ok(ConstituencyQuery {
        municipality_id,
        district_id: optional_id(params, "district")?,
        ward_id: optional_id(params, "ward")?,
    })
}

fn optional_id(
    params: &HashMap<String, String>,
    field: &'static str,
) -> Result<Option<u64>, &'static str> {
    match params.get(field).map(String::as_str) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(|_| field),
    }
}

/// Countdowns are measured from `today` on the campaign calendar.
pub(crate) fn form_page(
    atlas: &RecallAtlas,
    legislator: &RecallLegislator,
    params: &HashMap<String, String>,
    today: NaiveDate,
) -> Response {
    let Some(variant) = legislator.form_variant() else {
        return redirect(StatusCode::MOVED_PERMANENTLY, atlas.site().base_url());
    };

    let address = params
        .get("address")
        .map(|address| address.trim())
        .filter(|address| !address.is_empty())
        .unwrap_or(legislator.municipality_name.as_str())
        .to_string();

    let view = FormView {
        variant,
        base_url: atlas.site().base_url(),
        preview_url: (variant == FormVariant::Petition)
            .then(|| format!("{}/preview", legislator.fill_form_url)),
        address,
        days_until_voting: legislator.days_until_voting(today),
        days_until_by_election: legislator.days_until_by_election(today),
        legislator,
    };
    (StatusCode::OK, axum::Json(view)).into_response()
}

fn violation_response(politician: &str, violation: &PetitionViolation) -> Response {
    let status = match violation {
        PetitionViolation::NotPetitioning => StatusCode::CONFLICT,
        _ => StatusCode::BAD_REQUEST,
    };
    let field = match violation {
        PetitionViolation::MissingField { field } => *field,
        _ => "",
    };
    warn!(politician, field, reason = %violation, "petition input rejected");

    let payload = json!({ "message": violation.to_string() });
    (status, axum::Json(payload)).into_response()
}

fn redirect(status: StatusCode, location: &str) -> Response {
    (status, [(header::LOCATION, location.to_string())]).into_response()
}
