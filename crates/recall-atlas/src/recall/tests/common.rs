use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::config::SiteConfig;
use crate::recall::{recall_router, Hierarchy, LegislatorRoster, RecallAtlas};

const DIVISIONS: &str = include_str!("../../../tests/fixtures/administrative-divisions.json");
const LEGISLATORS: &str = include_str!("../../../tests/fixtures/recall-legislators.json");

pub(super) const TAIPEI: u64 = 63000000;
pub(super) const SONGSHAN: u64 = 63000010;
pub(super) const XINYI: u64 = 63000020;
pub(super) const DAAN: u64 = 63000030;
pub(super) const NEW_TAIPEI: u64 = 65000000;
pub(super) const SANCHONG: u64 = 65000200;
pub(super) const HSINCHU: u64 = 10018000;
pub(super) const KINMEN: u64 = 9020000;

pub(super) fn site() -> SiteConfig {
    SiteConfig::new("recall.example.tw", "/").expect("valid site")
}

pub(super) fn atlas() -> RecallAtlas {
    atlas_for(site())
}

pub(super) fn atlas_for(site: SiteConfig) -> RecallAtlas {
    let hierarchy = Hierarchy::from_reader(DIVISIONS.as_bytes()).expect("fixture hierarchy loads");
    let roster =
        LegislatorRoster::from_reader(LEGISLATORS.as_bytes(), &site).expect("fixture roster loads");
    RecallAtlas::new(site, hierarchy, roster)
}

pub(super) fn shared_atlas() -> Arc<RecallAtlas> {
    Arc::new(atlas())
}

pub(super) fn router() -> axum::Router {
    recall_router(shared_atlas())
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn location(response: &Response) -> &str {
    response
        .headers()
        .get(axum::http::header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("location header")
}
