use crate::infra::load_atlas;
use clap::Args;
use recall_atlas::config::AppConfig;
use recall_atlas::error::AppError;
use recall_atlas::recall::{
    is_valid_mobile_number, is_valid_national_id, normalize_address, ConstituencyQuery,
    RecallAtlas, Resolution,
};
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ResolveArgs {
    /// Municipality id
    #[arg(long)]
    pub(crate) municipality: u64,
    /// District id within the municipality
    #[arg(long)]
    pub(crate) district: Option<u64>,
    /// Ward id within the district
    #[arg(long, requires = "district")]
    pub(crate) ward: Option<u64>,
}

#[derive(Args, Debug)]
pub(crate) struct TextArgs {
    /// Text to check
    pub(crate) text: String,
}

fn load_configured_atlas() -> Result<Arc<RecallAtlas>, AppError> {
    let config = AppConfig::load()?;
    load_atlas(&config.data, config.site)
}

pub(crate) fn run_resolve(args: ResolveArgs) -> Result<(), AppError> {
    let atlas = load_configured_atlas()?;
    let query = ConstituencyQuery {
        municipality_id: args.municipality,
        district_id: args.district,
        ward_id: args.ward,
    };
    println!("{:#}", resolution_view(&atlas.resolve(query)));
    Ok(())
}

pub(crate) fn run_areas() -> Result<(), AppError> {
    let atlas = load_configured_atlas()?;
    for area in atlas.areas() {
        println!("{} ({})", area.municipality_name, area.municipality_id);
        for legislator in &area.legislators {
            println!(
                "  - {} [{}] stage {} {}",
                legislator.politician_name,
                legislator.constituency_name,
                legislator.recall_stage,
                legislator.recall_status.label()
            );
        }
    }
    Ok(())
}

pub(crate) fn run_check_id(args: TextArgs) {
    println!("{}", verdict(is_valid_national_id(args.text.trim())));
}

pub(crate) fn run_check_mobile(args: TextArgs) {
    println!("{}", verdict(is_valid_mobile_number(args.text.trim())));
}

pub(crate) fn run_normalize_address(args: TextArgs) {
    println!("{}", normalize_address(&args.text));
}

fn verdict(valid: bool) -> &'static str {
    if valid {
        "valid"
    } else {
        "invalid"
    }
}

fn resolution_view(resolution: &Resolution<'_>) -> Value {
    match resolution {
        Resolution::NotFound => json!({ "found": false }),
        Resolution::Divisions(divisions) => json!({ "found": true, "divisions": divisions }),
        Resolution::Legislators(legislators) => {
            json!({ "found": true, "legislators": legislators })
        }
    }
}
