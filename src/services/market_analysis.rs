use futures::future::try_join_all;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;
use crate::helpers::errors::PlacesError;
use crate::models::market_report::MarketReport;
use crate::models::place::{Location, TaggedPlace};
use crate::models::place_type::is_allowed_place_type;
use crate::models::search_request::SearchRequest;
use crate::repositories::google_places_repo::{GooglePlacesRepo, PlacesSettings};

pub const SELECT_PLACE_TYPE_MESSAGE: &str = "Please select at least one place type.";
pub const NO_RESULTS_MESSAGE: &str = "No results found for the selected filters.";

/// Search parameters shared by every selected place type.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct MarketQuery {
    pub location: Location,
    pub radius_km: f64,
    pub place_types: Vec<String>,
    pub only_with_photo: bool,
    pub max_results: usize,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    NoPlaceTypesSelected { message: String },
    NoResults { message: String },
    Report(Box<MarketReport>),
}

/// Runs one search per selected place type and aggregates the union into a report.
pub async fn analyze_market(
    http_client: &Client,
    settings: &PlacesSettings,
    query: &MarketQuery,
) -> Result<AnalysisOutcome, PlacesError> {
    if query.place_types.is_empty() {
        return Ok(AnalysisOutcome::NoPlaceTypesSelected {
            message: SELECT_PLACE_TYPE_MESSAGE.to_string(),
        });
    }

    let requests = query
        .place_types
        .iter()
        .map(|place_type| {
            if !is_allowed_place_type(place_type) {
                return Err(PlacesError::InvalidRequest(format!(
                    "unknown place type: {}",
                    place_type
                )));
            }
            SearchRequest::new(
                query.location.clone(),
                query.radius_km,
                Some(place_type.clone()),
                query.only_with_photo,
                query.max_results,
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    let repo = GooglePlacesRepo::new(http_client.clone(), settings.clone())?;

    info!(
        "Analyzing market around {} for {} place type(s)",
        requests[0].location_param(), requests.len()
    );
    let per_type = try_join_all(requests.iter().map(|request| repo.search(request))).await?;

    let records: Vec<TaggedPlace> = query
        .place_types
        .iter()
        .zip(per_type)
        .flat_map(|(place_type, records)| {
            records.into_iter().map(move |record| TaggedPlace {
                record,
                place_type_searched: place_type.clone(),
            })
        })
        .collect();

    if records.is_empty() {
        return Ok(AnalysisOutcome::NoResults {
            message: NO_RESULTS_MESSAGE.to_string(),
        });
    }

    info!("Market analysis collected {} record(s)", records.len());
    Ok(AnalysisOutcome::Report(Box::new(MarketReport::build(&query.place_types, records))))
}
