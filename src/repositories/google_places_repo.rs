use reqwest::Client;
use tracing::{debug, info, warn};
use crate::helpers::backoff::BackoffPolicy;
use crate::helpers::errors::PlacesError;
use crate::models::place::{NearbySearchPage, PlaceRecord};
use crate::models::search_request::SearchRequest;

pub const NEARBY_SEARCH_URL: &str = "https://maps.googleapis.com/maps/api/place/nearbysearch/json";

#[derive(Clone, Debug, PartialEq)]
pub struct PlacesSettings {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub backoff: BackoffPolicy,
}

pub struct GooglePlacesRepo {
    http_client: Client,
    api_key: String,
    endpoint: String,
    backoff: BackoffPolicy,
}

impl GooglePlacesRepo {
    pub fn new(
        http_client: Client,
        settings: PlacesSettings,
    ) -> Result<Self, PlacesError> {
        let api_key = settings.api_key.ok_or_else(|| {
            PlacesError::Configuration("GOOGLE_MAPS_API_KEY is not set".to_string())
        })?;

        Ok(Self {
            http_client,
            api_key,
            endpoint: settings.endpoint,
            backoff: settings.backoff,
        })
    }

    /// Walks Nearby Search pages until `max_results` records are collected or
    /// Google stops handing out continuation tokens.
    pub async fn search(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<PlaceRecord>, PlacesError> {
        let mut records: Vec<PlaceRecord> = Vec::new();
        let mut page_token: Option<String> = None;
        let mut pages = 0usize;

        while records.len() < request.max_results {
            if page_token.is_some() {
                self.backoff.wait().await;
            }

            let page = self.fetch_page(request, page_token.as_deref()).await?;
            pages += 1;

            if !page.is_success() {
                warn!(
                    "Places API returned status {} for type {:?} after {} page(s)",
                    page.status, request.place_type, pages
                );
                return Err(PlacesError::RemoteService {
                    status: page.status,
                    detail: page.error_message,
                });
            }

            let next_token = page.continuation().map(str::to_string);
            let remaining = request.max_results - records.len();
            records.extend(
                page.results
                    .into_iter()
                    .filter(|candidate| !request.require_photo || candidate.has_photos())
                    .take(remaining)
                    .map(PlaceRecord::from),
            );

            match next_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        info!(
            "Collected {} place(s) of type {:?} across {} page(s)",
            records.len(), request.place_type, pages
        );
        Ok(records)
    }

    async fn fetch_page(
        &self,
        request: &SearchRequest,
        page_token: Option<&str>,
    ) -> Result<NearbySearchPage, PlacesError> {
        let mut params: Vec<(&str, String)> = vec![
            ("location", request.location_param()),
            ("radius", request.radius_meters().to_string()),
            ("key", self.api_key.clone()),
        ];
        if let Some(place_type) = &request.place_type {
            params.push(("type", place_type.clone()));
        }
        if let Some(token) = page_token {
            params.push(("pagetoken", token.to_string()));
        }

        debug!("Requesting nearby search page, continuation: {}", page_token.is_some());
        let page = self
            .http_client
            .get(&self.endpoint)
            .query(&params)
            .send()
            .await?
            .error_for_status()?
            .json::<NearbySearchPage>()
            .await?;

        Ok(page)
    }
}
