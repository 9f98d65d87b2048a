use serde::{Deserialize, Serialize};

/// One page of a Nearby Search response as Google returns it.
#[derive(Clone, Serialize, Deserialize, Debug, Default)]
pub struct NearbySearchPage {
    pub status: String,
    #[serde(default)]
    pub results: Vec<RawPlace>,
    #[serde(default)]
    pub next_page_token: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl NearbySearchPage {
    pub fn is_success(&self) -> bool {
        matches!(self.status.as_str(), "OK" | "ZERO_RESULTS")
    }

    /// Continuation token, ignoring the empty string Google occasionally sends.
    pub fn continuation(&self) -> Option<&str> {
        self.next_page_token
            .as_deref()
            .filter(|token| !token.is_empty())
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, Default)]
pub struct RawPlace {
    pub place_id: Option<String>,
    pub name: Option<String>,
    pub business_status: Option<String>,
    pub permanently_closed: Option<bool>,
    pub opening_hours: Option<OpeningHours>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u64>,
    #[serde(default)]
    pub types: Vec<String>,
    pub vicinity: Option<String>,
    pub price_level: Option<u8>,
    #[serde(default)]
    pub photos: Vec<Photo>,
    pub geometry: Option<Geometry>,
}

impl RawPlace {
    pub fn has_photos(&self) -> bool {
        !self.photos.is_empty()
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, Default)]
pub struct OpeningHours {
    pub open_now: Option<bool>,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Photo {
    #[serde(default)]
    pub height: i64,
    #[serde(default)]
    pub html_attributions: Vec<String>,
    #[serde(default)]
    pub photo_reference: String,
    #[serde(default)]
    pub width: i64,
}

#[derive(Clone, Serialize, Deserialize, Debug, Default)]
pub struct Geometry {
    pub location: Option<Location>,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

/// Flattened view of a place used by every report and the CSV export.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct PlaceRecord {
    pub place_id: String,
    pub name: String,
    pub business_status: Option<String>,
    pub permanently_closed: bool,
    pub is_open_now: bool,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u64>,
    #[serde(rename = "type")]
    pub types: Vec<String>,
    pub type_string: String,
    pub vicinity: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// 0 means Google did not provide one
    pub price_level: u8,
    pub price_level_symbols: String,
    pub has_photos: bool,
}

impl From<RawPlace> for PlaceRecord {
    fn from(raw: RawPlace) -> Self {
        let has_photos = raw.has_photos();
        let price_level = raw.price_level.unwrap_or(0);
        let location = raw.geometry.and_then(|geometry| geometry.location);

        Self {
            place_id: raw.place_id.unwrap_or_default(),
            name: raw.name.unwrap_or_default(),
            business_status: raw.business_status,
            permanently_closed: raw.permanently_closed.unwrap_or(false),
            is_open_now: raw
                .opening_hours
                .and_then(|hours| hours.open_now)
                .unwrap_or(false),
            rating: raw.rating,
            user_ratings_total: raw.user_ratings_total,
            type_string: raw.types.join(", "),
            types: raw.types,
            vicinity: raw.vicinity,
            latitude: location.as_ref().map(|l| l.lat),
            longitude: location.as_ref().map(|l| l.lng),
            price_level,
            price_level_symbols: price_symbols(price_level),
            has_photos,
        }
    }
}

pub fn price_symbols(price_level: u8) -> String {
    "💰".repeat(price_level as usize)
}

/// A record together with the place type whose search produced it.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct TaggedPlace {
    #[serde(flatten)]
    pub record: PlaceRecord,
    #[serde(rename = "Place Type Searched")]
    pub place_type_searched: String,
}
