use anyhow::Context;
use crate::models::place::TaggedPlace;

pub const EXPORT_FILE_NAME: &str = "market_research_data.csv";

const COLUMNS: [&str; 16] = [
    "business_status",
    "name",
    "place_id",
    "is_open_now",
    "rating",
    "type",
    "user_ratings_total",
    "type_string",
    "vicinity",
    "price_level",
    "has_photos",
    "latitude",
    "longitude",
    "permanently_closed",
    "price_level_symbols",
    "Place Type Searched",
];

/// Writes the whole working set, one row per place, missing values left blank.
pub fn places_to_csv(places: &[TaggedPlace]) -> anyhow::Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(COLUMNS).context("Failed to write CSV header")?;

    for place in places {
        let record = &place.record;
        let types = serde_json::to_string(&record.types)?;
        writer
            .write_record([
                record.business_status.clone().unwrap_or_default(),
                record.name.clone(),
                record.place_id.clone(),
                record.is_open_now.to_string(),
                optional(record.rating),
                types,
                optional(record.user_ratings_total),
                record.type_string.clone(),
                record.vicinity.clone().unwrap_or_default(),
                record.price_level.to_string(),
                record.has_photos.to_string(),
                optional(record.latitude),
                optional(record.longitude),
                record.permanently_closed.to_string(),
                record.price_level_symbols.clone(),
                place.place_type_searched.clone(),
            ])
            .with_context(|| format!("Failed to write CSV row for place {}", record.place_id))?;
    }

    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV export: {}", e))
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
