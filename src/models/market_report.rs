use std::collections::{BTreeMap, HashMap};
use serde::{Deserialize, Serialize};
use crate::models::place::{price_symbols, TaggedPlace};

pub const TOP_PLACE_TYPES: usize = 10;
pub const NOT_DEFINED: &str = "Not Defined";
pub const NOT_PROVIDED: &str = "Not Provided";

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct MarketOverview {
    pub total_competitors: usize,
    pub average_rating: Option<f64>,
    pub total_reviews: u64,
    pub currently_open: usize,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

/// One point of the rating vs. price chart, sized by review count.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct RatingPricePoint {
    pub name: String,
    pub rating: Option<f64>,
    pub price_level_display: String,
    pub user_ratings_total: Option<u64>,
    pub place_type_searched: String,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct MarketReport {
    pub overview: MarketOverview,
    pub results_per_place_type: Vec<LabelCount>,
    pub price_level_distribution: Vec<LabelCount>,
    pub rating_vs_price_level: Vec<RatingPricePoint>,
    pub business_status_distribution: Vec<LabelCount>,
    pub top_place_types: Vec<LabelCount>,
    pub insights: Vec<String>,
    pub records: Vec<TaggedPlace>,
}

impl MarketReport {
    /// `searched` keeps the selection order so the per type counts line up with the request.
    pub fn build(searched: &[String], records: Vec<TaggedPlace>) -> Self {
        let overview = MarketOverview {
            total_competitors: records.len(),
            average_rating: mean(records.iter().filter_map(|p| p.record.rating)),
            total_reviews: records
                .iter()
                .filter_map(|p| p.record.user_ratings_total)
                .sum(),
            currently_open: records.iter().filter(|p| p.record.is_open_now).count(),
        };

        let results_per_place_type = searched
            .iter()
            .map(|place_type| LabelCount {
                label: place_type.clone(),
                count: records
                    .iter()
                    .filter(|p| &p.place_type_searched == place_type)
                    .count(),
            })
            .collect();

        let insights = build_insights(&records, &overview);

        Self {
            price_level_distribution: price_level_distribution(&records),
            rating_vs_price_level: rating_vs_price_level(&records),
            business_status_distribution: business_status_distribution(&records),
            top_place_types: top_place_types(&records, TOP_PLACE_TYPES),
            results_per_place_type,
            insights,
            overview,
            records,
        }
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

pub fn price_level_label(price_level: u8) -> String {
    if price_level == 0 {
        NOT_DEFINED.to_string()
    } else {
        price_symbols(price_level)
    }
}

pub fn price_level_display(price_level: u8) -> String {
    if price_level == 0 {
        NOT_DEFINED.to_string()
    } else {
        format!("Level {}", price_level)
    }
}

/// Ordered by ascending price level, "Not Defined" first.
fn price_level_distribution(records: &[TaggedPlace]) -> Vec<LabelCount> {
    let mut by_level: BTreeMap<u8, usize> = BTreeMap::new();
    for place in records {
        *by_level.entry(place.record.price_level).or_insert(0) += 1;
    }

    by_level
        .into_iter()
        .map(|(level, count)| LabelCount { label: price_level_label(level), count })
        .collect()
}

fn rating_vs_price_level(records: &[TaggedPlace]) -> Vec<RatingPricePoint> {
    records
        .iter()
        .map(|place| RatingPricePoint {
            name: place.record.name.clone(),
            rating: place.record.rating,
            price_level_display: price_level_display(place.record.price_level),
            user_ratings_total: place.record.user_ratings_total,
            place_type_searched: place.place_type_searched.clone(),
        })
        .collect()
}

fn business_status_distribution(records: &[TaggedPlace]) -> Vec<LabelCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for place in records {
        let status = place.record.business_status.as_deref().unwrap_or(NOT_PROVIDED);
        *counts.entry(status).or_insert(0) += 1;
    }
    sorted_by_count(counts)
}

fn top_place_types(records: &[TaggedPlace], limit: usize) -> Vec<LabelCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for place in records {
        for place_type in &place.record.types {
            *counts.entry(place_type.as_str()).or_insert(0) += 1;
        }
    }

    let mut sorted = sorted_by_count(counts);
    sorted.truncate(limit);
    sorted
}

/// Highest count first, ties broken alphabetically so output is stable.
fn sorted_by_count(counts: HashMap<&str, usize>) -> Vec<LabelCount> {
    let mut sorted: Vec<LabelCount> = counts
        .into_iter()
        .map(|(label, count)| LabelCount { label: label.to_string(), count })
        .collect();
    sorted.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    sorted
}

pub fn market_saturation(total: usize) -> &'static str {
    if total > 50 {
        "High"
    } else if total > 20 {
        "Medium"
    } else {
        "Low"
    }
}

fn build_insights(records: &[TaggedPlace], overview: &MarketOverview) -> Vec<String> {
    let total = records.len();
    let average_reviews = mean(
        records
            .iter()
            .filter_map(|p| p.record.user_ratings_total)
            .map(|reviews| reviews as f64),
    );
    let price_defined = records.iter().filter(|p| p.record.price_level > 0).count();
    let price_defined_percentage = if total == 0 {
        0.0
    } else {
        price_defined as f64 / total as f64 * 100.0
    };
    let with_photos = records.iter().filter(|p| p.record.has_photos).count();

    vec![
        format!("📊 Market Saturation: {}", market_saturation(total)),
        format!("⭐ Average Rating: {}", format_optional(overview.average_rating, 1)),
        format!("📝 Average Reviews per Business: {}", format_optional(average_reviews, 0)),
        format!(
            "💰 Price Level Information: {:.1}% of businesses have defined price levels",
            price_defined_percentage
        ),
        format!("🏪 Currently Open Businesses: {}", overview.currently_open),
        format!("📸 Businesses with Photos: {}", with_photos),
    ]
}

fn format_optional(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(value) => format!("{:.*}", precision, value),
        None => "n/a".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::place::PlaceRecord;

    #[allow(clippy::too_many_arguments)]
    fn place(
        searched: &str,
        name: &str,
        rating: Option<f64>,
        reviews: Option<u64>,
        price_level: u8,
        open: bool,
        status: Option<&str>,
        types: &[&str],
    ) -> TaggedPlace {
        TaggedPlace {
            record: PlaceRecord {
                place_id: format!("id-{}", name),
                name: name.to_string(),
                business_status: status.map(str::to_string),
                permanently_closed: false,
                is_open_now: open,
                rating,
                user_ratings_total: reviews,
                types: types.iter().map(|t| t.to_string()).collect(),
                type_string: types.join(", "),
                vicinity: None,
                latitude: None,
                longitude: None,
                price_level,
                price_level_symbols: price_symbols(price_level),
                has_photos: name.starts_with('P'),
            },
            place_type_searched: searched.to_string(),
        }
    }

    fn sample() -> Vec<TaggedPlace> {
        vec![
            place("cafe", "Perk", Some(4.0), Some(100), 1, true, Some("OPERATIONAL"), &["cafe", "food"]),
            place("cafe", "Brew", Some(5.0), Some(50), 0, false, Some("OPERATIONAL"), &["cafe", "store"]),
            place("restaurant", "Plate", None, None, 2, true, None, &["restaurant", "food"]),
            place("restaurant", "Grill", Some(3.0), Some(30), 2, true, Some("CLOSED_TEMPORARILY"), &["restaurant", "food"]),
        ]
    }

    fn searched() -> Vec<String> {
        vec!["cafe".to_string(), "restaurant".to_string()]
    }

    #[test]
    fn overview_counts_open_places_and_skips_missing_ratings() {
        let report = MarketReport::build(&searched(), sample());

        assert_eq!(report.overview.total_competitors, 4);
        assert_eq!(report.overview.currently_open, 3);
        assert_eq!(report.overview.total_reviews, 180);
        assert_eq!(report.overview.average_rating, Some(4.0));
    }

    #[test]
    fn counts_results_per_searched_type_in_selection_order() {
        let report = MarketReport::build(&searched(), sample());

        assert_eq!(
            report.results_per_place_type,
            vec![
                LabelCount { label: "cafe".to_string(), count: 2 },
                LabelCount { label: "restaurant".to_string(), count: 2 },
            ]
        );
    }

    #[test]
    fn price_distribution_labels_level_zero_as_not_defined() {
        let report = MarketReport::build(&searched(), sample());

        assert_eq!(
            report.price_level_distribution,
            vec![
                LabelCount { label: NOT_DEFINED.to_string(), count: 1 },
                LabelCount { label: "💰".to_string(), count: 1 },
                LabelCount { label: "💰💰".to_string(), count: 2 },
            ]
        );
    }

    #[test]
    fn scatter_points_use_level_labels() {
        let report = MarketReport::build(&searched(), sample());
        let displays: Vec<&str> = report
            .rating_vs_price_level
            .iter()
            .map(|p| p.price_level_display.as_str())
            .collect();

        assert_eq!(displays, vec!["Level 1", NOT_DEFINED, "Level 2", "Level 2"]);
        assert_eq!(report.rating_vs_price_level[0].place_type_searched, "cafe");
    }

    #[test]
    fn status_distribution_fills_missing_status() {
        let report = MarketReport::build(&searched(), sample());

        assert_eq!(
            report.business_status_distribution,
            vec![
                LabelCount { label: "OPERATIONAL".to_string(), count: 2 },
                LabelCount { label: "CLOSED_TEMPORARILY".to_string(), count: 1 },
                LabelCount { label: NOT_PROVIDED.to_string(), count: 1 },
            ]
        );
    }

    #[test]
    fn top_place_types_are_sorted_and_capped() {
        let report = MarketReport::build(&searched(), sample());
        assert_eq!(report.top_place_types[0], LabelCount { label: "food".to_string(), count: 3 });
        assert_eq!(report.top_place_types[1], LabelCount { label: "cafe".to_string(), count: 2 });

        let many: Vec<TaggedPlace> = (0..15)
            .map(|i| {
                let kind = format!("kind_{:02}", i);
                place("store", &format!("S{}", i), None, None, 0, false, None, &[kind.as_str()])
            })
            .collect();
        let report = MarketReport::build(&["store".to_string()], many);
        assert_eq!(report.top_place_types.len(), TOP_PLACE_TYPES);
        assert_eq!(report.top_place_types[0].label, "kind_00");
    }

    #[test]
    fn insights_follow_dashboard_wording() {
        let report = MarketReport::build(&searched(), sample());

        assert_eq!(
            report.insights,
            vec![
                "📊 Market Saturation: Low".to_string(),
                "⭐ Average Rating: 4.0".to_string(),
                "📝 Average Reviews per Business: 60".to_string(),
                "💰 Price Level Information: 75.0% of businesses have defined price levels".to_string(),
                "🏪 Currently Open Businesses: 3".to_string(),
                "📸 Businesses with Photos: 2".to_string(),
            ]
        );
    }

    #[test]
    fn saturation_thresholds() {
        assert_eq!(market_saturation(20), "Low");
        assert_eq!(market_saturation(21), "Medium");
        assert_eq!(market_saturation(50), "Medium");
        assert_eq!(market_saturation(51), "High");
    }
}
