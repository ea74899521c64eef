//! Compiled-in tree fixture.
//!
//! The catalog has no backing database: these six records are the whole
//! store, initialized once per process and never mutated.

use crate::model::tree::{TreeId, TreeRecord};
use once_cell::sync::Lazy;

pub(crate) static FIXTURE_TREES: Lazy<Vec<TreeRecord>> = Lazy::new(|| {
    vec![
        record(
            "tree-001",
            "Oak Tree",
            "Quercus robur",
            "Central Park Section A-12",
            "2023-03-15",
            1,
            "2.5 feet",
            "A majestic oak tree planted as part of our urban reforestation initiative.",
            &[
                "Air purification",
                "Wildlife habitat",
                "Carbon sequestration",
                "Soil erosion prevention",
            ],
            "50 lbs CO2/year",
            "Regular watering required. Pruning scheduled for winter.",
        ),
        record(
            "tree-002",
            "Maple Tree",
            "Acer saccharum",
            "Riverside Trail Marker 15",
            "2023-04-10",
            1,
            "3.0 feet",
            "Beautiful sugar maple that will provide stunning fall colors and maple syrup potential.",
            &[
                "Shade provision",
                "Autumn beauty",
                "Carbon absorption",
                "Syrup production",
            ],
            "48 lbs CO2/year",
            "Mulching completed. Monitor for pest activity.",
        ),
        record(
            "tree-003",
            "Pine Tree",
            "Pinus strobus",
            "Hillside Grove Plot 7",
            "2023-02-28",
            1,
            "4.2 feet",
            "Eastern White Pine providing year-round greenery and wildlife shelter.",
            &[
                "Evergreen coverage",
                "Wind protection",
                "Wildlife shelter",
                "Air quality improvement",
            ],
            "55 lbs CO2/year",
            "Excellent growth rate. No maintenance needed currently.",
        ),
        record(
            "tree-004",
            "Cherry Blossom",
            "Prunus serrulata",
            "Community Garden East",
            "2023-03-22",
            1,
            "2.8 feet",
            "Ornamental cherry tree that will bloom beautiful pink flowers each spring.",
            &[
                "Aesthetic beauty",
                "Pollinator support",
                "Community morale",
                "Seasonal interest",
            ],
            "40 lbs CO2/year",
            "Fertilized last month. Watch for cherry fruit fly.",
        ),
        record(
            "tree-005",
            "Birch Tree",
            "Betula papyrifera",
            "Wetland Restoration Area",
            "2023-05-01",
            0,
            "1.8 feet",
            "Paper birch known for its distinctive white bark and ecological importance.",
            &[
                "Wetland restoration",
                "Water filtration",
                "Native species support",
                "Erosion control",
            ],
            "35 lbs CO2/year",
            "Recently planted. Monitor soil moisture levels.",
        ),
        record(
            "tree-006",
            "Redwood Sapling",
            "Sequoia sempervirens",
            "Memorial Grove Section B",
            "2023-01-15",
            1,
            "5.5 feet",
            "Young coast redwood that will grow to be one of the tallest trees in our park.",
            &[
                "Carbon sequestration champion",
                "Longevity symbol",
                "Educational value",
                "Climate resilience",
            ],
            "85 lbs CO2/year",
            "Exceptional growth. Protected area established around base.",
        ),
    ]
});

#[allow(clippy::too_many_arguments)]
fn record(
    id: &str,
    common_name: &str,
    scientific_name: &str,
    location: &str,
    planted_date: &str,
    age: u32,
    height: &str,
    description: &str,
    benefits: &[&str],
    carbon_offset: &str,
    maintenance_notes: &str,
) -> TreeRecord {
    TreeRecord {
        id: TreeId::new(id),
        common_name: common_name.to_string(),
        scientific_name: scientific_name.to_string(),
        location: location.to_string(),
        planted_date: planted_date.to_string(),
        age,
        height: height.to_string(),
        description: description.to_string(),
        benefits: benefits.iter().map(|value| value.to_string()).collect(),
        carbon_offset: carbon_offset.to_string(),
        maintenance_notes: Some(maintenance_notes.to_string()),
    }
}
