//! Curated list of the top California investment counties.
//!
//! The list is static editorial content; it is not derived from the models.

use crate::domain::reports::TopArea;

pub const TOP_AREA_COUNT: usize = 5;

struct AreaEntry {
    county: &'static str,
    region: &'static str,
    overall_score: u8,
    price_growth: f64,
    rental_yield: f64,
    population_growth: f64,
    median_price: f64,
    highlights: [&'static str; 3],
    description: &'static str,
}

const AREAS: [AreaEntry; TOP_AREA_COUNT] = [
    AreaEntry {
        county: "Riverside County",
        region: "Inland Empire",
        overall_score: 92,
        price_growth: 8.5,
        rental_yield: 7.2,
        population_growth: 2.8,
        median_price: 650000.0,
        highlights: [
            "Strong population growth",
            "Affordable entry point",
            "High rental demand",
        ],
        description: "Riverside County offers excellent growth potential with strong job creation in logistics and manufacturing, driving consistent population growth and rental demand.",
    },
    AreaEntry {
        county: "Sacramento County",
        region: "Central Valley",
        overall_score: 89,
        price_growth: 7.8,
        rental_yield: 6.8,
        population_growth: 2.1,
        median_price: 580000.0,
        highlights: [
            "State capital benefits",
            "Tech spillover growth",
            "Strong rental market",
        ],
        description: "Sacramento benefits from government stability and tech industry expansion, creating a balanced market with steady appreciation and strong rental yields.",
    },
    AreaEntry {
        county: "Fresno County",
        region: "Central Valley",
        overall_score: 85,
        price_growth: 9.2,
        rental_yield: 8.1,
        population_growth: 1.9,
        median_price: 420000.0,
        highlights: [
            "High cash flow potential",
            "Agricultural stability",
            "Low entry costs",
        ],
        description: "Fresno offers exceptional cash flow opportunities with strong agricultural economy and growing logistics sector driving consistent demand.",
    },
    AreaEntry {
        county: "San Joaquin County",
        region: "Central Valley",
        overall_score: 82,
        price_growth: 7.1,
        rental_yield: 6.9,
        population_growth: 1.7,
        median_price: 525000.0,
        highlights: [
            "Bay Area commuter market",
            "Industrial growth",
            "Value appreciation",
        ],
        description: "San Joaquin County benefits from Bay Area proximity while maintaining affordability, with strong industrial development supporting local economy.",
    },
    AreaEntry {
        county: "Kern County",
        region: "Central Valley",
        overall_score: 78,
        price_growth: 6.8,
        rental_yield: 7.5,
        population_growth: 1.4,
        median_price: 385000.0,
        highlights: [
            "Energy sector growth",
            "Affordable housing",
            "Strong yields",
        ],
        description: "Kern County offers strong rental yields supported by energy sector employment and agricultural stability, with significant upside potential.",
    },
];

/// Top counties, best first.
pub fn top_investment_areas() -> Vec<TopArea> {
    AREAS
        .iter()
        .zip(1u32..)
        .map(|(entry, id)| TopArea {
            id,
            county: entry.county.to_string(),
            region: entry.region.to_string(),
            overall_score: entry.overall_score,
            price_growth: entry.price_growth,
            rental_yield: entry.rental_yield,
            population_growth: entry.population_growth,
            median_price: entry.median_price,
            highlights: entry.highlights.iter().map(|h| h.to_string()).collect(),
            description: entry.description.to_string(),
        })
        .collect()
}
