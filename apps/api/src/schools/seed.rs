//! The built-in six-school table used when no Scorecard key is configured.

use async_trait::async_trait;

use crate::models::school::SchoolRecord;
use crate::schools::{SchoolDataError, SchoolSource};

pub struct SeedSource;

#[async_trait]
impl SchoolSource for SeedSource {
    fn name(&self) -> &'static str {
        "seed"
    }

    async fn load(&self) -> Result<Vec<SchoolRecord>, SchoolDataError> {
        Ok(seed_schools())
    }
}

struct SeedRow {
    id: u64,
    name: &'static str,
    city: &'static str,
    state: &'static str,
    admission_rate: f64,
    sat_math_mid: f64,
    sat_reading_mid: f64,
    act_mid: f64,
    // (SATMT25, SATMT75, SATVR25, SATVR75, ACTCM25, ACTCM75)
    bands: (f64, f64, f64, f64, f64, f64),
}

const SEED: &[SeedRow] = &[
    SeedRow {
        id: 1,
        name: "Harvard University",
        city: "Cambridge",
        state: "MA",
        admission_rate: 0.054,
        sat_math_mid: 770.0,
        sat_reading_mid: 750.0,
        act_mid: 34.0,
        bands: (740.0, 800.0, 720.0, 780.0, 33.0, 35.0),
    },
    SeedRow {
        id: 2,
        name: "Stanford University",
        city: "Stanford",
        state: "CA",
        admission_rate: 0.048,
        sat_math_mid: 760.0,
        sat_reading_mid: 740.0,
        act_mid: 34.0,
        bands: (730.0, 800.0, 710.0, 770.0, 32.0, 35.0),
    },
    SeedRow {
        id: 3,
        name: "MIT",
        city: "Cambridge",
        state: "MA",
        admission_rate: 0.073,
        sat_math_mid: 780.0,
        sat_reading_mid: 730.0,
        act_mid: 34.0,
        bands: (750.0, 800.0, 700.0, 760.0, 33.0, 35.0),
    },
    SeedRow {
        id: 4,
        name: "UC Berkeley",
        city: "Berkeley",
        state: "CA",
        admission_rate: 0.175,
        sat_math_mid: 730.0,
        sat_reading_mid: 665.0,
        act_mid: 32.0,
        bands: (680.0, 780.0, 630.0, 700.0, 30.0, 35.0),
    },
    SeedRow {
        id: 5,
        name: "NYU",
        city: "New York",
        state: "NY",
        admission_rate: 0.211,
        sat_math_mid: 720.0,
        sat_reading_mid: 675.0,
        act_mid: 32.0,
        bands: (670.0, 770.0, 650.0, 700.0, 30.0, 34.0),
    },
    SeedRow {
        id: 6,
        name: "Penn State",
        city: "University Park",
        state: "PA",
        admission_rate: 0.76,
        sat_math_mid: 650.0,
        sat_reading_mid: 610.0,
        act_mid: 28.0,
        bands: (600.0, 700.0, 580.0, 640.0, 25.0, 30.0),
    },
];

pub fn seed_schools() -> Vec<SchoolRecord> {
    SEED.iter()
        .map(|row| {
            let (math_25, math_75, verbal_25, verbal_75, act_25, act_75) = row.bands;
            SchoolRecord {
                id: row.id,
                name: row.name.to_string(),
                city: Some(row.city.to_string()),
                state: Some(row.state.to_string()),
                admission_rate: Some(row.admission_rate),
                sat_math_25: Some(math_25),
                sat_math_75: Some(math_75),
                sat_verbal_25: Some(verbal_25),
                sat_verbal_75: Some(verbal_75),
                act_25: Some(act_25),
                act_75: Some(act_75),
                sat_math_mid: Some(row.sat_math_mid),
                sat_reading_mid: Some(row.sat_reading_mid),
                act_mid: Some(row.act_mid),
                ..Default::default()
            }
        })
        .collect()
}
