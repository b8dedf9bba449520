//! College Scorecard client: pages through the schools endpoint and normalizes rows.
//!
//! Optionally left-joins an IPEDS admissions CSV for the precise percentile bands.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use crate::models::school::SchoolRecord;
use crate::schools::ipeds::{load_ipeds_admissions, merge_admissions};
use crate::schools::{SchoolDataError, SchoolSource};

const SCORECARD_BASE: &str = "https://api.data.gov/ed/collegescorecard/v1/schools";
const PER_PAGE: u32 = 100;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(45);
/// Predominantly associate's (2) or bachelor's (3) degree granting.
const DEGREES_PREDOMINANT: &str = "2,3";

const SCORECARD_FIELDS: &[&str] = &[
    "id",
    "school.name",
    "school.city",
    "school.state",
    "school.zip",
    "school.school_url",
    "school.ownership",
    "school.region_id",
    "latest.admissions.admission_rate.overall",
    "latest.admissions.sat_scores.midpoint.math",
    "latest.admissions.sat_scores.midpoint.critical_reading",
    "latest.admissions.act_scores.midpoint.cumulative",
    "latest.student.size",
    "latest.cost.tuition.in_state",
    "latest.cost.tuition.out_of_state",
    "school.degrees_awarded.predominant",
];

/// Filters and limits for a Scorecard fetch.
#[derive(Debug, Clone, Default)]
pub struct ScorecardQuery {
    pub state: Option<String>,
    /// 1 = public, 2 = private nonprofit, 3 = private for-profit.
    pub ownership: Option<String>,
    pub max_pages: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ScorecardPage {
    #[serde(default)]
    metadata: ScorecardMetadata,
    #[serde(default)]
    results: Vec<ScorecardRow>,
}

#[derive(Debug, Default, Deserialize)]
struct ScorecardMetadata {
    #[serde(default)]
    total: u64,
}

/// Raw Scorecard row. The API returns requested fields as flat dotted keys.
#[derive(Debug, Default, Deserialize)]
pub struct ScorecardRow {
    id: Option<u64>,
    #[serde(rename = "school.name")]
    name: Option<String>,
    #[serde(rename = "school.city")]
    city: Option<String>,
    #[serde(rename = "school.state")]
    state: Option<String>,
    #[serde(rename = "school.zip")]
    zip: Option<String>,
    #[serde(rename = "school.school_url")]
    url: Option<String>,
    #[serde(rename = "latest.admissions.admission_rate.overall")]
    admission_rate: Option<f64>,
    #[serde(rename = "latest.admissions.sat_scores.midpoint.math")]
    sat_math_mid: Option<f64>,
    #[serde(rename = "latest.admissions.sat_scores.midpoint.critical_reading")]
    sat_reading_mid: Option<f64>,
    #[serde(rename = "latest.admissions.act_scores.midpoint.cumulative")]
    act_mid: Option<f64>,
    #[serde(rename = "latest.student.size")]
    student_size: Option<f64>,
    #[serde(rename = "latest.cost.tuition.in_state")]
    tuition_in_state: Option<f64>,
    #[serde(rename = "latest.cost.tuition.out_of_state")]
    tuition_out_of_state: Option<f64>,
}

impl ScorecardRow {
    /// Rows without an id cannot be joined or displayed and are dropped.
    pub fn into_record(self) -> Option<SchoolRecord> {
        Some(SchoolRecord {
            id: self.id?,
            name: self.name.unwrap_or_default(),
            city: self.city,
            state: self.state,
            zip: self.zip,
            url: self.url,
            admission_rate: self.admission_rate,
            sat_math_mid: self.sat_math_mid,
            sat_reading_mid: self.sat_reading_mid,
            act_mid: self.act_mid,
            student_size: self.student_size.filter(|s| *s >= 0.0).map(|s| s as u64),
            tuition_in_state: self.tuition_in_state,
            tuition_out_of_state: self.tuition_out_of_state,
            ..Default::default()
        })
    }
}

/// Number of pages to request for `total` results, honoring an optional cap.
pub fn page_count(total: u64, max_pages: Option<u32>) -> u64 {
    let pages = total.div_ceil(u64::from(PER_PAGE));
    match max_pages {
        Some(cap) => pages.min(u64::from(cap)),
        None => pages,
    }
}

pub struct ScorecardSource {
    client: Client,
    base_url: String,
    api_key: String,
    query: ScorecardQuery,
    ipeds_csv: Option<PathBuf>,
}

impl ScorecardSource {
    pub fn new(
        api_key: String,
        query: ScorecardQuery,
        ipeds_csv: Option<PathBuf>,
    ) -> Result<Self, SchoolDataError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            base_url: SCORECARD_BASE.to_string(),
            api_key,
            query,
            ipeds_csv,
        })
    }

    /// Points the client at another schools endpoint, e.g. a mirror or a local stub.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn params(&self, page: u64) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("api_key", self.api_key.clone()),
            ("fields", SCORECARD_FIELDS.join(",")),
            ("per_page", PER_PAGE.to_string()),
            ("page", page.to_string()),
            (
                "school.degrees_awarded.predominant__in",
                DEGREES_PREDOMINANT.to_string(),
            ),
        ];
        if let Some(state) = &self.query.state {
            params.push(("school.state", state.clone()));
        }
        if let Some(ownership) = &self.query.ownership {
            params.push(("school.ownership", ownership.clone()));
        }
        params
    }

    async fn fetch_page(&self, page: u64) -> Result<ScorecardPage, SchoolDataError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&self.params(page))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SchoolDataError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<ScorecardPage>().await?)
    }

    /// Fetches every page (0-indexed) up to the configured cap.
    pub async fn fetch_all(&self) -> Result<Vec<SchoolRecord>, SchoolDataError> {
        let mut records = Vec::new();
        let mut page = 0u64;

        loop {
            let body = self.fetch_page(page).await?;
            let fetched = body.results.len();
            records.extend(body.results.into_iter().filter_map(ScorecardRow::into_record));
            debug!("Scorecard page {page}: {fetched} rows (total {})", body.metadata.total);

            page += 1;
            if fetched == 0 || page >= page_count(body.metadata.total, self.query.max_pages) {
                break;
            }
        }

        info!("Fetched {} schools from College Scorecard", records.len());
        Ok(records)
    }
}

#[async_trait]
impl SchoolSource for ScorecardSource {
    fn name(&self) -> &'static str {
        "scorecard"
    }

    async fn load(&self) -> Result<Vec<SchoolRecord>, SchoolDataError> {
        let schools = self.fetch_all().await?;

        let Some(path) = &self.ipeds_csv else {
            return Ok(schools);
        };
        match load_ipeds_admissions(path)? {
            Some(admissions) => Ok(merge_admissions(schools, &admissions)),
            None => Ok(schools),
        }
    }
}
