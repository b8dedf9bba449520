//! IPEDS admissions CSV ingest and the left join onto Scorecard records.
//!
//! Only the admission-rate and percentile-band columns are read. Cells that are
//! empty or not numeric are treated as absent rather than failing the file.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use csv::StringRecord;
use tracing::{info, warn};

use crate::models::school::SchoolRecord;
use crate::schools::SchoolDataError;

const UNITID: &str = "UNITID";

/// Admissions columns for one UNITID.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IpedsAdmissions {
    pub adm_rate: Option<f64>,
    pub sat_verbal_25: Option<f64>,
    pub sat_verbal_75: Option<f64>,
    pub sat_math_25: Option<f64>,
    pub sat_math_75: Option<f64>,
    pub act_25: Option<f64>,
    pub act_75: Option<f64>,
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (name.trim().to_ascii_uppercase(), idx))
        .collect()
}

fn numeric(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
    column: &str,
) -> Option<f64> {
    let idx = *header_map.get(column)?;
    record
        .get(idx)?
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Reads admissions rows from a CSV file.
///
/// Returns `Ok(None)` when the file has no `UNITID` column, so callers skip the merge.
/// Duplicate UNITIDs keep the first row.
pub fn load_ipeds_admissions(
    path: &Path,
) -> Result<Option<HashMap<u64, IpedsAdmissions>>, SchoolDataError> {
    let file = File::open(path)?;
    read_ipeds_admissions(file)
}

pub fn read_ipeds_admissions<R: std::io::Read>(
    reader: R,
) -> Result<Option<HashMap<u64, IpedsAdmissions>>, SchoolDataError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let header_map = build_header_map(reader.headers()?);
    if !header_map.contains_key(UNITID) {
        warn!("IPEDS CSV missing {UNITID}; skipping IPEDS merge");
        return Ok(None);
    }

    let mut rows = HashMap::new();
    let mut skipped = 0usize;
    for record in reader.records() {
        let record = record?;
        let Some(unit_id) = numeric(&record, &header_map, UNITID)
            .filter(|id| *id >= 0.0)
            .map(|id| id as u64)
        else {
            skipped += 1;
            continue;
        };

        rows.entry(unit_id).or_insert_with(|| IpedsAdmissions {
            adm_rate: numeric(&record, &header_map, "ADM_RATE"),
            sat_verbal_25: numeric(&record, &header_map, "SATVR25"),
            sat_verbal_75: numeric(&record, &header_map, "SATVR75"),
            sat_math_25: numeric(&record, &header_map, "SATMT25"),
            sat_math_75: numeric(&record, &header_map, "SATMT75"),
            act_25: numeric(&record, &header_map, "ACTCM25"),
            act_75: numeric(&record, &header_map, "ACTCM75"),
        });
    }

    info!("Read {} IPEDS admissions rows ({skipped} without UNITID)", rows.len());
    Ok(Some(rows))
}

/// Left join: every school is kept, matched ones gain admissions fields.
pub fn merge_admissions(
    schools: Vec<SchoolRecord>,
    admissions: &HashMap<u64, IpedsAdmissions>,
) -> Vec<SchoolRecord> {
    schools
        .into_iter()
        .map(|mut school| {
            if let Some(adm) = admissions.get(&school.id) {
                school.admission_rate_alt = adm.adm_rate;
                school.sat_verbal_25 = adm.sat_verbal_25;
                school.sat_verbal_75 = adm.sat_verbal_75;
                school.sat_math_25 = adm.sat_math_25;
                school.sat_math_75 = adm.sat_math_75;
                school.act_25 = adm.act_25;
                school.act_75 = adm.act_75;
            }
            school
        })
        .collect()
}
