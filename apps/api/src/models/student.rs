use serde::{Deserialize, Serialize};

/// A student's academic profile as submitted by the frontend.
///
/// Every field is optional on the wire. Absent or `null` numbers score as
/// zero/undefined rather than failing the request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StudentProfile {
    pub gpa: Option<f64>,
    #[serde(rename = "satEBRW")]
    pub sat_ebrw: Option<f64>,
    #[serde(rename = "satMath")]
    pub sat_math: Option<f64>,
    #[serde(rename = "actScore")]
    pub act_score: Option<f64>,
    #[serde(rename = "toeflScore")]
    pub toefl_score: Option<f64>,
    #[serde(rename = "apCourses")]
    pub ap_courses: Option<f64>,
    #[serde(rename = "ibScore")]
    pub ib_score: Option<f64>,
    #[serde(rename = "intendedMajor")]
    pub intended_major: Option<String>,
}

impl StudentProfile {
    pub fn gpa(&self) -> f64 {
        self.gpa.unwrap_or(0.0)
    }

    pub fn sat_ebrw(&self) -> f64 {
        self.sat_ebrw.unwrap_or(0.0)
    }

    pub fn sat_math(&self) -> f64 {
        self.sat_math.unwrap_or(0.0)
    }

    /// AP course count, clipped at zero.
    pub fn ap_courses(&self) -> f64 {
        self.ap_courses.unwrap_or(0.0).max(0.0)
    }

    pub fn ib_score(&self) -> f64 {
        self.ib_score.unwrap_or(0.0)
    }

    /// Combined SAT (EBRW + Math), defined only when at least one section was reported.
    pub fn sat_total(&self) -> Option<f64> {
        let (ebrw, math) = (self.sat_ebrw(), self.sat_math());
        if ebrw > 0.0 || math > 0.0 {
            Some(ebrw + math)
        } else {
            None
        }
    }

    /// ACT composite, defined only when nonzero.
    pub fn act(&self) -> Option<f64> {
        self.act_score.filter(|act| *act > 0.0)
    }

    /// The normalized view echoed back alongside recommendations.
    pub fn summary(&self) -> StudentSummary {
        StudentSummary {
            gpa: self.gpa(),
            sat_total: self.sat_total().unwrap_or(0.0),
            act: self.act_score.unwrap_or(0.0),
            toefl: self.toefl_score.unwrap_or(0.0),
            ap: self.ap_courses(),
            ib: self.ib_score(),
            major: self.intended_major.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StudentSummary {
    pub gpa: f64,
    pub sat_total: f64,
    pub act: f64,
    pub toefl: f64,
    pub ap: f64,
    pub ib: f64,
    pub major: String,
}
