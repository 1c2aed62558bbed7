//! Resume analysis data model.
//!
//! `AnalysisReport` is what the model produces. `ResumeAnalysis` is the same report
//! stamped with an id and creation time by the orchestrator; it serializes flat,
//! in the camelCase shape the model uses.

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeAnalysis {
    pub id: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    #[serde(flatten)]
    pub report: AnalysisReport,
}

/// The structured critique. Every top-level field is required; a response missing
/// any of them fails deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub personal_info: PersonalInfo,
    pub score: ScoreBreakdown,
    pub summary: String,
    pub sections: Sections,
    pub improvements: Vec<Improvement>,
    pub upskilling: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
}

/// Five 0–100 scores. Fractional values from the model are rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    #[serde(deserialize_with = "score")]
    pub overall: u8,
    #[serde(deserialize_with = "score")]
    pub formatting: u8,
    #[serde(deserialize_with = "score")]
    pub impact: u8,
    #[serde(deserialize_with = "score")]
    pub keywords: u8,
    #[serde(deserialize_with = "score")]
    pub relevance: u8,
}

impl ScoreBreakdown {
    /// Label/value pairs in display order.
    pub fn metrics(&self) -> [(&'static str, u8); 5] {
        [
            ("Overall", self.overall),
            ("Formatting", self.formatting),
            ("Impact", self.impact),
            ("Keywords", self.keywords),
            ("Relevance", self.relevance),
        ]
    }
}

fn score<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let value = f64::deserialize(deserializer)?;
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(serde::de::Error::custom(format!(
            "score {value} is outside 0-100"
        )));
    }
    Ok(value.round() as u8)
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Sections {
    #[serde(default)]
    pub experience: Vec<ExperienceItem>,
    #[serde(default)]
    pub education: Vec<EducationItem>,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceItem {
    pub company: String,
    pub role: String,
    pub duration: String,
    pub description: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationItem {
    pub institution: String,
    pub degree: String,
    pub year: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Improvement {
    pub category: String,
    pub suggestion: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn report_json() -> serde_json::Value {
        json!({
            "personalInfo": {"name": "Jane Doe", "email": "jane@example.com", "phone": "+1 555 0100"},
            "score": {"overall": 78, "formatting": 82.4, "impact": 65, "keywords": 70.5, "relevance": 80},
            "summary": "Solid backend engineer with clear ownership of systems.",
            "sections": {
                "experience": [{
                    "company": "Acme",
                    "role": "Senior Engineer",
                    "duration": "2019 - Present",
                    "description": ["Cut p99 latency by 40%"]
                }],
                "education": [{"institution": "TU Berlin", "degree": "MSc CS", "year": "2016"}],
                "skills": ["Rust", "PostgreSQL"]
            },
            "improvements": [
                {"category": "Impact", "suggestion": "Quantify team outcomes", "priority": "High"}
            ],
            "upskilling": ["Kubernetes operators"]
        })
    }

    #[test]
    fn test_full_report_deserializes() {
        let report: AnalysisReport = serde_json::from_value(report_json()).unwrap();
        assert_eq!(report.personal_info.name, "Jane Doe");
        assert!(report.personal_info.linkedin.is_none());
        assert_eq!(report.score.overall, 78);
        assert_eq!(report.score.formatting, 82);
        assert_eq!(report.score.keywords, 71);
        assert_eq!(report.sections.experience[0].description.len(), 1);
        assert_eq!(report.improvements[0].priority, Priority::High);
    }

    #[test]
    fn test_missing_score_field_is_rejected() {
        let mut value = report_json();
        value["score"].as_object_mut().unwrap().remove("relevance");
        assert!(serde_json::from_value::<AnalysisReport>(value).is_err());
    }

    #[test]
    fn test_non_numeric_score_is_rejected() {
        let mut value = report_json();
        value["score"]["impact"] = json!("high");
        assert!(serde_json::from_value::<AnalysisReport>(value).is_err());
    }

    #[test]
    fn test_out_of_range_score_is_rejected() {
        let mut value = report_json();
        value["score"]["overall"] = json!(140);
        assert!(serde_json::from_value::<AnalysisReport>(value.clone()).is_err());
        value["score"]["overall"] = json!(-1);
        assert!(serde_json::from_value::<AnalysisReport>(value).is_err());
    }

    #[test]
    fn test_unknown_priority_is_rejected() {
        let mut value = report_json();
        value["improvements"][0]["priority"] = json!("Urgent");
        assert!(serde_json::from_value::<AnalysisReport>(value).is_err());
    }

    #[test]
    fn test_missing_top_level_field_is_rejected() {
        for field in ["personalInfo", "score", "summary", "sections", "improvements", "upskilling"] {
            let mut value = report_json();
            value.as_object_mut().unwrap().remove(field);
            assert!(
                serde_json::from_value::<AnalysisReport>(value).is_err(),
                "{field} should be required"
            );
        }
    }

    #[test]
    fn test_missing_section_lists_default_to_empty() {
        let mut value = report_json();
        value["sections"] = json!({});
        let report: AnalysisReport = serde_json::from_value(value).unwrap();
        assert!(report.sections.experience.is_empty());
        assert!(report.sections.skills.is_empty());
    }

    #[test]
    fn test_stamped_analysis_serializes_flat() {
        let report: AnalysisReport = serde_json::from_value(report_json()).unwrap();
        let analysis = ResumeAnalysis {
            id: "abc".to_string(),
            timestamp: 1_700_000_000_000,
            report,
        };
        let value = serde_json::to_value(&analysis).unwrap();
        assert_eq!(value["id"], "abc");
        assert_eq!(value["personalInfo"]["name"], "Jane Doe");
        assert_eq!(value["score"]["overall"], 78);
    }
}
