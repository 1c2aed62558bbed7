// Resume analysis prompt constants.
// The response schema mirrors `AnalysisReport`; keep the two in step.

use serde_json::{json, Value};

pub const ANALYSIS_SYSTEM: &str = "\
You are an expert HR recruiter and professional resume reviewer. \
Analyze the provided resume and extract structured information. \
Provide an overall score (0-100) and specific breakdown scores. \
Identify improvements and upskilling opportunities based on modern industry standards. \
Ensure the output is valid JSON according to the specified schema.";

/// Prefix for pasted or extracted resume text.
pub const TEXT_PROMPT_PREFIX: &str = "Analyze this resume text: ";

/// Sent after the inline image part.
pub const IMAGE_PROMPT: &str = "Analyze this resume image.";

/// Gemini `responseSchema` for a resume analysis.
pub fn analysis_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "personalInfo": {
                "type": "OBJECT",
                "properties": {
                    "name": { "type": "STRING" },
                    "email": { "type": "STRING" },
                    "phone": { "type": "STRING" },
                    "linkedin": { "type": "STRING" }
                },
                "required": ["name"]
            },
            "score": {
                "type": "OBJECT",
                "properties": {
                    "overall": { "type": "NUMBER" },
                    "formatting": { "type": "NUMBER" },
                    "impact": { "type": "NUMBER" },
                    "keywords": { "type": "NUMBER" },
                    "relevance": { "type": "NUMBER" }
                },
                "required": ["overall", "formatting", "impact", "keywords", "relevance"]
            },
            "summary": { "type": "STRING" },
            "sections": {
                "type": "OBJECT",
                "properties": {
                    "experience": {
                        "type": "ARRAY",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "company": { "type": "STRING" },
                                "role": { "type": "STRING" },
                                "duration": { "type": "STRING" },
                                "description": { "type": "ARRAY", "items": { "type": "STRING" } }
                            }
                        }
                    },
                    "education": {
                        "type": "ARRAY",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "institution": { "type": "STRING" },
                                "degree": { "type": "STRING" },
                                "year": { "type": "STRING" }
                            }
                        }
                    },
                    "skills": { "type": "ARRAY", "items": { "type": "STRING" } }
                }
            },
            "improvements": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "category": { "type": "STRING" },
                        "suggestion": { "type": "STRING" },
                        "priority": { "type": "STRING", "enum": ["High", "Medium", "Low"] }
                    },
                    "required": ["category", "suggestion", "priority"]
                }
            },
            "upskilling": { "type": "ARRAY", "items": { "type": "STRING" } }
        },
        "required": ["personalInfo", "score", "summary", "sections", "improvements", "upskilling"]
    })
}
