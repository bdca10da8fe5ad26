use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use garde::Validate;
use reqwest::Client;
use serde::Deserialize;

use crate::models::assessment::GarmentAssessment;

/// Failure modes at the vision boundary.
///
/// `Unavailable` is recoverable by retrying the submission; `Malformed`
/// is a hard failure. Neither is retried internally.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("vision service unavailable: {0}")]
    Unavailable(String),

    #[error("vision response failed schema validation: {0}")]
    Malformed(String),
}

/// Abstraction over the external vision model so the pipeline and its tests
/// can substitute a canned-response analyzer without network access.
#[async_trait]
pub trait VisionAnalyzer: Send + Sync {
    /// Analyze a garment photo and return a structured assessment.
    async fn analyze(&self, image_bytes: &[u8]) -> Result<GarmentAssessment, AnalysisError>;
}

const ANALYSIS_PROMPT: &str = concat!(
    "Analyze this clothing item for a circular fashion marketplace. ",
    "Focus ONLY on clothing items (T-shirt, Shirt, Jeans, Bottomwear, Hoodie, Tops, Kurti, Jacket). ",
    "Report: clothingType; size (S, M, L, XL) if determinable; ",
    "damageStatus (No damage, Minor stains, Faded areas, Visible wear, Torn fabric, Severely damaged, Heavy stains); ",
    "qualityRating (High, Medium, Low); brandClass (Premium, Mid-tier, Local, Unknown); ",
    "imageQuality (High, Low); brandTagVisible (true/false); ",
    "sustainabilityGrade (Grade A: no damage and high quality; Grade B: no damage, medium quality; ",
    "Grade C: repairable wear, stains or low quality; Grade D: heavy stains or severe damage); ",
    "lifecycleExtensionScore (months of extra use gained by resale); ",
    "reasoning; confidence (0-1); confidenceScores for condition, brand and quality (each 0-1). ",
    "Return ONLY valid JSON with these exact field names.",
);

/// Client for the Google Gemini `generateContent` endpoint.
pub struct GeminiVisionClient {
    http: Client,
    api_key: String,
    model: String,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

#[derive(Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize)]
struct GeminiPart {
    text: Option<String>,
}

impl GeminiVisionClient {
    pub fn new(api_key: &str, model: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_key: api_key.to_string(),
            model: model.to_string(),
        })
    }
}

#[async_trait]
impl VisionAnalyzer for GeminiVisionClient {
    async fn analyze(&self, image_bytes: &[u8]) -> Result<GarmentAssessment, AnalysisError> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
            self.model
        );

        let request_body = serde_json::json!({
            "contents": [{
                "parts": [
                    { "text": ANALYSIS_PROMPT },
                    {
                        "inline_data": {
                            "mime_type": "image/jpeg",
                            "data": base64::engine::general_purpose::STANDARD.encode(image_bytes),
                        }
                    }
                ]
            }],
            "generationConfig": { "response_mime_type": "application/json" }
        });

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| AnalysisError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalysisError::Unavailable(format!(
                "vision endpoint returned HTTP {status}"
            )));
        }

        let body: GeminiResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::Malformed(e.to_string()))?;

        let text = body
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .and_then(|p| p.text.as_deref())
            .ok_or_else(|| AnalysisError::Malformed("response carried no content".to_string()))?;

        parse_assessment(text)
    }
}

/// Parse and validate the model's JSON payload into a `GarmentAssessment`.
///
/// Rejects missing fields, enum values outside the declared sets, confidences
/// outside [0, 1], and a sustainability grade that contradicts the reported
/// damage/quality pair. Nothing malformed gets past this point, which is what
/// lets stages 2-5 be total functions.
pub fn parse_assessment(payload: &str) -> Result<GarmentAssessment, AnalysisError> {
    let assessment: GarmentAssessment =
        serde_json::from_str(payload).map_err(|e| AnalysisError::Malformed(e.to_string()))?;

    assessment
        .validate()
        .map_err(|e| AnalysisError::Malformed(e.to_string()))?;

    if !assessment.grade_is_consistent() {
        return Err(AnalysisError::Malformed(format!(
            "grade {} contradicts damage '{}' and quality '{}'",
            assessment.sustainability_grade, assessment.damage_status, assessment.quality_rating
        )));
    }

    Ok(assessment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assessment::{ClothingType, DamageStatus, SustainabilityGrade};

    fn payload(grade: &str, damage: &str, quality: &str, confidence: f64) -> String {
        format!(
            r#"{{
                "clothingType": "Jeans",
                "size": "L",
                "damageStatus": "{damage}",
                "qualityRating": "{quality}",
                "brandClass": "Premium",
                "imageQuality": "High",
                "brandTagVisible": true,
                "sustainabilityGrade": "{grade}",
                "lifecycleExtensionScore": 8,
                "reasoning": "Well kept denim with visible brand tag.",
                "confidence": {confidence},
                "confidenceScores": {{ "condition": 0.9, "brand": 0.85, "quality": 0.9 }}
            }}"#
        )
    }

    #[test]
    fn parses_well_formed_payload() {
        let assessment =
            parse_assessment(&payload("Grade A", "No damage", "High", 0.92)).expect("parse");
        assert_eq!(assessment.clothing_type, ClothingType::Jeans);
        assert_eq!(assessment.damage_status, DamageStatus::NoDamage);
        assert_eq!(assessment.sustainability_grade, SustainabilityGrade::A);
        assert!(assessment.is_sellable());
    }

    #[test]
    fn accepts_long_form_quality_strings() {
        let text = payload("Grade A", "No damage", "High", 0.9)
            .replace(r#""qualityRating": "High""#, r#""qualityRating": "High quality""#);
        let assessment = parse_assessment(&text).expect("parse");
        assert_eq!(
            assessment.quality_rating,
            crate::models::assessment::QualityRating::High
        );
    }

    #[test]
    fn rejects_unknown_enum_value() {
        let text = payload("Grade A", "No damage", "High", 0.9)
            .replace(r#""clothingType": "Jeans""#, r#""clothingType": "Sneakers""#);
        let err = parse_assessment(&text).expect_err("should reject");
        assert!(matches!(err, AnalysisError::Malformed(_)));
    }

    #[test]
    fn rejects_confidence_out_of_range() {
        let err =
            parse_assessment(&payload("Grade A", "No damage", "High", 1.4)).expect_err("reject");
        assert!(matches!(err, AnalysisError::Malformed(_)));
    }

    #[test]
    fn rejects_missing_required_field() {
        let text = payload("Grade A", "No damage", "High", 0.9)
            .replace(r#""brandTagVisible": true,"#, "");
        let err = parse_assessment(&text).expect_err("reject");
        assert!(matches!(err, AnalysisError::Malformed(_)));
    }

    #[test]
    fn rejects_grade_contradicting_damage() {
        // Severe damage can never carry Grade A.
        let err = parse_assessment(&payload("Grade A", "Severely damaged", "High", 0.9))
            .expect_err("reject");
        assert!(matches!(err, AnalysisError::Malformed(_)));
    }

    #[test]
    fn size_is_optional() {
        let text = payload("Grade A", "No damage", "High", 0.9).replace(r#""size": "L","#, "");
        let assessment = parse_assessment(&text).expect("parse");
        assert!(assessment.estimated_size.is_none());
    }

    #[test]
    fn rejects_negative_lifecycle_extension() {
        let text = payload("Grade A", "No damage", "High", 0.9)
            .replace(r#""lifecycleExtensionScore": 8"#, r#""lifecycleExtensionScore": -3"#);
        let err = parse_assessment(&text).expect_err("reject");
        assert!(matches!(err, AnalysisError::Malformed(_)));
    }
}
