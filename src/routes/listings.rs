use axum::extract::{Multipart, Path, State};
use axum::Json;
use garde::Validate;
use serde::Serialize;

use crate::app_state::AppState;
use crate::db::queries;
use crate::models::listing::{ListingDeclaration, ListingRecord, NewListing};
use crate::models::valuation::ValuationResult;
use crate::routes::ApiError;

/// Alternatives offered when an item fails the sellability gate.
#[derive(Debug, Clone, Serialize)]
pub struct UpcyclingIdea {
    pub title: &'static str,
    pub description: &'static str,
}

const UPCYCLING_IDEAS: &[UpcyclingIdea] = &[
    UpcyclingIdea {
        title: "Cleaning Cloth",
        description: "Cut into squares for durable, reusable cleaning rags.",
    },
    UpcyclingIdea {
        title: "Tote Bag",
        description: "Simple sewing project to turn old shirts into bags.",
    },
    UpcyclingIdea {
        title: "Cushion Cover",
        description: "Repurpose soft fabrics into cozy home decor.",
    },
    UpcyclingIdea {
        title: "Fabric Art",
        description: "Use colorful scraps for patchwork or textile art.",
    },
];

/// Response for both submission and preview valuation.
#[derive(Debug, Serialize)]
pub struct SubmitListingResponse {
    /// Set only when a listing was actually persisted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_id: Option<i64>,
    pub sellable: bool,
    pub valuation: ValuationResult,
    /// Present only for non-sellable items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upcycling_suggestions: Option<&'static [UpcyclingIdea]>,
}

/// Fields accepted alongside the image in the multipart form.
#[derive(Debug, Default)]
struct SubmissionForm {
    name: Option<String>,
    category: Option<String>,
    condition: Option<String>,
    gender: Option<String>,
    size: Option<String>,
    brand: Option<String>,
    months_used: Option<String>,
    image_url: Option<String>,
    seller_name: Option<String>,
    seller_id: Option<String>,
    image: Option<Vec<u8>>,
}

/// Parsed and validated submission, ready for the pipeline.
#[derive(Debug)]
struct Submission {
    name: String,
    declaration: ListingDeclaration,
    image: Vec<u8>,
    image_url: Option<String>,
    seller_name: String,
    seller_id: String,
}

async fn read_form(mut multipart: Multipart) -> Result<SubmissionForm, ApiError> {
    let mut form = SubmissionForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(format!("malformed multipart body: {e}")))?
    {
        let Some(field_name) = field.name().map(str::to_string) else {
            continue;
        };

        if field_name == "image" {
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::Validation(format!("failed to read image: {e}")))?;
            form.image = Some(data.to_vec());
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| ApiError::Validation(format!("failed to read field {field_name}: {e}")))?;

        match field_name.as_str() {
            "name" => form.name = Some(value),
            "category" => form.category = Some(value),
            "condition" => form.condition = Some(value),
            "gender" => form.gender = Some(value),
            "size" => form.size = Some(value),
            "brand" => form.brand = Some(value),
            "months_used" => form.months_used = Some(value),
            "image_url" => form.image_url = Some(value),
            "seller_name" => form.seller_name = Some(value),
            "seller_id" => form.seller_id = Some(value),
            _ => {}
        }
    }

    Ok(form)
}

fn require(value: Option<String>, field: &str) -> Result<String, ApiError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ApiError::Validation(format!("missing required field: {field}")))
}

fn parse_enum<T: std::str::FromStr>(value: &str, field: &str) -> Result<T, ApiError> {
    value
        .parse()
        .map_err(|_| ApiError::Validation(format!("invalid value for {field}: {value}")))
}

/// Validate everything the pipeline needs before stage 1 runs. A submission
/// that fails here never triggers a vision call.
fn validate_submission(form: SubmissionForm) -> Result<Submission, ApiError> {
    let image = form
        .image
        .ok_or_else(|| ApiError::Validation("missing image payload".to_string()))?;
    image::guess_format(&image)
        .map_err(|_| ApiError::Validation("unrecognized image format".to_string()))?;

    let name = require(form.name, "name")?;
    let size = require(form.size, "size")?;
    let category = parse_enum(&require(form.category, "category")?, "category")?;
    let condition = parse_enum(&require(form.condition, "condition")?, "condition")?;
    let gender = parse_enum(&require(form.gender, "gender")?, "gender")?;
    let months_used: u32 = form
        .months_used
        .as_deref()
        .unwrap_or("0")
        .parse()
        .map_err(|_| ApiError::Validation("months_used must be a non-negative integer".into()))?;

    let declaration = ListingDeclaration {
        declared_category: category,
        declared_condition: condition,
        declared_gender: gender,
        declared_size: size,
        declared_brand: form.brand.unwrap_or_default(),
        months_used,
    };
    declaration
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    Ok(Submission {
        name,
        declaration,
        image,
        image_url: form.image_url,
        seller_name: form.seller_name.unwrap_or_else(|| "EcoUser01".to_string()),
        seller_id: form.seller_id.unwrap_or_else(|| "demo_user".to_string()),
    })
}

fn build_response(valuation: ValuationResult, item_id: Option<i64>) -> SubmitListingResponse {
    let sellable = valuation.sellable;
    SubmitListingResponse {
        item_id,
        sellable,
        valuation,
        upcycling_suggestions: if sellable { None } else { Some(UPCYCLING_IDEAS) },
    }
}

/// POST /api/v1/items — submit a listing: validate, run the valuation
/// pipeline, and persist the item when (and only when) it passes the
/// sellability gate.
pub async fn submit_listing(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<SubmitListingResponse>, ApiError> {
    metrics::counter!("listing_submissions_total").increment(1);

    let submission = validate_submission(read_form(multipart).await?)?;
    let valuation = state
        .pipeline
        .run(&submission.image, &submission.declaration)
        .await?;

    if !valuation.sellable {
        metrics::counter!("listings_rejected_not_sellable_total").increment(1);
        tracing::info!(
            grade = %valuation.assessment.sustainability_grade,
            damage = %valuation.assessment.damage_status,
            "Item failed sellability gate, offering recycling guidance"
        );
        return Ok(Json(build_response(valuation, None)));
    }

    let record = queries::insert_listing(&state.db, &new_listing(&submission, &valuation)).await?;
    metrics::counter!("listings_created_total").increment(1);

    tracing::info!(
        item_id = record.id,
        price = valuation.recommended_price,
        trust_score = valuation.trust.score,
        "Listing created"
    );

    Ok(Json(build_response(valuation, Some(record.id))))
}

/// POST /api/v1/items/valuate — run the pipeline without persisting anything.
/// Preview step of the sell flow; a later submission re-runs the pipeline.
pub async fn valuate_listing(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<SubmitListingResponse>, ApiError> {
    let submission = validate_submission(read_form(multipart).await?)?;
    let valuation = state
        .pipeline
        .run(&submission.image, &submission.declaration)
        .await?;
    Ok(Json(build_response(valuation, None)))
}

fn new_listing(submission: &Submission, valuation: &ValuationResult) -> NewListing {
    NewListing {
        name: submission.name.clone(),
        price: valuation.recommended_price as i32,
        category: valuation.declaration.declared_category.to_string(),
        gender: valuation.declaration.declared_gender.to_string(),
        size: valuation.declaration.declared_size.clone(),
        condition: valuation.declaration.declared_condition.to_string(),
        brand: (!valuation.declaration.declared_brand.is_empty())
            .then(|| valuation.declaration.declared_brand.clone()),
        months_used: valuation.declaration.months_used as i32,
        image_url: submission.image_url.clone(),
        seller_name: submission.seller_name.clone(),
        seller_id: submission.seller_id.clone(),
        trust_score: valuation.trust.score as i32,
        water_saved: valuation.impact.water_saved_liters,
        co2_prevented: valuation.impact.co2_prevented_kg,
        waste_diverted: valuation.impact.waste_diverted_grams,
        landfill_prevented: valuation.impact.landfill_prevented_kg,
        lifecycle_extended: valuation.impact.lifecycle_extended_months as i32,
        sustainability_grade: valuation.assessment.sustainability_grade.to_string(),
    }
}

/// GET /api/v1/items — all listings, newest first.
pub async fn list_items(
    State(state): State<AppState>,
) -> Result<Json<Vec<ListingRecord>>, ApiError> {
    let items = queries::list_items(&state.db).await?;
    Ok(Json(items))
}

/// GET /api/v1/items/:id — one listing, 404 when absent.
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ListingRecord>, ApiError> {
    let item = queries::get_item(&state.db, id).await?;
    item.map(Json).ok_or(ApiError::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assessment::ClothingType;
    use crate::models::listing::{DeclaredCondition, Gender};

    fn form_with_image() -> SubmissionForm {
        // Smallest valid PNG header; enough for format sniffing.
        let png: Vec<u8> = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        SubmissionForm {
            name: Some("Blue Denim Jeans".to_string()),
            category: Some("Jeans".to_string()),
            condition: Some("Like New".to_string()),
            gender: Some("Men".to_string()),
            size: Some("L".to_string()),
            brand: Some("Levi's".to_string()),
            months_used: Some("4".to_string()),
            image: Some(png),
            ..SubmissionForm::default()
        }
    }

    #[test]
    fn accepts_complete_submission() {
        let submission = validate_submission(form_with_image()).expect("valid");
        assert_eq!(submission.declaration.declared_category, ClothingType::Jeans);
        assert_eq!(
            submission.declaration.declared_condition,
            DeclaredCondition::LikeNew
        );
        assert_eq!(submission.declaration.declared_gender, Gender::Men);
        assert_eq!(submission.declaration.months_used, 4);
    }

    #[test]
    fn rejects_missing_image() {
        let mut form = form_with_image();
        form.image = None;
        let err = validate_submission(form).expect_err("reject");
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn rejects_missing_size() {
        let mut form = form_with_image();
        form.size = None;
        assert!(matches!(
            validate_submission(form),
            Err(ApiError::Validation(_))
        ));

        let mut form = form_with_image();
        form.size = Some("   ".to_string());
        assert!(matches!(
            validate_submission(form),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn rejects_unknown_category() {
        let mut form = form_with_image();
        form.category = Some("Footwear".to_string());
        assert!(matches!(
            validate_submission(form),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn rejects_non_image_payload() {
        let mut form = form_with_image();
        form.image = Some(b"definitely not an image".to_vec());
        assert!(matches!(
            validate_submission(form),
            Err(ApiError::Validation(_))
        ));
    }
}
