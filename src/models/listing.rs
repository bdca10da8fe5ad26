use chrono::{DateTime, Utc};
use garde::Validate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::models::assessment::ClothingType;

/// Target gender for a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display)]
pub enum Gender {
    Men,
    Women,
    Unisex,
}

/// Condition as claimed by the seller. Independent of (and cross-checked
/// against) the vision model's damage assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display)]
pub enum DeclaredCondition {
    New,
    #[serde(rename = "Like New")]
    #[strum(serialize = "Like New")]
    LikeNew,
    Good,
    Fair,
}

impl DeclaredCondition {
    /// Conditions that claim an essentially unworn item.
    pub fn claims_pristine(self) -> bool {
        matches!(self, DeclaredCondition::New | DeclaredCondition::LikeNew)
    }
}

/// Seller-declared facts about the garment, submitted alongside the photo.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ListingDeclaration {
    #[garde(skip)]
    pub declared_category: ClothingType,

    #[garde(skip)]
    pub declared_condition: DeclaredCondition,

    #[garde(skip)]
    pub declared_gender: Gender,

    /// Mandatory; a submission without a size never reaches the pipeline.
    #[garde(length(min = 1, max = 8))]
    pub declared_size: String,

    #[garde(length(max = 100))]
    pub declared_brand: String,

    #[garde(range(max = 600))]
    pub months_used: u32,
}

/// Row to insert for a freshly valuated, sellable item. Field layout mirrors
/// `ListingRecord` minus the server-assigned id and timestamp.
#[derive(Debug, Clone)]
pub struct NewListing {
    pub name: String,
    pub price: i32,
    pub category: String,
    pub gender: String,
    pub size: String,
    pub condition: String,
    pub brand: Option<String>,
    pub months_used: i32,
    pub image_url: Option<String>,
    pub seller_name: String,
    pub seller_id: String,
    pub trust_score: i32,
    pub water_saved: f64,
    pub co2_prevented: f64,
    pub waste_diverted: f64,
    pub landfill_prevented: f64,
    pub lifecycle_extended: i32,
    pub sustainability_grade: String,
}

/// A persisted marketplace listing: the full ValuationResult flattened into
/// the `items` row, plus the server-assigned id and timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingRecord {
    pub id: i64,
    pub name: String,
    pub price: i32,
    pub category: String,
    pub gender: String,
    pub size: String,
    pub condition: String,
    pub brand: Option<String>,
    pub months_used: i32,
    pub image_url: Option<String>,
    pub seller_name: String,
    pub seller_id: String,
    pub trust_score: i32,
    pub water_saved: f64,
    pub co2_prevented: f64,
    pub waste_diverted: f64,
    pub landfill_prevented: f64,
    pub lifecycle_extended: i32,
    pub sustainability_grade: String,
    pub created_at: DateTime<Utc>,
}

/// Marketplace user profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub total_impact_score: i32,
    pub items_reused: i32,
}
