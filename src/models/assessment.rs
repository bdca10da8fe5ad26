use garde::Validate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Garment categories the vision model is allowed to report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, EnumIter,
)]
pub enum ClothingType {
    #[serde(rename = "T-shirt")]
    #[strum(serialize = "T-shirt")]
    TShirt,
    Shirt,
    Jeans,
    Bottomwear,
    Hoodie,
    Tops,
    Kurti,
    Jacket,
}

/// Size estimate. The model may abstain, so this is always optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display)]
pub enum GarmentSize {
    S,
    M,
    L,
    XL,
}

/// Visual condition of the garment, ordered from best to worst.
/// Variant order is the severity order; `Ord` relies on it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, EnumString, Display,
)]
pub enum DamageStatus {
    #[serde(rename = "No damage")]
    #[strum(serialize = "No damage")]
    NoDamage,
    #[serde(rename = "Minor stains")]
    #[strum(serialize = "Minor stains")]
    MinorStains,
    #[serde(rename = "Faded areas")]
    #[strum(serialize = "Faded areas")]
    FadedAreas,
    #[serde(rename = "Visible wear")]
    #[strum(serialize = "Visible wear")]
    VisibleWear,
    #[serde(rename = "Torn fabric")]
    #[strum(serialize = "Torn fabric")]
    TornFabric,
    #[serde(rename = "Severely damaged")]
    #[strum(serialize = "Severely damaged")]
    SeverelyDamaged,
    #[serde(rename = "Heavy stains")]
    #[strum(serialize = "Heavy stains")]
    HeavyStains,
}

impl DamageStatus {
    /// Damage severe enough that declaring the item "New" or "Like New"
    /// counts as an overstated condition.
    pub fn is_severe(self) -> bool {
        matches!(
            self,
            DamageStatus::TornFabric | DamageStatus::SeverelyDamaged | DamageStatus::HeavyStains
        )
    }
}

/// Fabric quality classification. The model sometimes answers with the
/// long form ("High quality"), so both spellings are accepted on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display)]
pub enum QualityRating {
    #[serde(alias = "High quality")]
    High,
    #[serde(alias = "Medium quality")]
    Medium,
    #[serde(alias = "Low quality")]
    Low,
}

/// Brand tier detected from tags or styling cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display)]
pub enum BrandClass {
    #[serde(alias = "Premium brand")]
    Premium,
    #[serde(rename = "Mid-tier", alias = "Mid-tier brand")]
    #[strum(serialize = "Mid-tier")]
    MidTier,
    #[serde(alias = "Local brand")]
    Local,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display)]
pub enum ImageQuality {
    High,
    Low,
}

/// Terminal states of the sellability gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Sellability {
    Sellable,
    NotSellable,
}

/// Resale-viability grade, ordered A (best) to D (worst).
/// Wire and database representation is the long form, e.g. "Grade A".
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, EnumString, Display,
)]
pub enum SustainabilityGrade {
    #[serde(rename = "Grade A")]
    #[strum(serialize = "Grade A")]
    A,
    #[serde(rename = "Grade B")]
    #[strum(serialize = "Grade B")]
    B,
    #[serde(rename = "Grade C")]
    #[strum(serialize = "Grade C")]
    C,
    #[serde(rename = "Grade D")]
    #[strum(serialize = "Grade D")]
    D,
}

impl SustainabilityGrade {
    /// The single grade-based eligibility rule. Both the vision adapter's
    /// derived flag and the sellability gate go through here so the two
    /// call sites cannot drift apart.
    pub fn sellability(self) -> Sellability {
        match self {
            SustainabilityGrade::A | SustainabilityGrade::B => Sellability::Sellable,
            SustainabilityGrade::C | SustainabilityGrade::D => Sellability::NotSellable,
        }
    }

    /// Grade implied by the observed damage and quality. The model is
    /// required to report exactly this grade; anything else is a schema
    /// violation at the vision boundary.
    pub fn derived_from(damage: DamageStatus, quality: QualityRating) -> Self {
        match damage {
            DamageStatus::SeverelyDamaged | DamageStatus::HeavyStains => SustainabilityGrade::D,
            DamageStatus::TornFabric
            | DamageStatus::VisibleWear
            | DamageStatus::FadedAreas
            | DamageStatus::MinorStains => SustainabilityGrade::C,
            DamageStatus::NoDamage => match quality {
                QualityRating::High => SustainabilityGrade::A,
                QualityRating::Medium => SustainabilityGrade::B,
                QualityRating::Low => SustainabilityGrade::C,
            },
        }
    }
}

/// Per-field confidence scores reported by the vision model.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FieldConfidence {
    #[garde(range(min = 0.0, max = 1.0))]
    pub condition: f64,

    #[garde(range(min = 0.0, max = 1.0))]
    pub brand: f64,

    #[garde(range(min = 0.0, max = 1.0))]
    pub quality: f64,
}

/// Structured garment assessment returned by the vision service.
///
/// Field names mirror the model's JSON response schema. Immutable once
/// produced; stages 2-5 only ever borrow it.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GarmentAssessment {
    #[garde(skip)]
    pub clothing_type: ClothingType,

    #[serde(rename = "size", default)]
    #[garde(skip)]
    pub estimated_size: Option<GarmentSize>,

    #[garde(skip)]
    pub damage_status: DamageStatus,

    #[garde(skip)]
    pub quality_rating: QualityRating,

    #[garde(skip)]
    pub brand_class: BrandClass,

    #[garde(skip)]
    pub image_quality: ImageQuality,

    #[garde(skip)]
    pub brand_tag_visible: bool,

    #[garde(skip)]
    pub sustainability_grade: SustainabilityGrade,

    /// Estimated additional months of usable life gained by resale.
    #[serde(rename = "lifecycleExtensionScore")]
    #[garde(range(min = 0.0))]
    pub lifecycle_extension_months: f64,

    #[garde(skip)]
    pub reasoning: String,

    #[serde(rename = "confidence")]
    #[garde(range(min = 0.0, max = 1.0))]
    pub overall_confidence: f64,

    #[serde(rename = "confidenceScores")]
    #[garde(dive)]
    pub confidence_by_field: FieldConfidence,
}

impl GarmentAssessment {
    /// Grade-based eligibility, derived flag for API responses.
    /// Same rule as the sellability gate by construction.
    pub fn is_sellable(&self) -> bool {
        self.sustainability_grade.sellability() == Sellability::Sellable
    }

    /// Check the invariant that the reported grade matches the grade
    /// implied by damage and quality.
    pub fn grade_is_consistent(&self) -> bool {
        self.sustainability_grade
            == SustainabilityGrade::derived_from(self.damage_status, self.quality_rating)
    }
}
