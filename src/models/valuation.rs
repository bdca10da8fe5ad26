use serde::{Deserialize, Serialize};
use strum::Display;

use crate::models::assessment::GarmentAssessment;
use crate::models::listing::ListingDeclaration;

/// Kinds of inconsistency between seller claims and the vision assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Mismatch {
    CategoryMismatch,
    ConditionOverstated,
}

/// Outcome of cross-validating a declaration against an assessment.
/// Owned by the pipeline invocation that produced it; never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustScoreResult {
    /// 0-100, 100 meaning full agreement.
    pub score: u32,
    /// score / 100, applied to the price. Exactly 1.0 iff no mismatches.
    pub penalty_multiplier: f64,
    pub mismatches: Vec<Mismatch>,
}

/// Environmental impact attributed to reselling the garment instead of
/// producing a new equivalent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SustainabilityMetrics {
    pub water_saved_liters: f64,
    pub co2_prevented_kg: f64,
    pub waste_diverted_grams: f64,
    pub landfill_prevented_kg: f64,
    pub lifecycle_extended_months: u32,
}

/// Final pipeline output for one submission. Created once; a re-submission
/// produces a fresh value rather than updating this one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValuationResult {
    pub assessment: GarmentAssessment,
    pub declaration: ListingDeclaration,
    pub trust: TrustScoreResult,
    pub recommended_price: u32,
    pub impact: SustainabilityMetrics,
    pub sellable: bool,
}
