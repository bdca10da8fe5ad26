use crate::models::assessment::GarmentAssessment;
use crate::models::listing::ListingDeclaration;
use crate::models::valuation::{Mismatch, TrustScoreResult};

/// Penalty points deducted per failed cross-check. Penalties are additive.
#[derive(Debug, Clone)]
pub struct TrustConfig {
    pub category_mismatch_penalty: u32,
    pub condition_overstated_penalty: u32,
}

impl Default for TrustConfig {
    fn default() -> Self {
        Self {
            category_mismatch_penalty: 25,
            condition_overstated_penalty: 35,
        }
    }
}

/// Cross-validates seller-declared attributes against the vision assessment.
/// Pure and deterministic; no I/O.
#[derive(Debug, Clone, Default)]
pub struct TrustScoringEngine {
    config: TrustConfig,
}

impl TrustScoringEngine {
    pub fn new(config: TrustConfig) -> Self {
        Self { config }
    }

    /// Start from 100, subtract a fixed penalty per failed check, clamp to
    /// [0, 100]. The penalty multiplier is score / 100, so it is exactly 1.0
    /// when no mismatch was found.
    pub fn score(
        &self,
        assessment: &GarmentAssessment,
        declaration: &ListingDeclaration,
    ) -> TrustScoreResult {
        let mut mismatches = Vec::new();
        let mut deduction: u32 = 0;

        if declaration.declared_category != assessment.clothing_type {
            mismatches.push(Mismatch::CategoryMismatch);
            deduction += self.config.category_mismatch_penalty;
        }

        if declaration.declared_condition.claims_pristine() && assessment.damage_status.is_severe()
        {
            mismatches.push(Mismatch::ConditionOverstated);
            deduction += self.config.condition_overstated_penalty;
        }

        let score = 100u32.saturating_sub(deduction);
        TrustScoreResult {
            score,
            penalty_multiplier: (score as f64 / 100.0).clamp(0.0, 1.0),
            mismatches,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assessment::{
        BrandClass, ClothingType, DamageStatus, FieldConfidence, GarmentAssessment, GarmentSize,
        ImageQuality, QualityRating, SustainabilityGrade,
    };
    use crate::models::listing::{DeclaredCondition, Gender};

    fn assessment(clothing_type: ClothingType, damage: DamageStatus) -> GarmentAssessment {
        let quality = QualityRating::High;
        GarmentAssessment {
            clothing_type,
            estimated_size: Some(GarmentSize::L),
            damage_status: damage,
            quality_rating: quality,
            brand_class: BrandClass::Premium,
            image_quality: ImageQuality::High,
            brand_tag_visible: true,
            sustainability_grade: SustainabilityGrade::derived_from(damage, quality),
            lifecycle_extension_months: 8.0,
            reasoning: "test".to_string(),
            overall_confidence: 0.9,
            confidence_by_field: FieldConfidence {
                condition: 0.9,
                brand: 0.85,
                quality: 0.9,
            },
        }
    }

    fn declaration(category: ClothingType, condition: DeclaredCondition) -> ListingDeclaration {
        ListingDeclaration {
            declared_category: category,
            declared_condition: condition,
            declared_gender: Gender::Men,
            declared_size: "L".to_string(),
            declared_brand: "Levi's".to_string(),
            months_used: 4,
        }
    }

    #[test]
    fn honest_declaration_scores_full_marks() {
        let engine = TrustScoringEngine::default();
        let result = engine.score(
            &assessment(ClothingType::Jeans, DamageStatus::NoDamage),
            &declaration(ClothingType::Jeans, DeclaredCondition::LikeNew),
        );
        assert_eq!(result.score, 100);
        assert_eq!(result.penalty_multiplier, 1.0);
        assert!(result.mismatches.is_empty());
    }

    #[test]
    fn category_mismatch_lowers_score() {
        let engine = TrustScoringEngine::default();
        let result = engine.score(
            &assessment(ClothingType::Hoodie, DamageStatus::NoDamage),
            &declaration(ClothingType::Jeans, DeclaredCondition::Good),
        );
        assert_eq!(result.mismatches, vec![Mismatch::CategoryMismatch]);
        assert!(result.score < 100);
        assert!(result.penalty_multiplier < 1.0);
    }

    #[test]
    fn overstated_condition_lowers_score() {
        let engine = TrustScoringEngine::default();
        let result = engine.score(
            &assessment(ClothingType::Jeans, DamageStatus::TornFabric),
            &declaration(ClothingType::Jeans, DeclaredCondition::LikeNew),
        );
        assert_eq!(result.mismatches, vec![Mismatch::ConditionOverstated]);
        assert!(result.score < 100);
    }

    #[test]
    fn fair_declaration_on_damaged_item_is_not_overstated() {
        let engine = TrustScoringEngine::default();
        let result = engine.score(
            &assessment(ClothingType::Jeans, DamageStatus::HeavyStains),
            &declaration(ClothingType::Jeans, DeclaredCondition::Fair),
        );
        assert!(result.mismatches.is_empty());
        assert_eq!(result.score, 100);
    }

    #[test]
    fn penalties_accumulate() {
        let engine = TrustScoringEngine::default();
        let both = engine.score(
            &assessment(ClothingType::Hoodie, DamageStatus::SeverelyDamaged),
            &declaration(ClothingType::Jeans, DeclaredCondition::New),
        );
        let category_only = engine.score(
            &assessment(ClothingType::Hoodie, DamageStatus::NoDamage),
            &declaration(ClothingType::Jeans, DeclaredCondition::New),
        );
        let condition_only = engine.score(
            &assessment(ClothingType::Jeans, DamageStatus::SeverelyDamaged),
            &declaration(ClothingType::Jeans, DeclaredCondition::New),
        );
        assert_eq!(both.mismatches.len(), 2);
        assert!(both.score <= category_only.score);
        assert!(both.score <= condition_only.score);
        assert_eq!(
            both.score,
            100 - (100 - category_only.score) - (100 - condition_only.score)
        );
    }

    #[test]
    fn score_clamped_at_zero_with_oversized_penalties() {
        let engine = TrustScoringEngine::new(TrustConfig {
            category_mismatch_penalty: 80,
            condition_overstated_penalty: 80,
        });
        let result = engine.score(
            &assessment(ClothingType::Hoodie, DamageStatus::HeavyStains),
            &declaration(ClothingType::Jeans, DeclaredCondition::New),
        );
        assert_eq!(result.score, 0);
        assert_eq!(result.penalty_multiplier, 0.0);
    }

    #[test]
    fn scoring_is_deterministic() {
        let engine = TrustScoringEngine::default();
        let a = assessment(ClothingType::Jeans, DamageStatus::TornFabric);
        let d = declaration(ClothingType::Jeans, DeclaredCondition::LikeNew);
        assert_eq!(engine.score(&a, &d), engine.score(&a, &d));
    }
}
