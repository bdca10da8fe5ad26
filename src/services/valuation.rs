use std::sync::Arc;
use std::time::Instant;

use crate::models::assessment::Sellability;
use crate::models::listing::ListingDeclaration;
use crate::models::valuation::ValuationResult;
use crate::services::pricing::{PricingConfig, PricingEngine};
use crate::services::sustainability::{SustainabilityCalculator, SustainabilityConfig};
use crate::services::trust::{TrustConfig, TrustScoringEngine};
use crate::services::vision::{AnalysisError, VisionAnalyzer};

/// Bundled engine configuration for one pipeline instance.
#[derive(Debug, Clone, Default)]
pub struct ValuationConfig {
    pub trust: TrustConfig,
    pub pricing: PricingConfig,
    pub sustainability: SustainabilityConfig,
}

/// The listing valuation pipeline: vision analysis, trust scoring, pricing,
/// sustainability impact, sellability gate — strictly in that order, once per
/// submission. Stages after the vision call are pure, so concurrent
/// submissions share nothing mutable.
pub struct ValuationPipeline {
    vision: Arc<dyn VisionAnalyzer>,
    trust: TrustScoringEngine,
    pricing: PricingEngine,
    sustainability: SustainabilityCalculator,
}

impl ValuationPipeline {
    pub fn new(vision: Arc<dyn VisionAnalyzer>, config: ValuationConfig) -> Self {
        Self {
            vision,
            trust: TrustScoringEngine::new(config.trust),
            pricing: PricingEngine::new(config.pricing),
            sustainability: SustainabilityCalculator::new(config.sustainability),
        }
    }

    /// Run the full pipeline for one submission. A vision failure aborts the
    /// run; no partial state is left behind. Trust, price and impact are
    /// computed even for non-sellable items (they come back as diagnostics),
    /// but the `sellable` flag is what decides whether the caller may persist
    /// a listing.
    pub async fn run(
        &self,
        image_bytes: &[u8],
        declaration: &ListingDeclaration,
    ) -> Result<ValuationResult, AnalysisError> {
        let started = Instant::now();
        let assessment = self.vision.analyze(image_bytes).await?;
        metrics::histogram!("vision_analysis_seconds").record(started.elapsed().as_secs_f64());

        tracing::info!(
            clothing_type = %assessment.clothing_type,
            damage = %assessment.damage_status,
            grade = %assessment.sustainability_grade,
            confidence = assessment.overall_confidence,
            "Vision analysis complete"
        );

        let trust = self.trust.score(&assessment, declaration);
        let price = self.pricing.price(
            &assessment,
            declaration.declared_gender,
            declaration.months_used,
            trust.penalty_multiplier,
        );
        let impact = self
            .sustainability
            .impact(assessment.clothing_type, assessment.lifecycle_extension_months);

        let sellable = assessment.sustainability_grade.sellability() == Sellability::Sellable;

        tracing::info!(
            trust_score = trust.score,
            mismatches = trust.mismatches.len(),
            price,
            sellable,
            "Valuation complete"
        );

        Ok(ValuationResult {
            assessment,
            declaration: declaration.clone(),
            trust,
            recommended_price: price,
            impact,
            sellable,
        })
    }
}
