use crate::models::assessment::{BrandClass, ClothingType, GarmentAssessment, QualityRating};
use crate::models::listing::Gender;

/// Tunable pricing policy. Passed in at construction so alternate policies
/// can be tested by substitution.
#[derive(Debug, Clone)]
pub struct PricingConfig {
    /// Fraction of value retained per month of use. Multiplicative decay:
    /// the price approaches but never reaches zero as age grows.
    pub monthly_decay: f64,
    /// Platform-wide price floor, in whole currency units.
    pub floor: u32,
    /// Platform-wide price ceiling. Matches the marketplace's price-filter
    /// range, which tops out at 900.
    pub ceiling: u32,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            monthly_decay: 0.97,
            floor: 50,
            ceiling: 900,
        }
    }
}

impl PricingConfig {
    /// Base resale price of a barely-used, mid-market garment of this type.
    pub fn base_price(&self, clothing_type: ClothingType) -> u32 {
        match clothing_type {
            ClothingType::TShirt => 250,
            ClothingType::Shirt => 350,
            ClothingType::Jeans => 500,
            ClothingType::Bottomwear => 400,
            ClothingType::Hoodie => 550,
            ClothingType::Tops => 300,
            ClothingType::Kurti => 350,
            ClothingType::Jacket => 700,
        }
    }

    pub fn brand_multiplier(&self, brand: BrandClass) -> f64 {
        match brand {
            BrandClass::Premium => 1.6,
            BrandClass::MidTier => 1.2,
            BrandClass::Local => 0.9,
            BrandClass::Unknown => 0.8,
        }
    }

    pub fn quality_multiplier(&self, quality: QualityRating) -> f64 {
        match quality {
            QualityRating::High => 1.2,
            QualityRating::Medium => 1.0,
            QualityRating::Low => 0.8,
        }
    }

    /// Currently flat across genders; kept as a policy hook.
    pub fn gender_multiplier(&self, gender: Gender) -> f64 {
        match gender {
            Gender::Men | Gender::Women | Gender::Unisex => 1.0,
        }
    }
}

/// Computes a recommended resale price. Pure and deterministic.
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    config: PricingConfig,
}

impl PricingEngine {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    /// base(type) x brand x quality x gender, depreciated by monthly decay,
    /// scaled by the trust penalty, rounded, then clamped to the platform
    /// floor/ceiling. Non-increasing in `months_used`, non-decreasing in
    /// `penalty_multiplier`, never negative or fractional.
    pub fn price(
        &self,
        assessment: &GarmentAssessment,
        gender: Gender,
        months_used: u32,
        penalty_multiplier: f64,
    ) -> u32 {
        let cfg = &self.config;
        let base = cfg.base_price(assessment.clothing_type) as f64
            * cfg.brand_multiplier(assessment.brand_class)
            * cfg.quality_multiplier(assessment.quality_rating)
            * cfg.gender_multiplier(gender);

        let depreciated = base * cfg.monthly_decay.powf(f64::from(months_used));
        let adjusted = depreciated * penalty_multiplier.clamp(0.0, 1.0);

        (adjusted.round() as u32).clamp(cfg.floor, cfg.ceiling)
    }
}
