use crate::models::assessment::ClothingType;
use crate::models::valuation::SustainabilityMetrics;

/// Production footprint of one new garment of a given type.
#[derive(Debug, Clone, Copy)]
pub struct GarmentFootprint {
    pub water_liters: f64,
    pub co2_kg: f64,
    pub waste_grams: f64,
}

/// Tunable impact model constants.
#[derive(Debug, Clone)]
pub struct SustainabilityConfig {
    /// Credit fraction granted for the act of resale itself, even when the
    /// estimated lifecycle extension is zero.
    pub base_credit: f64,
    /// Additional credit fraction per month of lifecycle extension.
    pub credit_per_month: f64,
    /// Fraction of diverted waste counted as landfill mass prevented.
    pub landfill_fraction: f64,
}

impl Default for SustainabilityConfig {
    fn default() -> Self {
        Self {
            base_credit: 0.10,
            credit_per_month: 0.075,
            landfill_fraction: 0.6,
        }
    }
}

impl SustainabilityConfig {
    /// Per-garment production baselines. Denim dominates the table: one new
    /// pair of jeans costs roughly 7600 liters of water.
    pub fn footprint(&self, clothing_type: ClothingType) -> GarmentFootprint {
        let (water_liters, co2_kg, waste_grams) = match clothing_type {
            ClothingType::TShirt => (2700.0, 7.0, 150.0),
            ClothingType::Shirt => (3000.0, 8.0, 180.0),
            ClothingType::Jeans => (7600.0, 33.0, 700.0),
            ClothingType::Bottomwear => (4500.0, 18.0, 400.0),
            ClothingType::Hoodie => (5000.0, 20.0, 450.0),
            ClothingType::Tops => (2500.0, 6.0, 140.0),
            ClothingType::Kurti => (3000.0, 8.0, 200.0),
            ClothingType::Jacket => (6500.0, 28.0, 600.0),
        };
        GarmentFootprint {
            water_liters,
            co2_kg,
            waste_grams,
        }
    }

    /// Fraction of the production footprint credited as saved, as a single
    /// formula over the lifecycle extension: base credit plus a per-month
    /// share, capped at one full garment's footprint.
    pub fn credit_fraction(&self, lifecycle_extension_months: f64) -> f64 {
        let months = lifecycle_extension_months.max(0.0);
        (self.base_credit + self.credit_per_month * months).min(1.0)
    }
}

/// Computes environmental-impact metrics for a resale. Pure and deterministic.
#[derive(Debug, Clone, Default)]
pub struct SustainabilityCalculator {
    config: SustainabilityConfig,
}

impl SustainabilityCalculator {
    pub fn new(config: SustainabilityConfig) -> Self {
        Self { config }
    }

    pub fn impact(
        &self,
        clothing_type: ClothingType,
        lifecycle_extension_months: f64,
    ) -> SustainabilityMetrics {
        let footprint = self.config.footprint(clothing_type);
        let fraction = self.config.credit_fraction(lifecycle_extension_months);

        let waste_diverted_grams = footprint.waste_grams * fraction;
        SustainabilityMetrics {
            water_saved_liters: footprint.water_liters * fraction,
            co2_prevented_kg: footprint.co2_kg * fraction,
            waste_diverted_grams,
            landfill_prevented_kg: waste_diverted_grams * self.config.landfill_fraction / 1000.0,
            lifecycle_extended_months: lifecycle_extension_months.max(0.0).round() as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn all_metrics_non_negative_for_every_type() {
        let calc = SustainabilityCalculator::default();
        for clothing_type in ClothingType::iter() {
            for months in [0.0, 0.5, 3.0, 12.0, 48.0] {
                let m = calc.impact(clothing_type, months);
                assert!(m.water_saved_liters >= 0.0);
                assert!(m.co2_prevented_kg >= 0.0);
                assert!(m.waste_diverted_grams >= 0.0);
                assert!(m.landfill_prevented_kg >= 0.0);
            }
        }
    }

    #[test]
    fn zero_extension_yields_baseline_credit_only() {
        let calc = SustainabilityCalculator::default();
        let m = calc.impact(ClothingType::Jeans, 0.0);
        // 10% diversion credit for the act of resale itself.
        assert_eq!(m.water_saved_liters, 760.0);
        assert_eq!(m.lifecycle_extended_months, 0);
        assert!(m.waste_diverted_grams > 0.0);
    }

    #[test]
    fn more_months_means_more_impact() {
        let calc = SustainabilityCalculator::default();
        let short = calc.impact(ClothingType::Hoodie, 2.0);
        let long = calc.impact(ClothingType::Hoodie, 9.0);
        assert!(long.water_saved_liters > short.water_saved_liters);
        assert!(long.co2_prevented_kg > short.co2_prevented_kg);
        assert!(long.landfill_prevented_kg > short.landfill_prevented_kg);
    }

    #[test]
    fn credit_capped_at_one_full_garment() {
        let cfg = SustainabilityConfig::default();
        assert_eq!(cfg.credit_fraction(1000.0), 1.0);
        let calc = SustainabilityCalculator::default();
        let m = calc.impact(ClothingType::TShirt, 1000.0);
        assert_eq!(m.water_saved_liters, 2700.0);
    }

    #[test]
    fn landfill_is_fixed_fraction_of_waste() {
        let calc = SustainabilityCalculator::default();
        let m = calc.impact(ClothingType::Jacket, 8.0);
        let expected = m.waste_diverted_grams * 0.6 / 1000.0;
        assert!((m.landfill_prevented_kg - expected).abs() < 1e-9);
    }

    #[test]
    fn impact_is_deterministic() {
        let calc = SustainabilityCalculator::default();
        assert_eq!(
            calc.impact(ClothingType::Kurti, 5.0),
            calc.impact(ClothingType::Kurti, 5.0)
        );
    }
}
