pub mod pricing;
pub mod sustainability;
pub mod trust;
pub mod valuation;
pub mod vision;
