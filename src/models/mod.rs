pub mod assessment;
pub mod listing;
pub mod valuation;
