//! EcoThrift — circular fashion marketplace.
//!
//! The core of the system is the listing valuation pipeline: an AI vision
//! assessment of a garment photo is cross-validated against seller-declared
//! facts to produce a trust score, a recommended resale price, environmental
//! impact metrics, and a sellability decision that routes the seller into
//! either the listing flow or recycling/upcycling guidance.

pub mod app_state;
pub mod config;
pub mod db;
pub mod models;
pub mod routes;
pub mod services;
