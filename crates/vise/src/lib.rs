//! Core of the VISE card service: client eligibility, purchase discounts, and the
//! in-memory client registry, plus the config/telemetry plumbing shared with the
//! API binary.

pub mod cards;
pub mod config;
pub mod error;
pub mod telemetry;
