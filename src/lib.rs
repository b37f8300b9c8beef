//! # Respiguard
#![allow(non_snake_case)]
//!
//! Clinical risk scoring for opioid-induced respiratory depression.
//!
//! This crate provides:
//! - A static PRODIGY-style risk-factor score from patient demographics
//! - A dynamic Overall Risk Score (ORS) fusing the static score with live
//!   vital signs, classified into five ordered risk levels
//! - A JSON record loader for bedside-monitor exports
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core scoring types and logic (patient factors, vitals, PRODIGY,
//!   ORS, risk assessment)
//! - `ports`: Trait definitions for external operations
//! - `adapters`: Concrete implementations (JSON file source, log sanitizer)
//! - `application`: Use cases orchestrating domain and ports

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;

pub use domain::{
    OverallRisk, PatientRecord, PatientRiskFactors, RiskAssessment, RiskLevel, RiskModel,
    VitalSigns,
};

/// Result type for Respiguard operations
pub type Result<T> = std::result::Result<T, RespiguardError>;

/// Main error type for Respiguard
#[derive(Debug, thiserror::Error)]
pub enum RespiguardError {
    #[error("Invalid patient data: {0}")]
    Validation(#[from] domain::ValidationError),

    #[error("Patient source failed: {0}")]
    Source(#[from] adapters::SourceError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
