//! Credit Score Predictor API Library
//!
//! Computes a synthetic credit score (300-850) from self-reported financial
//! data and ranks improvement recommendations, served over a single HTTP
//! endpoint.
//!
//! # Modules
//!
//! - `scoring`: The scoring engine (pure, no I/O).
//! - `models`: Domain and response types.
//! - `validation`: Request body validation.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers.
//! - `app`: Router and middleware assembly.
//! - `openapi`: OpenAPI document and docs pages.
//! - `config`: Configuration management.
//! - `offline`: Scoring a JSON document outside the server.

pub mod app;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod offline;
pub mod openapi;
pub mod scoring;
pub mod validation;

pub use models::{FinancialRecord, Recommendation, ScoreResult};
pub use scoring::{score_credit, ScoringError};
