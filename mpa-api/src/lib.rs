//! Client for the MPA monitoring backend REST API.
//!
//! This crate owns the wire formats (`dto`), the query-parameter builders
//! (`query`) and the HTTP client itself (`client`). The backend computes all
//! statistics (climatology, anomalies, quantiles); this layer only fetches
//! and decodes. Responses are decoded defensively: numeric fields may arrive
//! as JSON numbers or strings, and a malformed payload is an error result,
//! never a panic.

pub mod client;
pub mod dto;
pub mod query;
