//! # yield-core
//!
//! Core types, ID generation, and error types for campaign yield optimization.
//!
//! This crate provides the foundational types shared across all yield crates:
//! - Entity structs (line items, campaigns, audit entries, optimization parameters)
//! - KPI, margin-goal, and audit-action enums
//! - Prefixed ID generation
//! - Cross-cutting error types
//! - The `CampaignStore` seam that persistence backends implement
//! - Audit detail sub-types

pub mod audit_detail;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod store;
