//! # yield-optimizer
//!
//! Multi-line budget reallocation for a campaign.
//!
//! One pass takes a snapshot of line items plus [`OptimizationParameters`] and
//! runs, per line:
//!
//! 1. [`performance`]: observed KPI vs. target as a [`PerformanceSignal`]
//! 2. [`margin`] and [`cpm`]: new margin and sold CPM from that signal
//! 3. [`allocation`]: a single allocation weight
//! 4. [`reallocation`]: the unlocked pool split by weight, damped toward
//!    current spend
//!
//! [`Optimizer::propose`] packages the result as a [`Proposal`] without side
//! effects. [`Proposal::apply`] commits it through a
//! [`yield_core::store::CampaignStore`] and records one audit entry.
//!
//! [`OptimizationParameters`]: yield_core::entities::OptimizationParameters

pub mod allocation;
pub mod cpm;
pub mod error;
pub mod margin;
pub mod orchestrator;
pub mod performance;
pub mod reallocation;
pub mod scored;

pub use error::{ApplyError, OptimizeError};
pub use orchestrator::{AppliedOptimization, LineChange, Optimization, Optimizer, Proposal, ProposalSummary};
pub use performance::PerformanceSignal;
pub use reallocation::{PoolTotals, ReallocationPolicy};
pub use scored::ScoredLineItem;
