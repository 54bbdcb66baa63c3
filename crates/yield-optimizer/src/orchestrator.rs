//! Propose/apply workflow.
//!
//! ```text
//! snapshot ──propose()──▶ Proposal ──apply(store)──▶ AppliedOptimization
//! ```
//!
//! Both states are plain values owned by the caller. Proposing never touches a
//! store and can be repeated with different parameters. Applying hands the
//! whole proposed line-item set to the store as one commit, pinned to the
//! campaign revision the proposal was computed from.

use chrono::Utc;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use yield_core::audit_detail::OptimizationDetail;
use yield_core::entities::{AuditEntry, Campaign, LineItem, OptimizationParameters};
use yield_core::enums::{AuditAction, MarginGoal};
use yield_core::errors::CoreError;
use yield_core::ids::{PREFIX_AUDIT, generate_id};
use yield_core::store::{CampaignStore, Commit};

use crate::allocation::allocation_score;
use crate::cpm;
use crate::error::{ApplyError, OptimizeError};
use crate::margin::adjust_margin;
use crate::performance::PerformanceSignal;
use crate::reallocation::{PoolTotals, ReallocationPolicy, reallocate};
use crate::scored::ScoredLineItem;

/// Runs optimization passes with a fixed reallocation policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct Optimizer {
    policy: ReallocationPolicy,
}

/// Result of one pass over a bare list of line items.
#[derive(Debug, Clone, PartialEq)]
pub struct Optimization {
    pub scored: Vec<ScoredLineItem>,
    pub line_items: Vec<LineItem>,
    pub totals: PoolTotals,
}

impl Optimizer {
    #[must_use]
    pub const fn new(policy: ReallocationPolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub const fn policy(&self) -> ReallocationPolicy {
        self.policy
    }

    /// Score every line without reallocating spend.
    ///
    /// # Errors
    ///
    /// `OptimizeError::MissingMarginGoal` if no goal is set,
    /// `OptimizeError::InvalidParameters` if the target KPI is unusable.
    pub fn score(
        &self,
        items: &[LineItem],
        params: &OptimizationParameters,
    ) -> Result<Vec<ScoredLineItem>, OptimizeError> {
        let goal = check_preconditions(params)?;
        let adjuster = cpm::for_parameters(params, items);

        let scored = items
            .iter()
            .map(|item| {
                let signal = PerformanceSignal::measure(item, params.target_kpi, params.kpi_type);
                let new_margin = adjust_margin(signal, item.margin_pct, goal);
                let new_cpm_revenue = adjuster.adjust(item.cpm_revenue, signal, goal);
                let cap_alignment_bonus = adjuster.cap_alignment_bonus(new_cpm_revenue);
                ScoredLineItem {
                    item: item.clone(),
                    locked: params.is_locked(&item.id),
                    signal,
                    new_margin,
                    new_cpm_revenue,
                    cap_alignment_bonus,
                    allocation_score: allocation_score(signal, new_margin, cap_alignment_bonus, goal),
                }
            })
            .collect();
        Ok(scored)
    }

    /// Run a full pass over `items`.
    ///
    /// The output keeps input order and ids. Locked lines come back exactly as
    /// they went in.
    ///
    /// With `respect_ceiling` set, only unlocked lines are held to the CPM
    /// ceiling. A locked line keeps its current `cpm_revenue` even when that
    /// is above the ceiling, so the output is not guaranteed to be fully
    /// ceiling-compliant. Its scored row still shows the CPM it would have
    /// been given.
    ///
    /// # Errors
    ///
    /// Same as [`Self::score`].
    pub fn optimize(
        &self,
        items: &[LineItem],
        params: &OptimizationParameters,
    ) -> Result<Optimization, OptimizeError> {
        let scored = self.score(items, params)?;
        let (spends, totals) = reallocate(&scored, self.policy);

        let line_items = scored
            .iter()
            .zip(spends)
            .map(|(line, spend)| {
                if line.locked {
                    line.item.clone()
                } else {
                    LineItem {
                        spend,
                        cpm_revenue: line.new_cpm_revenue,
                        margin_pct: line.new_margin,
                        ..line.item.clone()
                    }
                }
            })
            .collect::<Vec<_>>();

        debug!(
            lines = line_items.len(),
            total_spend = totals.total_spend,
            available_spend = totals.available_spend,
            total_score = totals.total_score,
            "optimization pass complete"
        );

        Ok(Optimization {
            scored,
            line_items,
            totals,
        })
    }

    /// Compute a proposal for `campaign`. The campaign is not modified.
    ///
    /// # Errors
    ///
    /// Same as [`Self::score`].
    pub fn propose(
        &self,
        campaign: &Campaign,
        params: &OptimizationParameters,
    ) -> Result<Proposal, OptimizeError> {
        let goal = check_preconditions(params)?;
        let Optimization {
            scored,
            line_items,
            totals,
        } = self.optimize(&campaign.line_items, params)?;

        Ok(Proposal {
            campaign_id: campaign.id.clone(),
            base_revision: campaign.revision,
            margin_goal: goal,
            parameters: params.clone(),
            totals,
            scored,
            line_items,
        })
    }
}

fn check_preconditions(params: &OptimizationParameters) -> Result<MarginGoal, OptimizeError> {
    let goal = params.margin_goal.ok_or(OptimizeError::MissingMarginGoal)?;
    params
        .validate()
        .map_err(|error| OptimizeError::InvalidParameters(error.to_string()))?;
    Ok(goal)
}

// ---------------------------------------------------------------------------
// Proposal
// ---------------------------------------------------------------------------

/// A computed but uncommitted reallocation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Proposal {
    pub campaign_id: String,
    /// Campaign revision the proposal was computed from.
    pub base_revision: u64,
    pub margin_goal: MarginGoal,
    pub parameters: OptimizationParameters,
    pub totals: PoolTotals,
    pub scored: Vec<ScoredLineItem>,
    /// The full proposed line-item set, in campaign order.
    pub line_items: Vec<LineItem>,
}

/// Before/after view of one line.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct LineChange {
    pub id: String,
    pub name: String,
    pub locked: bool,
    pub signal: PerformanceSignal,
    pub spend_before: f64,
    pub spend_after: f64,
    pub margin_before: f64,
    pub margin_after: f64,
    pub cpm_before: f64,
    pub cpm_after: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ProposalSummary {
    pub campaign_id: String,
    pub margin_goal: MarginGoal,
    pub lines: u32,
    pub locked_lines: u32,
    pub missing_signal_lines: u32,
    pub spend_before: f64,
    pub spend_after: f64,
    pub changes: Vec<LineChange>,
}

impl Proposal {
    #[must_use]
    pub fn summary(&self) -> ProposalSummary {
        let changes = self
            .scored
            .iter()
            .zip(&self.line_items)
            .map(|(line, after)| LineChange {
                id: after.id.clone(),
                name: after.name.clone(),
                locked: line.locked,
                signal: line.signal,
                spend_before: line.item.spend,
                spend_after: after.spend,
                margin_before: line.item.margin_pct,
                margin_after: after.margin_pct,
                cpm_before: line.item.cpm_revenue,
                cpm_after: after.cpm_revenue,
            })
            .collect::<Vec<_>>();

        ProposalSummary {
            campaign_id: self.campaign_id.clone(),
            margin_goal: self.margin_goal,
            lines: count(changes.len()),
            locked_lines: count(changes.iter().filter(|c| c.locked).count()),
            missing_signal_lines: count(
                changes
                    .iter()
                    .filter(|c| !c.locked && c.signal.is_missing())
                    .count(),
            ),
            spend_before: self.totals.total_spend,
            spend_after: self.line_items.iter().map(|item| item.spend).sum(),
            changes,
        }
    }

    /// The structured audit payload for this proposal.
    #[must_use]
    pub fn detail(&self) -> OptimizationDetail {
        let summary = self.summary();
        OptimizationDetail {
            margin_goal: self.margin_goal,
            kpi_type: self.parameters.kpi_type,
            target_kpi: self.parameters.target_kpi,
            respect_ceiling: self.parameters.respect_ceiling,
            cpm_ceiling: self
                .parameters
                .respect_ceiling
                .then_some(self.parameters.cpm_ceiling),
            locked_lines: summary.locked_lines,
            missing_signal_lines: summary.missing_signal_lines,
            spend_before: summary.spend_before,
            spend_after: summary.spend_after,
        }
    }

    /// Human-readable audit description.
    #[must_use]
    pub fn description(&self) -> String {
        let summary = self.summary();
        format!(
            "Applied budget optimization with margin goal: {} ({} lines, {} locked; spend {:.2} -> {:.2})",
            self.margin_goal,
            summary.lines,
            summary.locked_lines,
            summary.spend_before,
            summary.spend_after
        )
    }

    /// Commit the proposed line items and append one audit entry.
    ///
    /// # Errors
    ///
    /// `ApplyError::Store` if the store rejects the commit. That covers a
    /// campaign that changed after this proposal was computed, and proposed
    /// line items that no longer line up with the stored ones or alter a locked
    /// line. Nothing is written in that case.
    pub fn apply<S>(&self, store: &S) -> Result<AppliedOptimization, ApplyError>
    where
        S: CampaignStore + ?Sized,
    {
        let wrap = |source: CoreError| ApplyError::Store {
            campaign_id: self.campaign_id.clone(),
            source,
        };

        let detail = serde_json::to_value(self.detail())
            .map_err(|error| wrap(CoreError::Other(error.into())))?;
        let entry = AuditEntry {
            id: generate_id(PREFIX_AUDIT).map_err(wrap)?,
            campaign_id: self.campaign_id.clone(),
            action: AuditAction::Optimized,
            description: self.description(),
            detail: Some(detail),
            created_at: Utc::now(),
        };

        let campaign = store
            .commit(Commit {
                campaign_id: self.campaign_id.clone(),
                base_revision: self.base_revision,
                line_items: self.line_items.clone(),
                locked_ids: self.parameters.locked_ids.clone(),
                entry: entry.clone(),
            })
            .map_err(wrap)?;

        info!(
            campaign = %campaign.id,
            revision = campaign.revision,
            goal = %self.margin_goal,
            "applied optimization"
        );
        Ok(AppliedOptimization { campaign, entry })
    }
}

/// A committed proposal: the stored campaign and the entry that records it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct AppliedOptimization {
    pub campaign: Campaign,
    pub entry: AuditEntry,
}

fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use yield_core::enums::KpiType;

    use super::*;

    fn item(id: &str, spend: f64, kpi_actual: f64) -> LineItem {
        LineItem {
            id: id.into(),
            name: id.to_uppercase(),
            spend,
            cpm_revenue: 5.0,
            margin_pct: 20.0,
            kpi_actual,
        }
    }

    fn campaign() -> Campaign {
        Campaign {
            id: "cmp-1".into(),
            name: "Spring".into(),
            revision: 7,
            line_items: vec![item("a", 600.0, 8.0), item("b", 300.0, 12.0), item("c", 100.0, 0.0)],
            history: Vec::new(),
        }
    }

    #[test]
    fn propose_without_goal_is_a_precondition_failure() {
        let params = OptimizationParameters::new(10.0, KpiType::Cpa);
        let err = Optimizer::default().propose(&campaign(), &params).unwrap_err();
        assert!(matches!(err, OptimizeError::MissingMarginGoal));
    }

    #[test]
    fn propose_rejects_non_positive_target() {
        let params = OptimizationParameters::new(0.0, KpiType::Cpa).with_goal(MarginGoal::Increase);
        let err = Optimizer::default().propose(&campaign(), &params).unwrap_err();
        assert!(matches!(err, OptimizeError::InvalidParameters(_)));
    }

    #[test]
    fn proposal_pins_campaign_revision() {
        let params = OptimizationParameters::new(10.0, KpiType::Cpa).with_goal(MarginGoal::Increase);
        let proposal = Optimizer::default().propose(&campaign(), &params).unwrap();
        assert_eq!(proposal.campaign_id, "cmp-1");
        assert_eq!(proposal.base_revision, 7);
        assert_eq!(proposal.margin_goal, MarginGoal::Increase);
    }

    #[test]
    fn summary_counts_locked_and_missing_lines() {
        let params = OptimizationParameters::new(10.0, KpiType::Cpa)
            .with_goal(MarginGoal::Decrease)
            .with_locked(["a"]);
        let summary = Optimizer::default()
            .propose(&campaign(), &params)
            .unwrap()
            .summary();

        assert_eq!(summary.lines, 3);
        assert_eq!(summary.locked_lines, 1);
        assert_eq!(summary.missing_signal_lines, 1);
        assert!((summary.spend_before - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn description_names_the_goal() {
        let params = OptimizationParameters::new(10.0, KpiType::Cpa).with_goal(MarginGoal::Decrease);
        let proposal = Optimizer::default().propose(&campaign(), &params).unwrap();
        assert!(proposal.description().contains("margin goal: decrease"));
    }

    #[test]
    fn detail_reports_ceiling_only_when_respected() {
        let params = OptimizationParameters::new(10.0, KpiType::Cpa).with_goal(MarginGoal::Increase);
        let plain = Optimizer::default().propose(&campaign(), &params).unwrap();
        assert_eq!(plain.detail().cpm_ceiling, None);

        let capped = Optimizer::default()
            .propose(&campaign(), &params.with_ceiling(6.0))
            .unwrap();
        assert_eq!(capped.detail().cpm_ceiling, Some(6.0));
    }

    #[test]
    fn proposal_survives_json() {
        let params = OptimizationParameters::new(10.0, KpiType::Cpa)
            .with_goal(MarginGoal::Increase)
            .with_ceiling(5.5);
        let proposal = Optimizer::default().propose(&campaign(), &params).unwrap();
        let json = serde_json::to_string(&proposal).unwrap();
        let back: Proposal = serde_json::from_str(&json).unwrap();
        assert_eq!(back.line_items.len(), proposal.line_items.len());
        assert_eq!(back.base_revision, proposal.base_revision);
    }
}
