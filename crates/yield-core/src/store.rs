//! The persistence seam for campaigns.
//!
//! The optimizer never writes anywhere itself; it hands a [`Commit`] to a
//! [`CampaignStore`] implementation. Backends live in `yield-store`.

use std::collections::BTreeSet;

use crate::entities::{AuditEntry, Campaign, LineItem};
use crate::errors::CoreError;

/// A full replacement of a campaign's line items plus the audit entry that
/// records it.
#[derive(Debug, Clone, PartialEq)]
pub struct Commit {
    pub campaign_id: String,
    /// Revision the line items were computed from.
    pub base_revision: u64,
    /// Replacement line items: same count, order and ids as the stored ones.
    pub line_items: Vec<LineItem>,
    /// Ids whose stored line item must come back unchanged.
    pub locked_ids: BTreeSet<String>,
    pub entry: AuditEntry,
}

/// Storage backend for campaign documents.
///
/// Implementations must make `commit` all-or-nothing: on error the previously
/// stored campaign is left untouched.
pub trait CampaignStore {
    /// Load a campaign snapshot.
    ///
    /// # Errors
    ///
    /// `CoreError::NotFound` if no campaign has this id.
    fn load(&self, campaign_id: &str) -> Result<Campaign, CoreError>;

    /// All stored campaigns, ordered by id.
    ///
    /// # Errors
    ///
    /// Backend-specific read failures.
    fn list(&self) -> Result<Vec<Campaign>, CoreError>;

    /// Store a new campaign.
    ///
    /// # Errors
    ///
    /// `CoreError::AlreadyExists` if the id is taken, `CoreError::Validation`
    /// if the document is invalid.
    fn create(&self, campaign: Campaign) -> Result<Campaign, CoreError>;

    /// Atomically replace the line items and append the audit entry.
    ///
    /// # Errors
    ///
    /// `CoreError::StaleRevision` if the campaign moved on since
    /// `commit.base_revision`, plus backend-specific write failures.
    fn commit(&self, commit: Commit) -> Result<Campaign, CoreError>;
}

impl Campaign {
    /// Produce the campaign that results from applying `commit` to `self`.
    ///
    /// Pure: `self` is not modified, so a backend can swap the result in only
    /// once it has been durably written.
    ///
    /// # Errors
    ///
    /// `CoreError::StaleRevision` on a revision mismatch. `CoreError::Validation`
    /// if the commit targets another campaign, carries invalid line items, or
    /// does not line up with the stored ones (see [`Self::check_replacement`]).
    pub fn apply_commit(&self, commit: Commit) -> Result<Self, CoreError> {
        if commit.campaign_id != self.id {
            return Err(CoreError::Validation(format!(
                "commit for campaign {} applied to campaign {}",
                commit.campaign_id, self.id
            )));
        }
        if commit.base_revision != self.revision {
            return Err(CoreError::StaleRevision {
                campaign_id: self.id.clone(),
                expected: commit.base_revision,
                actual: self.revision,
            });
        }

        self.check_replacement(&commit.line_items, &commit.locked_ids)?;

        let mut next = self.clone();
        next.line_items = commit.line_items;
        next.history.push(commit.entry);
        next.revision += 1;
        next.validate()?;
        Ok(next)
    }

    /// Check that `items` can replace this campaign's line items.
    ///
    /// A replacement only moves spend, margin and CPM: it keeps the count,
    /// order, ids, names and KPI actuals of the stored lines, and any line in
    /// `locked_ids` must be identical to the stored one.
    ///
    /// # Errors
    ///
    /// `CoreError::Validation` naming the first mismatch.
    pub fn check_replacement(
        &self,
        items: &[LineItem],
        locked_ids: &BTreeSet<String>,
    ) -> Result<(), CoreError> {
        if items.len() != self.line_items.len() {
            return Err(CoreError::Validation(format!(
                "replacement has {} line items, campaign {} has {}",
                items.len(),
                self.id,
                self.line_items.len()
            )));
        }

        for (position, (stored, proposed)) in self.line_items.iter().zip(items).enumerate() {
            if proposed.id != stored.id {
                return Err(CoreError::Validation(format!(
                    "line item {position} is '{}', campaign {} has '{}' there",
                    proposed.id, self.id, stored.id
                )));
            }
            if proposed.name != stored.name
                || proposed.kpi_actual.to_bits() != stored.kpi_actual.to_bits()
            {
                return Err(CoreError::Validation(format!(
                    "line item '{}' changes its name or KPI actual",
                    stored.id
                )));
            }
            if locked_ids.contains(&stored.id) && !same_line(stored, proposed) {
                return Err(CoreError::Validation(format!(
                    "locked line item '{}' was modified",
                    stored.id
                )));
            }
        }
        Ok(())
    }
}

fn same_line(a: &LineItem, b: &LineItem) -> bool {
    a.id == b.id
        && a.name == b.name
        && a.spend.to_bits() == b.spend.to_bits()
        && a.cpm_revenue.to_bits() == b.cpm_revenue.to_bits()
        && a.margin_pct.to_bits() == b.margin_pct.to_bits()
        && a.kpi_actual.to_bits() == b.kpi_actual.to_bits()
}
