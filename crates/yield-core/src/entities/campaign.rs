use chrono::Utc;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::audit_detail::CreatedDetail;
use crate::entities::{AuditEntry, LineItem};
use crate::enums::AuditAction;
use crate::errors::CoreError;
use crate::ids::{PREFIX_AUDIT, generate_id};

/// A campaign document: the owned line items plus their audit history.
///
/// `revision` increases by one on every committed change and lets a store
/// reject commits computed from an outdated snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Campaign {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub revision: u64,
    pub line_items: Vec<LineItem>,
    #[serde(default)]
    pub history: Vec<AuditEntry>,
}

impl Campaign {
    /// Build a new campaign at revision 0 whose history starts with a
    /// `created` entry.
    ///
    /// # Errors
    ///
    /// `CoreError::Validation` if the line items are invalid, `CoreError::Other`
    /// if no audit id can be generated.
    pub fn create(id: &str, name: &str, line_items: Vec<LineItem>) -> Result<Self, CoreError> {
        let mut campaign = Self {
            id: id.to_string(),
            name: name.to_string(),
            revision: 0,
            line_items,
            history: Vec::new(),
        };
        campaign.validate()?;

        let detail = CreatedDetail {
            line_items: u32::try_from(campaign.line_items.len()).unwrap_or(u32::MAX),
            total_spend: campaign.total_spend(),
        };
        campaign.history.push(AuditEntry {
            id: generate_id(PREFIX_AUDIT)?,
            campaign_id: campaign.id.clone(),
            action: AuditAction::Created,
            description: format!(
                "Created campaign with {} line items",
                campaign.line_items.len()
            ),
            detail: Some(serde_json::to_value(detail).map_err(|e| CoreError::Other(e.into()))?),
            created_at: Utc::now(),
        });
        Ok(campaign)
    }

    #[must_use]
    pub fn total_spend(&self) -> f64 {
        self.line_items.iter().map(|item| item.spend).sum()
    }

    #[must_use]
    pub fn line_item(&self, id: &str) -> Option<&LineItem> {
        self.line_items.iter().find(|item| item.id == id)
    }

    /// Validate every line item and reject duplicate ids.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for the first problem found.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.id.trim().is_empty() {
            return Err(CoreError::Validation("campaign id must not be empty".into()));
        }
        let mut seen = std::collections::HashSet::with_capacity(self.line_items.len());
        for item in &self.line_items {
            item.validate()?;
            if !seen.insert(item.id.as_str()) {
                return Err(CoreError::Validation(format!(
                    "campaign {}: duplicate line item id '{}'",
                    self.id, item.id
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: &str, spend: f64) -> LineItem {
        LineItem {
            id: id.into(),
            name: id.to_uppercase(),
            spend,
            cpm_revenue: 4.0,
            margin_pct: 30.0,
            kpi_actual: 1.0,
        }
    }

    #[test]
    fn total_spend_sums_lines() {
        let campaign = Campaign {
            id: "cmp-1".into(),
            name: "Spring".into(),
            revision: 0,
            line_items: vec![line("a", 100.0), line("b", 250.5)],
            history: Vec::new(),
        };
        assert!((campaign.total_spend() - 350.5).abs() < 1e-9);
        assert!(campaign.line_item("b").is_some());
        assert!(campaign.line_item("z").is_none());
    }

    #[test]
    fn create_records_a_created_entry() {
        let campaign = Campaign::create("cmp-9", "Launch", vec![line("a", 40.0)]).unwrap();
        assert_eq!(campaign.revision, 0);
        assert_eq!(campaign.history.len(), 1);
        assert_eq!(campaign.history[0].action, AuditAction::Created);
        assert_eq!(campaign.history[0].campaign_id, "cmp-9");
        assert!(campaign.history[0].id.starts_with("aud-"));
    }

    #[test]
    fn create_rejects_invalid_items() {
        let mut bad = line("a", 40.0);
        bad.margin_pct = 2.0;
        assert!(Campaign::create("cmp-9", "Launch", vec![bad]).is_err());
    }

    #[test]
    fn duplicate_ids_rejected() {
        let campaign = Campaign {
            id: "cmp-1".into(),
            name: "Spring".into(),
            revision: 0,
            line_items: vec![line("a", 1.0), line("a", 2.0)],
            history: Vec::new(),
        };
        let err = campaign.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }
}
