//! In-memory campaign store.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use yield_core::entities::Campaign;
use yield_core::errors::CoreError;
use yield_core::store::{CampaignStore, Commit};

use crate::error::StoreError;

/// Campaigns kept in a mutex-guarded map. A commit swaps the whole campaign
/// under the lock, so readers never observe a half-applied line-item set.
#[derive(Debug, Default)]
pub struct MemoryCampaignStore {
    campaigns: Mutex<BTreeMap<String, Campaign>>,
}

impl MemoryCampaignStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `campaigns`.
    ///
    /// # Errors
    ///
    /// Same as [`CampaignStore::create`] for each campaign.
    pub fn with_campaigns(campaigns: impl IntoIterator<Item = Campaign>) -> Result<Self, CoreError> {
        let store = Self::new();
        for campaign in campaigns {
            store.create(campaign)?;
        }
        Ok(store)
    }

    fn guard(&self) -> Result<MutexGuard<'_, BTreeMap<String, Campaign>>, StoreError> {
        self.campaigns.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl CampaignStore for MemoryCampaignStore {
    fn load(&self, campaign_id: &str) -> Result<Campaign, CoreError> {
        self.guard()?
            .get(campaign_id)
            .cloned()
            .ok_or_else(|| CoreError::campaign_not_found(campaign_id))
    }

    fn list(&self) -> Result<Vec<Campaign>, CoreError> {
        Ok(self.guard()?.values().cloned().collect())
    }

    fn create(&self, campaign: Campaign) -> Result<Campaign, CoreError> {
        campaign.validate()?;
        let mut campaigns = self.guard()?;
        if campaigns.contains_key(&campaign.id) {
            return Err(CoreError::AlreadyExists {
                entity_type: "campaign".to_string(),
                id: campaign.id,
            });
        }
        campaigns.insert(campaign.id.clone(), campaign.clone());
        Ok(campaign)
    }

    fn commit(&self, commit: Commit) -> Result<Campaign, CoreError> {
        let mut campaigns = self.guard()?;
        let current = campaigns
            .get(&commit.campaign_id)
            .ok_or_else(|| CoreError::campaign_not_found(&commit.campaign_id))?;
        let next = current.apply_commit(commit)?;
        campaigns.insert(next.id.clone(), next.clone());
        Ok(next)
    }
}
