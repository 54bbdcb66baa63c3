//! JSON-file campaign store.
//!
//! Layout: `{dir}/{campaign_id}.json`. Every write goes to a temporary file in
//! the same directory which is then renamed over the document, so readers see
//! either the old campaign or the new one. Creates and commits additionally
//! hold an advisory lock on `{dir}/{campaign_id}.lock` for the
//! load-check-replace sequence.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use yield_core::entities::Campaign;
use yield_core::errors::CoreError;
use yield_core::store::{CampaignStore, Commit};

use crate::error::StoreError;
use crate::lock;

#[derive(Debug, Clone)]
pub struct FileCampaignStore {
    dir: PathBuf,
}

impl FileCampaignStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn document_path(&self, campaign_id: &str) -> Result<PathBuf, CoreError> {
        let valid = !campaign_id.is_empty()
            && campaign_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !campaign_id.starts_with('.');
        if !valid {
            return Err(CoreError::Validation(format!(
                "campaign id '{campaign_id}' may only contain letters, digits, '-', '_' and '.'"
            )));
        }
        Ok(self.dir.join(format!("{campaign_id}.json")))
    }

    fn read(path: &Path) -> Result<Campaign, StoreError> {
        let raw = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    fn write(&self, path: &Path, campaign: &Campaign) -> Result<(), StoreError> {
        let io = |source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(io)?;
        serde_json::to_writer_pretty(&mut tmp, campaign).map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        tmp.write_all(b"\n").map_err(io)?;
        tmp.as_file().sync_all().map_err(io)?;
        tmp.persist(path).map_err(|source| StoreError::Persist {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(())
    }
}

impl CampaignStore for FileCampaignStore {
    fn load(&self, campaign_id: &str) -> Result<Campaign, CoreError> {
        let path = self.document_path(campaign_id)?;
        if !path.is_file() {
            return Err(CoreError::campaign_not_found(campaign_id));
        }
        Ok(Self::read(&path)?)
    }

    fn list(&self) -> Result<Vec<Campaign>, CoreError> {
        let entries = std::fs::read_dir(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let mut campaigns = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| StoreError::Io {
                path: self.dir.clone(),
                source,
            })?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match Self::read(&path) {
                Ok(campaign) => campaigns.push(campaign),
                Err(error) => tracing::warn!(%error, "skipping unreadable campaign document"),
            }
        }
        campaigns.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(campaigns)
    }

    fn create(&self, campaign: Campaign) -> Result<Campaign, CoreError> {
        campaign.validate()?;
        let path = self.document_path(&campaign.id)?;
        let _guard = lock::acquire(&self.dir, &campaign.id)?;

        if path.exists() {
            return Err(CoreError::AlreadyExists {
                entity_type: "campaign".to_string(),
                id: campaign.id,
            });
        }
        self.write(&path, &campaign)?;
        tracing::debug!(campaign = %campaign.id, path = %path.display(), "campaign created");
        Ok(campaign)
    }

    fn commit(&self, commit: Commit) -> Result<Campaign, CoreError> {
        let path = self.document_path(&commit.campaign_id)?;
        let _guard = lock::acquire(&self.dir, &commit.campaign_id)?;

        let current = self.load(&commit.campaign_id)?;
        let next = current.apply_commit(commit)?;
        self.write(&path, &next)?;
        tracing::debug!(campaign = %next.id, revision = next.revision, "campaign committed");
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use yield_core::entities::LineItem;

    use super::*;

    fn campaign(id: &str) -> Campaign {
        Campaign::create(
            id,
            "Spring",
            vec![LineItem {
                id: "a".into(),
                name: "A".into(),
                spend: 100.0,
                cpm_revenue: 5.0,
                margin_pct: 20.0,
                kpi_actual: 2.0,
            }],
        )
        .unwrap()
    }

    #[test]
    fn create_then_load() {
        let temp = tempfile::tempdir().unwrap();
        let store = FileCampaignStore::open(temp.path()).unwrap();

        let created = store.create(campaign("cmp-1")).unwrap();
        let loaded = store.load("cmp-1").unwrap();
        assert_eq!(loaded, created);
        assert!(temp.path().join("cmp-1.json").is_file());
        assert!(temp.path().join("cmp-1.lock").is_file());
    }

    #[test]
    fn create_twice_is_rejected() {
        let temp = tempfile::tempdir().unwrap();
        let store = FileCampaignStore::open(temp.path()).unwrap();

        store.create(campaign("cmp-1")).unwrap();
        let err = store.create(campaign("cmp-1")).unwrap_err();
        assert!(matches!(err, CoreError::AlreadyExists { .. }));
    }

    #[test]
    fn missing_campaign_is_not_found() {
        let temp = tempfile::tempdir().unwrap();
        let store = FileCampaignStore::open(temp.path()).unwrap();
        let err = store.load("nope").unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));
    }

    #[test]
    fn path_like_ids_are_rejected() {
        let temp = tempfile::tempdir().unwrap();
        let store = FileCampaignStore::open(temp.path()).unwrap();
        for id in ["../escape", "a/b", ".hidden", ""] {
            assert!(matches!(store.load(id), Err(CoreError::Validation(_))), "{id}");
        }
    }

    #[test]
    fn list_skips_foreign_files_and_sorts() {
        let temp = tempfile::tempdir().unwrap();
        let store = FileCampaignStore::open(temp.path()).unwrap();
        store.create(campaign("cmp-b")).unwrap();
        store.create(campaign("cmp-a")).unwrap();
        std::fs::write(temp.path().join("notes.txt"), "hello").unwrap();
        std::fs::write(temp.path().join("broken.json"), "{").unwrap();

        let ids: Vec<String> = store.list().unwrap().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["cmp-a".to_string(), "cmp-b".to_string()]);
    }
}
