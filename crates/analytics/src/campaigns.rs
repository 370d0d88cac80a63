//! In-memory campaign registry.
//!
//! An owned store with an explicit handle, not ambient module state; the
//! service holding it decides its lifetime.

use bidwit_core::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of a campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Active,
    Paused,
    Completed,
}

/// A registered ad campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    /// Registry identifier (UUID v4).
    pub id: String,
    pub name: String,
    pub status: CampaignStatus,
    /// Allocated budget in currency units.
    pub budget: f64,
    /// Spend recorded against the budget so far.
    pub spent: f64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Target cost per acquisition.
    pub target_cpa: Option<f64>,
    pub impressions: u64,
    pub clicks: u64,
}

/// Fields required to register a campaign.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCampaign {
    pub name: String,
    pub budget: f64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub target_cpa: Option<f64>,
}

/// Partial update applied to an existing campaign.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CampaignUpdate {
    pub name: Option<String>,
    pub status: Option<CampaignStatus>,
    pub budget: Option<f64>,
    pub spent: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub target_cpa: Option<f64>,
    pub impressions: Option<u64>,
    pub clicks: Option<u64>,
}

/// In-memory store of campaigns, in creation order.
#[derive(Debug, Default)]
pub struct CampaignStore {
    campaigns: Vec<Campaign>,
}

impl CampaignStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a campaign. New campaigns start active with zero counters.
    pub fn create(&mut self, new: NewCampaign) -> Campaign {
        let campaign = Campaign {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            status: CampaignStatus::Active,
            budget: new.budget,
            spent: 0.0,
            start_date: new.start_date,
            end_date: new.end_date,
            target_cpa: new.target_cpa,
            impressions: 0,
            clicks: 0,
        };
        self.campaigns.push(campaign.clone());
        campaign
    }

    /// Look up a campaign by id.
    pub fn get(&self, id: &str) -> Result<&Campaign> {
        self.campaigns
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| Error::campaign_not_found(id))
    }

    /// All campaigns, in creation order.
    pub fn list(&self) -> &[Campaign] {
        &self.campaigns
    }

    /// Apply a partial update to a campaign.
    pub fn update(&mut self, id: &str, update: CampaignUpdate) -> Result<&Campaign> {
        let campaign = self
            .campaigns
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| Error::campaign_not_found(id))?;

        if let Some(name) = update.name {
            campaign.name = name;
        }
        if let Some(status) = update.status {
            campaign.status = status;
        }
        if let Some(budget) = update.budget {
            campaign.budget = budget;
        }
        if let Some(spent) = update.spent {
            campaign.spent = spent;
        }
        if let Some(start_date) = update.start_date {
            campaign.start_date = Some(start_date);
        }
        if let Some(end_date) = update.end_date {
            campaign.end_date = Some(end_date);
        }
        if let Some(target_cpa) = update.target_cpa {
            campaign.target_cpa = Some(target_cpa);
        }
        if let Some(impressions) = update.impressions {
            campaign.impressions = impressions;
        }
        if let Some(clicks) = update.clicks {
            campaign.clicks = clicks;
        }

        Ok(campaign)
    }

    /// Remove a campaign, returning it.
    pub fn remove(&mut self, id: &str) -> Result<Campaign> {
        let idx = self
            .campaigns
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| Error::campaign_not_found(id))?;
        Ok(self.campaigns.remove(idx))
    }

    /// Number of registered campaigns.
    pub fn len(&self) -> usize {
        self.campaigns.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.campaigns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_campaign(name: &str) -> NewCampaign {
        NewCampaign {
            name: name.to_string(),
            budget: 10_000.0,
            start_date: NaiveDate::from_ymd_opt(2024, 6, 1),
            end_date: NaiveDate::from_ymd_opt(2024, 8, 31),
            target_cpa: Some(2.5),
        }
    }

    #[test]
    fn test_create_and_get() {
        let mut store = CampaignStore::new();
        let created = store.create(new_campaign("Summer Sale"));

        assert_eq!(created.status, CampaignStatus::Active);
        assert_eq!(created.spent, 0.0);
        assert_eq!(created.impressions, 0);

        let fetched = store.get(&created.id).unwrap();
        assert_eq!(fetched, &created);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut store = CampaignStore::new();
        let a = store.create(new_campaign("A"));
        let b = store.create(new_campaign("B"));
        assert_ne!(a.id, b.id);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_list_preserves_creation_order() {
        let mut store = CampaignStore::new();
        store.create(new_campaign("first"));
        store.create(new_campaign("second"));

        let names: Vec<&str> = store.list().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn test_partial_update() {
        let mut store = CampaignStore::new();
        let created = store.create(new_campaign("Summer Sale"));

        let updated = store
            .update(
                &created.id,
                CampaignUpdate {
                    status: Some(CampaignStatus::Paused),
                    spent: Some(3_500.0),
                    ..CampaignUpdate::default()
                },
            )
            .unwrap();

        assert_eq!(updated.status, CampaignStatus::Paused);
        assert_eq!(updated.spent, 3_500.0);
        // Untouched fields survive.
        assert_eq!(updated.name, "Summer Sale");
        assert_eq!(updated.budget, 10_000.0);
    }

    #[test]
    fn test_remove() {
        let mut store = CampaignStore::new();
        let created = store.create(new_campaign("gone"));
        let removed = store.remove(&created.id).unwrap();
        assert_eq!(removed.name, "gone");
        assert!(store.is_empty());
    }

    #[test]
    fn test_unknown_id_errors() {
        let mut store = CampaignStore::new();
        assert!(matches!(
            store.get("nope"),
            Err(Error::CampaignNotFound(_))
        ));
        assert!(store.update("nope", CampaignUpdate::default()).is_err());
        assert!(store.remove("nope").is_err());
    }
}
