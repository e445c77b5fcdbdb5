//! Website document and the payloads written to each store.

use crate::pages::Page;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublishStatus {
    #[default]
    Draft,
    Published,
}

/// Site-wide search metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoSettings {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub keywords: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
}

/// The full document, as serialized into the local persistence slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Website {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub pages: Vec<Page>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub publish_status: PublishStatus,
    #[serde(default)]
    pub seo_settings: SeoSettings,
}

impl Website {
    /// New draft site with a single empty home page
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            description: String::new(),
            pages: vec![Page::home()],
            created_at: now,
            updated_at: now,
            published_at: None,
            publish_status: PublishStatus::Draft,
            seo_settings: SeoSettings::default(),
        }
    }

    /// Row written to the remote store on save
    pub fn to_record(&self, user_id: &str) -> WebsiteRecord {
        WebsiteRecord {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            pages: self.pages.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
            published_at: self.published_at,
            user_id: user_id.to_string(),
            publish_status: self.publish_status,
            seo_settings: self.seo_settings.clone(),
        }
    }
}

/// Row in the remote store, upserted by `id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebsiteRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    pub pages: Vec<Page>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
    pub user_id: String,
    pub publish_status: PublishStatus,
    pub seo_settings: SeoSettings,
}

/// Copy served to the public preview; never reflects unpublished edits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedSnapshot {
    #[serde(flatten)]
    pub website: Website,
    pub owner_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_website_is_draft_with_home() {
        let site = Website::new("Acme");

        assert_eq!(site.publish_status, PublishStatus::Draft);
        assert_eq!(site.pages.len(), 1);
        assert!(site.pages[0].is_home);
        assert_eq!(site.created_at, site.updated_at);
    }

    #[test]
    fn test_local_json_shape() {
        let site = Website::new("Acme");
        let json = serde_json::to_value(&site).unwrap();

        assert_eq!(json["publishStatus"], "draft");
        assert_eq!(json["pages"][0]["isHome"], true);
        assert!(json.get("seoSettings").is_some());
        assert!(json.get("updatedAt").is_some());
    }

    #[test]
    fn test_snapshot_flattens_website() {
        let mut site = Website::new("Acme");
        site.published_at = Some(Utc::now());
        let snapshot = PublishedSnapshot {
            website: site.clone(),
            owner_id: "user-1".into(),
        };

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: PublishedSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.website, site);
        assert_eq!(back.owner_id, "user-1");
    }

    #[test]
    fn test_record_carries_owner() {
        let site = Website::new("Acme");
        let record = site.to_record("user-1");
        assert_eq!(record.id, site.id);
        assert_eq!(record.user_id, "user-1");
    }
}
