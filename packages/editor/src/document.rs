//! # Document Store
//!
//! Owns the website being edited: site metadata, the page store, the
//! ephemeral edit session and the persistence side-channels.
//!
//! ## Persistence paths
//!
//! ```text
//! tree edit / page edit ──► autosave (debounced) ──► local slot
//! save()                 ──► row store (upsert by id)
//! publish()              ──► save() ──► published slot ──► row store
//! ```
//!
//! The three stores are independent: nothing invalidates one when another
//! changes. Remote failures never disturb in-memory state or the local slot.

use crate::autosave::Autosaver;
use crate::component::{ComponentNode, ComponentPatch, ComponentType};
use crate::config::EditorConfig;
use crate::errors::EditorError;
use crate::id_generator::IdGenerator;
use crate::mutations::{self, Direction, Mutation, MutationResult};
use crate::pages::{Page, PageSeo, PageStore};
use crate::session::{DragPayload, EditSession};
use crate::storage::{Identity, KeyValueStore, RowStore};
use crate::website::{PublishStatus, PublishedSnapshot, SeoSettings, Website};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// External stores and identity the document talks to
#[derive(Clone)]
pub struct Collaborators {
    pub local: Arc<dyn KeyValueStore>,
    pub published: Arc<dyn KeyValueStore>,
    pub rows: Arc<dyn RowStore>,
    pub identity: Arc<dyn Identity>,
}

pub struct DocumentStore {
    config: EditorConfig,
    collaborators: Collaborators,

    /// Site metadata; `pages` lives in `pages` and is left empty here
    meta: Website,
    pages: PageStore,
    session: EditSession,
    ids: IdGenerator,
    autosave: Autosaver,

    /// Increments on every persisted change
    version: u64,
}

impl DocumentStore {
    /// Load from the local slot, falling back to a fresh site when the slot
    /// is empty, unreadable or malformed.
    pub fn load(config: EditorConfig, collaborators: Collaborators) -> Self {
        let website = match collaborators.local.get(&config.local_slot_key) {
            Ok(Some(json)) => match serde_json::from_str::<Website>(&json) {
                Ok(website) => {
                    debug!(id = %website.id, pages = website.pages.len(), "loaded website from local slot");
                    website
                }
                Err(e) => {
                    warn!(error = %e, "local slot is malformed, starting from a default site");
                    Website::new(config.default_site_name.clone())
                }
            },
            Ok(None) => {
                debug!("local slot is empty, starting from a default site");
                Website::new(config.default_site_name.clone())
            }
            Err(e) => {
                error!(error = %e, "failed to read local slot, starting from a default site");
                Website::new(config.default_site_name.clone())
            }
        };

        Self::from_website(website, config, collaborators)
    }

    pub fn from_website(mut website: Website, config: EditorConfig, collaborators: Collaborators) -> Self {
        let pages = PageStore::from_pages(std::mem::take(&mut website.pages));
        let autosave = Autosaver::new(
            Arc::clone(&collaborators.local),
            config.local_slot_key.clone(),
            config.autosave_delay(),
        );

        Self {
            config,
            collaborators,
            meta: website,
            pages,
            session: EditSession::new(),
            ids: IdGenerator::new(),
            autosave,
            version: 0,
        }
    }

    // ------------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------------

    /// Full document with the latest page forests
    pub fn website(&self) -> Website {
        let mut website = self.meta.clone();
        website.pages = self.pages.pages().to_vec();
        website
    }

    pub fn id(&self) -> &str {
        &self.meta.id
    }

    pub fn name(&self) -> &str {
        &self.meta.name
    }

    pub fn publish_status(&self) -> PublishStatus {
        self.meta.publish_status
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.meta.updated_at
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn pages(&self) -> &[Page] {
        self.pages.pages()
    }

    pub fn active_page_id(&self) -> &str {
        self.pages.active_id()
    }

    /// Working set for the tree operations and the renderer
    pub fn active_components(&self) -> &[ComponentNode] {
        self.pages.active_components()
    }

    pub fn find(&self, id: &str) -> Option<&ComponentNode> {
        mutations::find(self.active_components(), id)
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn autosave_pending(&self) -> bool {
        self.autosave.is_pending()
    }

    // ------------------------------------------------------------------------
    // Tree operations on the active page
    // ------------------------------------------------------------------------

    pub fn apply(&mut self, mutation: Mutation) -> MutationResult {
        let current = self.pages.active_components();
        let next = mutation.apply(current, &mut self.ids);

        if next.as_slice() == current {
            debug!(mutation = mutation.name(), "mutation had no effect");
            return MutationResult {
                version: self.version,
                changed: false,
            };
        }

        if let Some(selected) = self.session.selected() {
            if !mutations::contains(&next, selected) {
                self.session.clear_selection();
            }
        }

        self.pages.set_active_components(next);
        self.persist();

        MutationResult {
            version: self.version,
            changed: true,
        }
    }

    pub fn insert(&mut self, component_type: ComponentType, parent_id: Option<&str>) -> MutationResult {
        self.apply(Mutation::Insert {
            component_type,
            parent_id: parent_id.map(str::to_string),
        })
    }

    pub fn update(&mut self, node_id: &str, patch: ComponentPatch) -> MutationResult {
        self.apply(Mutation::Update {
            node_id: node_id.to_string(),
            patch,
        })
    }

    pub fn set_style(&mut self, node_id: &str, property: &str, value: &str) -> MutationResult {
        self.apply(Mutation::SetStyle {
            node_id: node_id.to_string(),
            property: property.to_string(),
            value: value.to_string(),
        })
    }

    pub fn duplicate(&mut self, node_id: &str) -> MutationResult {
        self.apply(Mutation::Duplicate {
            node_id: node_id.to_string(),
        })
    }

    pub fn remove(&mut self, node_id: &str) -> MutationResult {
        self.apply(Mutation::Remove {
            node_id: node_id.to_string(),
        })
    }

    pub fn move_node(&mut self, node_id: &str, direction: Direction) -> MutationResult {
        self.apply(Mutation::Move {
            node_id: node_id.to_string(),
            direction,
        })
    }

    // ------------------------------------------------------------------------
    // Selection & drag
    // ------------------------------------------------------------------------

    pub fn select(&mut self, node_id: &str) {
        self.session.select(node_id);
    }

    pub fn clear_selection(&mut self) {
        self.session.clear_selection();
    }

    pub fn begin_drag(&mut self, payload: DragPayload) {
        self.session.begin_drag(payload);
    }

    pub fn cancel_drag(&mut self) {
        self.session.cancel_drag();
    }

    /// Finish the in-flight drag over `parent_id` (or the root)
    pub fn drop_on(&mut self, parent_id: Option<&str>) -> Option<MutationResult> {
        let mutation = self.session.take_drop(parent_id)?;
        Some(self.apply(mutation))
    }

    // ------------------------------------------------------------------------
    // Pages & metadata
    // ------------------------------------------------------------------------

    pub fn switch_page(&mut self, id: &str) -> Result<(), EditorError> {
        self.pages.switch_page(id)?;
        self.session.reset();
        Ok(())
    }

    /// Add a page, returning its derived id
    pub fn add_page(&mut self, name: &str) -> Result<String, EditorError> {
        let id = match self.pages.add_page(name, &self.meta.name) {
            Ok(page) => page.id.clone(),
            Err(e) => {
                warn!(page = name, error = %e, "page rejected");
                return Err(e.into());
            }
        };
        self.persist();
        Ok(id)
    }

    pub fn remove_page(&mut self, id: &str) -> Result<(), EditorError> {
        match self.pages.remove_page(id) {
            Ok(was_active) => {
                if was_active {
                    self.session.reset();
                }
                self.persist();
                Ok(())
            }
            Err(e) => {
                warn!(page = id, error = %e, "page removal rejected");
                Err(e.into())
            }
        }
    }

    pub fn rename_page(&mut self, id: &str, name: &str) -> Result<(), EditorError> {
        self.pages.rename_page(id, name)?;
        self.persist();
        Ok(())
    }

    pub fn set_page_seo(&mut self, id: &str, seo: PageSeo) -> Result<(), EditorError> {
        self.pages.set_page_seo(id, seo)?;
        self.persist();
        Ok(())
    }

    pub fn set_details(&mut self, name: &str, description: &str) {
        self.meta.name = name.to_string();
        self.meta.description = description.to_string();
        self.persist();
    }

    pub fn set_seo_settings(&mut self, seo: SeoSettings) {
        self.meta.seo_settings = seo;
        self.persist();
    }

    // ------------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------------

    /// Record a change and arm the debounced local write
    fn persist(&mut self) {
        self.persist_at(Utc::now());
    }

    fn persist_at(&mut self, now: DateTime<Utc>) {
        self.meta.updated_at = now;
        self.version += 1;

        match serde_json::to_string(&self.website()) {
            Ok(json) => self.autosave.schedule(json),
            Err(e) => error!(error = %e, "failed to serialize website for autosave"),
        }
    }

    /// Write the local slot immediately, cancelling any pending autosave
    pub fn flush(&mut self) -> Result<(), EditorError> {
        let json = serde_json::to_string(&self.website())?;
        self.autosave.write_now(&json)?;
        debug!(key = %self.config.local_slot_key, "flushed website to local slot");
        Ok(())
    }

    fn require_user(&self) -> Result<String, EditorError> {
        self.collaborators.identity.current_user_id().ok_or_else(|| {
            warn!("save attempted without a signed-in user");
            EditorError::Unauthenticated
        })
    }

    /// Upsert the full document to the row store
    pub async fn save(&mut self) -> Result<(), EditorError> {
        let user_id = self.require_user()?;
        let record = self.website().to_record(&user_id);

        if let Err(e) = self.collaborators.rows.upsert(&record).await {
            error!(id = %record.id, error = %e, "save failed");
            return Err(e.into());
        }

        info!(id = %record.id, "website saved");
        Ok(())
    }

    /// Save, then write the published snapshot and mark the site published.
    ///
    /// Not atomic: a failure after the save leaves the site saved but still
    /// unpublished in memory. Retrying redoes both steps.
    pub async fn publish(&mut self) -> Result<DateTime<Utc>, EditorError> {
        self.save().await?;
        let user_id = self.require_user()?;

        let now = Utc::now();
        let mut published = self.website();
        published.publish_status = PublishStatus::Published;
        published.published_at = Some(now);
        published.updated_at = now;

        let snapshot = PublishedSnapshot {
            website: published.clone(),
            owner_id: user_id.clone(),
        };
        let json = serde_json::to_string(&snapshot)?;
        let key = self.config.published_key(&published.id);

        if let Err(e) = self.collaborators.published.set(&key, &json) {
            error!(key = %key, error = %e, "failed to write published snapshot");
            return Err(EditorError::Publish(e.to_string()));
        }

        if let Err(e) = self.collaborators.rows.upsert(&published.to_record(&user_id)).await {
            error!(id = %published.id, error = %e, "failed to mark website published");
            return Err(EditorError::Publish(e.to_string()));
        }

        self.meta.publish_status = PublishStatus::Published;
        self.meta.published_at = Some(now);
        self.persist_at(now);

        info!(id = %published.id, "website published");
        Ok(now)
    }

    /// Read back the published snapshot, as the public preview would
    pub fn published_snapshot(&self) -> Result<Option<PublishedSnapshot>, EditorError> {
        let key = self.config.published_key(&self.meta.id);
        match self.collaborators.published.get(&key)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryRowStore, MemoryStore, StaticIdentity};

    fn collaborators() -> Collaborators {
        Collaborators {
            local: Arc::new(MemoryStore::new()),
            published: Arc::new(MemoryStore::new()),
            rows: Arc::new(MemoryRowStore::new()),
            identity: Arc::new(StaticIdentity::signed_in("user-1")),
        }
    }

    #[tokio::test]
    async fn test_load_empty_slot_gives_default_site() {
        let store = DocumentStore::load(EditorConfig::default(), collaborators());

        assert_eq!(store.name(), "My Website");
        assert_eq!(store.pages().len(), 1);
        assert_eq!(store.active_page_id(), "home");
        assert!(store.active_components().is_empty());
    }

    #[tokio::test]
    async fn test_load_malformed_slot_falls_back() {
        let config = EditorConfig::default();
        let local: Arc<dyn KeyValueStore> =
            Arc::new(MemoryStore::with_value(&config.local_slot_key, "{not json"));
        let collab = Collaborators {
            local,
            ..collaborators()
        };

        let store = DocumentStore::load(config, collab);
        assert_eq!(store.pages().len(), 1);
        assert!(store.pages()[0].is_home);
    }

    #[tokio::test]
    async fn test_noop_does_not_bump_version() {
        let mut store = DocumentStore::load(EditorConfig::default(), collaborators());

        let result = store.remove("missing");
        assert!(!result.changed);
        assert_eq!(result.version, 0);
        assert!(!store.autosave_pending());
    }

    #[tokio::test]
    async fn test_removing_selected_ancestor_clears_selection() {
        let mut store = DocumentStore::load(EditorConfig::default(), collaborators());
        store.insert(ComponentType::Container, None);
        let container = store.active_components()[0].id.clone();
        store.insert(ComponentType::Text, Some(&container));
        let text = store.active_components()[0].children[0].id.clone();

        store.select(&text);
        store.move_node(&text, Direction::Up);
        assert_eq!(store.session().selected(), Some(text.as_str()));

        store.remove(&container);
        assert!(store.session().selected().is_none());
    }

    #[tokio::test]
    async fn test_switch_page_resets_session() {
        let mut store = DocumentStore::load(EditorConfig::default(), collaborators());
        store.add_page("About").unwrap();
        store.select("anything");
        store.begin_drag(DragPayload::Component(ComponentType::Text));

        store.switch_page("about").unwrap();
        assert!(store.session().selected().is_none());
        assert!(store.session().dragged().is_none());
    }
}
