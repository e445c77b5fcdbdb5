//! # Sitebuilder Editor
//!
//! Core editing engine for the drag-and-drop website builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ component: nodes, types, patches            │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ mutations: pure forest → forest operations  │
//! │  - insert / template insert                 │
//! │  - update / set style                       │
//! │  - duplicate / remove / move                │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ pages: ordered pages, active working set    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ document: metadata, session, persistence    │
//! │  - debounced autosave to the local slot     │
//! │  - save / publish to remote collaborators   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Pure tree operations**: every edit maps an immutable forest to a new one
//! 2. **Silent no-ops**: missing targets leave the forest unchanged, no error
//! 3. **Nothing fatal**: I/O failures are reported, in-memory state survives
//! 4. **Independent stores**: local, published and remote never cross-invalidate
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sitebuilder_editor::{Collaborators, ComponentType, DocumentStore, EditorConfig};
//!
//! let mut doc = DocumentStore::load(EditorConfig::default(), collaborators);
//!
//! doc.insert(ComponentType::Container, None);
//! let container = doc.active_components()[0].id.clone();
//! doc.insert(ComponentType::Text, Some(&container));
//!
//! doc.save().await?;
//! doc.publish().await?;
//! ```

mod autosave;
mod component;
mod config;
mod document;
mod errors;
mod id_generator;
mod mutations;
mod pages;
mod session;
mod storage;
mod templates;
mod website;

pub use autosave::{Autosaver, DEFAULT_AUTOSAVE_DELAY};
pub use component::{
    ComponentNode, ComponentPatch, ComponentType, Forest, Settings, Styles, UnknownComponentType,
    HEADING_PLACEHOLDER, TEXT_PLACEHOLDER,
};
pub use config::{EditorConfig, DEFAULT_CONFIG_NAME};
pub use document::{Collaborators, DocumentStore};
pub use errors::EditorError;
pub use id_generator::IdGenerator;
pub use mutations::{Direction, Mutation, MutationResult};
pub use pages::{slugify, Page, PageError, PageSeo, PageStore, HOME_PAGE_ID};
pub use session::{DragPayload, EditSession};
pub use storage::{
    FileRowStore, FileStore, Identity, KeyValueStore, MemoryRowStore, MemoryStore, RowStore,
    StaticIdentity, StorageError, StorageResult,
};
pub use templates::{Template, UnknownTemplate};
pub use website::{PublishStatus, PublishedSnapshot, SeoSettings, Website, WebsiteRecord};

/// Pure forest operations and queries
pub mod tree {
    pub use crate::mutations::{
        accepts_children, all_ids, contains, count, duplicate, find, insert, insert_template,
        move_node, parent_of, remove, set_style, subtree_size, update,
    };
}
