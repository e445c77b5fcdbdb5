//! # Edit Session
//!
//! Ephemeral selection and drag state for one editor view. Nothing here is
//! persisted; the document store resets it on page switches and when the
//! selected node disappears.

use crate::component::ComponentType;
use crate::mutations::Mutation;
use crate::templates::Template;
use serde::{Deserialize, Serialize};

/// What is being dragged from the palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DragPayload {
    Component(ComponentType),
    Template(Template),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditSession {
    selected: Option<String>,
    dragged: Option<DragPayload>,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn select(&mut self, id: impl Into<String>) {
        self.selected = Some(id.into());
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn dragged(&self) -> Option<DragPayload> {
        self.dragged
    }

    /// Start a drag; replaces any drag already in flight
    pub fn begin_drag(&mut self, payload: DragPayload) {
        self.dragged = Some(payload);
    }

    pub fn cancel_drag(&mut self) {
        self.dragged = None;
    }

    /// End the drag over `parent_id` (or the canvas root), producing the
    /// mutation the drop should perform
    pub fn take_drop(&mut self, parent_id: Option<&str>) -> Option<Mutation> {
        let parent_id = parent_id.map(str::to_string);
        self.dragged.take().map(|payload| match payload {
            DragPayload::Component(component_type) => Mutation::Insert {
                component_type,
                parent_id,
            },
            DragPayload::Template(template) => Mutation::InsertTemplate {
                template,
                parent_id,
            },
        })
    }

    pub fn reset(&mut self) {
        self.selected = None;
        self.dragged = None;
    }
}
