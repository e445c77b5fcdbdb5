//! # Component Nodes
//!
//! The atomic element of a page tree. A page owns an ordered forest of
//! these; container-capable types own further nodes through `children`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Root-level ordered sequence of nodes for a page
pub type Forest = Vec<ComponentNode>;

/// Style property name → value (no validation beyond string type)
pub type Styles = BTreeMap<String, String>;

/// Opaque type-specific configuration
pub type Settings = BTreeMap<String, serde_json::Value>;

pub const TEXT_PLACEHOLDER: &str = "Lorem ipsum dolor sit amet";
pub const HEADING_PLACEHOLDER: &str = "Heading";

/// Closed set of component kinds the builder knows how to render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    Text,
    Heading,
    Button,
    Image,
    Divider,
    Input,
    Link,
    Video,
    Spacer,
    Container,
    Card,
    Navigation,
    Footer,
    Form,
    Testimonial,
    Pricing,
}

impl ComponentType {
    pub const ALL: [ComponentType; 16] = [
        ComponentType::Text,
        ComponentType::Heading,
        ComponentType::Button,
        ComponentType::Image,
        ComponentType::Divider,
        ComponentType::Input,
        ComponentType::Link,
        ComponentType::Video,
        ComponentType::Spacer,
        ComponentType::Container,
        ComponentType::Card,
        ComponentType::Navigation,
        ComponentType::Footer,
        ComponentType::Form,
        ComponentType::Testimonial,
        ComponentType::Pricing,
    ];

    /// Whether nodes of this type may own children
    pub fn is_container(self) -> bool {
        matches!(
            self,
            ComponentType::Container
                | ComponentType::Card
                | ComponentType::Navigation
                | ComponentType::Footer
                | ComponentType::Form
                | ComponentType::Testimonial
                | ComponentType::Pricing
        )
    }

    /// Content a freshly inserted node starts with
    pub fn default_content(self) -> Option<String> {
        match self {
            ComponentType::Text => Some(TEXT_PLACEHOLDER.to_string()),
            ComponentType::Heading => Some(HEADING_PLACEHOLDER.to_string()),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ComponentType::Text => "text",
            ComponentType::Heading => "heading",
            ComponentType::Button => "button",
            ComponentType::Image => "image",
            ComponentType::Divider => "divider",
            ComponentType::Input => "input",
            ComponentType::Link => "link",
            ComponentType::Video => "video",
            ComponentType::Spacer => "spacer",
            ComponentType::Container => "container",
            ComponentType::Card => "card",
            ComponentType::Navigation => "navigation",
            ComponentType::Footer => "footer",
            ComponentType::Form => "form",
            ComponentType::Testimonial => "testimonial",
            ComponentType::Pricing => "pricing",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown component type: {0}")]
pub struct UnknownComponentType(pub String);

impl FromStr for ComponentType {
    type Err = UnknownComponentType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComponentType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownComponentType(s.to_string()))
    }
}

/// One visual element in a page tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentNode {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: ComponentType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(default)]
    pub styles: Styles,

    #[serde(default)]
    pub children: Forest,

    #[serde(default)]
    pub settings: Settings,
}

impl ComponentNode {
    /// Fresh node with per-type default content and no children
    pub fn new(id: String, kind: ComponentType) -> Self {
        Self {
            id,
            kind,
            content: kind.default_content(),
            styles: Styles::new(),
            children: Vec::new(),
            settings: Settings::new(),
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.styles.insert(property.into(), value.into());
        self
    }

    /// Append a child; ignored for types that cannot own children
    pub fn with_child(mut self, child: ComponentNode) -> Self {
        if self.kind.is_container() {
            self.children.push(child);
        }
        self
    }

    pub fn can_have_children(&self) -> bool {
        self.kind.is_container()
    }

    /// Number of nodes in this subtree, including self
    pub fn subtree_size(&self) -> usize {
        1 + self.children.iter().map(ComponentNode::subtree_size).sum::<usize>()
    }
}

/// Partial update merged shallowly into a node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Replaces the whole style map
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<Styles>,

    /// Replaces the whole settings map
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Settings>,
}

impl ComponentPatch {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Default::default()
        }
    }

    pub fn styles(styles: Styles) -> Self {
        Self {
            styles: Some(styles),
            ..Default::default()
        }
    }

    pub(crate) fn merge_into(&self, node: &mut ComponentNode) {
        if let Some(content) = &self.content {
            node.content = Some(content.clone());
        }
        if let Some(styles) = &self.styles {
            node.styles = styles.clone();
        }
        if let Some(settings) = &self.settings {
            node.settings = settings.clone();
        }
    }
}
