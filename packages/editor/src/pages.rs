//! # Page Store
//!
//! Ordered page list plus the active page. The active page's forest is the
//! working set the tree operations run against; writes land directly in that
//! page's `components`, so `pages` is always current.
//!
//! Exactly one page carries `is_home` and it can never be removed.

use crate::component::{ComponentNode, Forest};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const HOME_PAGE_ID: &str = "home";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    #[error("A page named \"{0}\" already exists")]
    DuplicatePage(String),

    #[error("Page name cannot be empty")]
    EmptyName,

    #[error("The home page cannot be deleted")]
    CannotRemoveHome,

    #[error("Page not found: {0}")]
    NotFound(String),
}

/// Per-page search metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageSeo {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub keywords: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub is_home: bool,
    #[serde(default)]
    pub components: Forest,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo: Option<PageSeo>,
}

impl Page {
    pub fn home() -> Self {
        Self {
            id: HOME_PAGE_ID.to_string(),
            name: "Home".to_string(),
            path: "/".to_string(),
            is_home: true,
            components: Vec::new(),
            seo: None,
        }
    }
}

/// Lower-case and hyphenate a page name into an id
pub fn slugify(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

pub fn path_for(id: &str) -> String {
    format!("/{}", id)
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageStore {
    pages: Vec<Page>,
    active: String,
}

impl PageStore {
    /// Store with a single empty home page
    pub fn new() -> Self {
        Self {
            pages: vec![Page::home()],
            active: HOME_PAGE_ID.to_string(),
        }
    }

    /// Adopt a loaded page list, repairing the home-page invariant
    pub fn from_pages(mut pages: Vec<Page>) -> Self {
        if pages.is_empty() {
            return Self::new();
        }

        match pages.iter().position(|p| p.is_home) {
            Some(home) => {
                for (i, page) in pages.iter_mut().enumerate() {
                    page.is_home = i == home;
                }
            }
            None => pages[0].is_home = true,
        }

        let active = pages
            .iter()
            .find(|p| p.is_home)
            .map(|p| p.id.clone())
            .unwrap_or_default();

        Self { pages, active }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn active_id(&self) -> &str {
        &self.active
    }

    pub fn get(&self, id: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == id)
    }

    pub fn home(&self) -> Option<&Page> {
        self.pages.iter().find(|p| p.is_home)
    }

    pub fn active_page(&self) -> Option<&Page> {
        self.get(&self.active)
    }

    /// Forest of the active page (empty if the page vanished)
    pub fn active_components(&self) -> &[ComponentNode] {
        self.active_page().map_or(&[], |p| p.components.as_slice())
    }

    /// Replace the active page's forest
    pub fn set_active_components(&mut self, components: Forest) {
        let active = self.active.clone();
        if let Some(page) = self.pages.iter_mut().find(|p| p.id == active) {
            page.components = components;
        }
    }

    pub fn switch_page(&mut self, id: &str) -> Result<(), PageError> {
        if self.get(id).is_none() {
            return Err(PageError::NotFound(id.to_string()));
        }
        self.active = id.to_string();
        Ok(())
    }

    pub fn add_page(&mut self, name: &str, website_name: &str) -> Result<&Page, PageError> {
        let name = name.trim();
        let id = slugify(name);
        if id.is_empty() {
            return Err(PageError::EmptyName);
        }
        self.check_unique(name, &id, None)?;

        self.pages.push(Page {
            path: path_for(&id),
            id,
            name: name.to_string(),
            is_home: false,
            components: Vec::new(),
            seo: Some(PageSeo {
                title: format!("{} | {}", name, website_name),
                ..Default::default()
            }),
        });

        Ok(&self.pages[self.pages.len() - 1])
    }

    /// Change a page's display name; the id and path stay fixed
    pub fn rename_page(&mut self, id: &str, name: &str) -> Result<(), PageError> {
        let name = name.trim();
        if slugify(name).is_empty() {
            return Err(PageError::EmptyName);
        }
        if self.get(id).is_none() {
            return Err(PageError::NotFound(id.to_string()));
        }
        self.check_unique(name, &slugify(name), Some(id))?;

        if let Some(page) = self.pages.iter_mut().find(|p| p.id == id) {
            page.name = name.to_string();
        }
        Ok(())
    }

    pub fn set_page_seo(&mut self, id: &str, seo: PageSeo) -> Result<(), PageError> {
        let page = self
            .pages
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| PageError::NotFound(id.to_string()))?;
        page.seo = Some(seo);
        Ok(())
    }

    /// Remove a non-home page, returning true if it was the active one
    pub fn remove_page(&mut self, id: &str) -> Result<bool, PageError> {
        let index = self
            .pages
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| PageError::NotFound(id.to_string()))?;

        if self.pages[index].is_home {
            return Err(PageError::CannotRemoveHome);
        }

        self.pages.remove(index);

        let was_active = self.active == id;
        if was_active {
            self.active = self
                .home()
                .or_else(|| self.pages.first())
                .map(|p| p.id.clone())
                .unwrap_or_default();
        }
        Ok(was_active)
    }

    fn check_unique(&self, name: &str, id: &str, except: Option<&str>) -> Result<(), PageError> {
        let clash = self
            .pages
            .iter()
            .filter(|p| Some(p.id.as_str()) != except)
            .any(|p| p.id == id || p.name.eq_ignore_ascii_case(name));

        if clash {
            Err(PageError::DuplicatePage(name.to_string()))
        } else {
            Ok(())
        }
    }
}

impl Default for PageStore {
    fn default() -> Self {
        Self::new()
    }
}
