pub mod component;
pub mod init;
pub mod page;
pub mod publish;
pub mod show;

pub use component::{component, ComponentCommand};
pub use init::{init, InitArgs};
pub use page::{page, PageCommand};
pub use publish::{publish, save};
pub use show::{show, ShowArgs};

use anyhow::Result;
use sitebuilder_editor::{
    Collaborators, DocumentStore, EditorConfig, FileRowStore, FileStore, StaticIdentity,
};
use std::path::PathBuf;
use std::sync::Arc;

/// Where the project lives and who is running the command
#[derive(Debug, Clone)]
pub struct Context {
    pub cwd: PathBuf,
    pub user: Option<String>,
}

impl Context {
    pub fn config(&self) -> Result<EditorConfig> {
        Ok(EditorConfig::load(&self.cwd)?)
    }

    /// File-backed collaborators under the configured data directory
    pub fn collaborators(&self, config: &EditorConfig) -> Collaborators {
        let data_dir = config.data_dir(&self.cwd);
        Collaborators {
            local: Arc::new(FileStore::new(data_dir.clone())),
            published: Arc::new(FileStore::new(data_dir.join("published"))),
            rows: Arc::new(FileRowStore::new(data_dir.join("remote"))),
            identity: Arc::new(StaticIdentity(self.user.clone())),
        }
    }

    pub fn open(&self) -> Result<DocumentStore> {
        let config = self.config()?;
        let collaborators = self.collaborators(&config);
        Ok(DocumentStore::load(config, collaborators))
    }

    /// Open the document with `page` (if given) as the active page
    pub fn open_on(&self, page: Option<&str>) -> Result<DocumentStore> {
        let mut doc = self.open()?;
        if let Some(page) = page {
            doc.switch_page(page)?;
        }
        Ok(doc)
    }
}
