use super::Context;
use anyhow::{anyhow, Result};
use clap::{Subcommand, ValueEnum};
use colored::Colorize;
use sitebuilder_editor::{
    ComponentPatch, ComponentType, Direction, DocumentStore, DragPayload, MutationResult, Template,
};

#[derive(Debug, Subcommand)]
pub enum ComponentCommand {
    /// Insert a component at the root or inside a container
    Insert {
        /// Component type (text, heading, button, container, ...)
        kind: ComponentType,
        #[arg(long)]
        parent: Option<String>,
        #[arg(long)]
        page: Option<String>,
    },

    /// Insert a section template (hero, features, contact, pricing, footer)
    Template {
        template: Template,
        #[arg(long)]
        parent: Option<String>,
        #[arg(long)]
        page: Option<String>,
    },

    /// Replace a component's content
    Update {
        id: String,
        #[arg(long)]
        content: String,
        #[arg(long)]
        page: Option<String>,
    },

    /// Set one style property
    Style {
        id: String,
        property: String,
        value: String,
        #[arg(long)]
        page: Option<String>,
    },

    /// Duplicate a component (the copy is added at the page root)
    Duplicate {
        id: String,
        #[arg(long)]
        page: Option<String>,
    },

    /// Remove a component and everything inside it
    Remove {
        id: String,
        #[arg(long)]
        page: Option<String>,
    },

    /// Move a component among its siblings
    Move {
        id: String,
        direction: MoveDirection,
        #[arg(long)]
        page: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MoveDirection {
    Up,
    Down,
}

impl From<MoveDirection> for Direction {
    fn from(d: MoveDirection) -> Self {
        match d {
            MoveDirection::Up => Direction::Up,
            MoveDirection::Down => Direction::Down,
        }
    }
}

pub fn component(command: ComponentCommand, ctx: &Context) -> Result<()> {
    let (result, what) = match command {
        ComponentCommand::Insert { kind, parent, page } => {
            let mut doc = ctx.open_on(page.as_deref())?;
            require_container(&doc, parent.as_deref())?;
            doc.begin_drag(DragPayload::Component(kind));
            let result = doc.drop_on(parent.as_deref());
            (finish(doc, result)?, format!("Inserted {}", kind))
        }

        ComponentCommand::Template {
            template,
            parent,
            page,
        } => {
            let mut doc = ctx.open_on(page.as_deref())?;
            require_container(&doc, parent.as_deref())?;
            doc.begin_drag(DragPayload::Template(template));
            let result = doc.drop_on(parent.as_deref());
            (finish(doc, result)?, format!("Inserted {} template", template))
        }

        ComponentCommand::Update { id, content, page } => {
            let mut doc = ctx.open_on(page.as_deref())?;
            let result = doc.update(&id, ComponentPatch::content(content));
            (finish(doc, Some(result))?, format!("Updated {}", id))
        }

        ComponentCommand::Style {
            id,
            property,
            value,
            page,
        } => {
            let mut doc = ctx.open_on(page.as_deref())?;
            let result = doc.set_style(&id, &property, &value);
            (finish(doc, Some(result))?, format!("Set {} on {}", property, id))
        }

        ComponentCommand::Duplicate { id, page } => {
            let mut doc = ctx.open_on(page.as_deref())?;
            let result = doc.duplicate(&id);
            (finish(doc, Some(result))?, format!("Duplicated {}", id))
        }

        ComponentCommand::Remove { id, page } => {
            let mut doc = ctx.open_on(page.as_deref())?;
            let result = doc.remove(&id);
            (finish(doc, Some(result))?, format!("Removed {}", id))
        }

        ComponentCommand::Move {
            id,
            direction,
            page,
        } => {
            let mut doc = ctx.open_on(page.as_deref())?;
            let result = doc.move_node(&id, direction.into());
            (finish(doc, Some(result))?, format!("Moved {}", id))
        }
    };

    if result.changed {
        println!("{} {} (v{})", "✓".green(), what, result.version);
    } else {
        println!("{} Nothing changed", "⚠️".yellow());
    }
    Ok(())
}

/// Tree operations are silent on bad targets; the CLI reports them up front
fn require_container(doc: &DocumentStore, parent: Option<&str>) -> Result<()> {
    let Some(parent) = parent else {
        return Ok(());
    };
    match doc.find(parent) {
        None => Err(anyhow!("No component with id {}", parent)),
        Some(node) if !node.can_have_children() => Err(anyhow!(
            "{} is a {}; please select a container",
            parent,
            node.kind
        )),
        Some(_) => Ok(()),
    }
}

fn finish(mut doc: DocumentStore, result: Option<MutationResult>) -> Result<MutationResult> {
    let result = result.unwrap_or(MutationResult {
        version: doc.version(),
        changed: false,
    });
    if result.changed {
        doc.flush()?;
    }
    Ok(result)
}
