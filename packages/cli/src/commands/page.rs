use super::Context;
use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

#[derive(Debug, Subcommand)]
pub enum PageCommand {
    /// List pages
    List,

    /// Add a page; the id is derived from the name
    Add { name: String },

    /// Remove a page (the home page cannot be removed)
    Remove { id: String },

    /// Rename a page; its id and path stay the same
    Rename { id: String, name: String },
}

pub fn page(command: PageCommand, ctx: &Context) -> Result<()> {
    let mut doc = ctx.open()?;

    match command {
        PageCommand::List => {
            for page in doc.pages() {
                let marker = if page.is_home { "⌂".green() } else { " ".normal() };
                println!(
                    "{} {:<20} {:<20} {} component(s)",
                    marker,
                    page.id.cyan(),
                    page.path,
                    page.components.len()
                );
            }
            return Ok(());
        }

        PageCommand::Add { name } => {
            let id = doc.add_page(&name)?;
            println!("{} Added page {} at /{}", "✓".green(), name.bright_white(), id);
        }

        PageCommand::Remove { id } => {
            doc.remove_page(&id)?;
            println!("{} Removed page {}", "✓".green(), id.bright_white());
        }

        PageCommand::Rename { id, name } => {
            doc.rename_page(&id, &name)?;
            println!("{} Renamed {} to {}", "✓".green(), id.cyan(), name.bright_white());
        }
    }

    doc.flush()?;
    Ok(())
}
