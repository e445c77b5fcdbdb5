use super::Context;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use sitebuilder_editor::ComponentNode;

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Page id (defaults to the home page)
    #[arg(long)]
    pub page: Option<String>,

    /// Print the page as JSON instead of a tree
    #[arg(long)]
    pub json: bool,
}

pub fn show(args: ShowArgs, ctx: &Context) -> Result<()> {
    let doc = ctx.open_on(args.page.as_deref())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(doc.active_components())?);
        return Ok(());
    }

    println!(
        "{} {} ({:?})",
        doc.name().bright_white().bold(),
        doc.active_page_id().cyan(),
        doc.publish_status()
    );
    if doc.active_components().is_empty() {
        println!("  {}", "(empty page)".dimmed());
    }
    for node in doc.active_components() {
        print_node(node, 1);
    }
    Ok(())
}

fn print_node(node: &ComponentNode, depth: usize) {
    let indent = "  ".repeat(depth);
    let content = node
        .content
        .as_deref()
        .map(|c| format!(" \"{}\"", c))
        .unwrap_or_default();
    println!("{}{} {}{}", indent, node.kind.to_string().green(), node.id.dimmed(), content);
    for child in &node.children {
        print_node(child, depth + 1);
    }
}
