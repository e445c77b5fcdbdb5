use super::Context;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use sitebuilder_editor::{EditorConfig, DEFAULT_CONFIG_NAME};
use std::fs;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Site name
    #[arg(short, long, default_value = "My Website")]
    pub name: String,

    /// Data directory for local, published and remote stores
    #[arg(short, long, default_value = ".sitebuilder")]
    pub data_dir: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing site...".bright_blue().bold());

    let config = EditorConfig {
        data_dir: args.data_dir.clone(),
        default_site_name: args.name.clone(),
        ..EditorConfig::default()
    };
    fs::create_dir_all(&ctx.cwd)?;
    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    let mut doc = ctx.open()?;
    if doc.name() != args.name {
        let description = doc.website().description;
        doc.set_details(&args.name, &description);
    }
    doc.flush()?;
    println!("  {} Created site {}", "✓".green(), doc.name().cyan());

    println!();
    println!("{}", "✅ Site initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: sitebuilder component template hero");
    println!("  2. Run: sitebuilder show");
    println!("  3. Run: sitebuilder publish --user <id>");

    Ok(())
}
