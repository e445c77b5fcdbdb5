use super::Context;
use anyhow::Result;
use colored::Colorize;

pub async fn save(ctx: &Context) -> Result<()> {
    let mut doc = ctx.open()?;
    doc.save().await?;
    println!("{} Saved {}", "✓".green(), doc.name().bright_white());
    Ok(())
}

pub async fn publish(ctx: &Context) -> Result<()> {
    let mut doc = ctx.open()?;

    println!("{}", "🚀 Publishing...".bright_blue().bold());
    let published_at = doc.publish().await?;
    doc.flush()?;

    println!(
        "{} Published {} at {}",
        "✓".green(),
        doc.name().bright_white(),
        published_at.to_rfc3339()
    );
    Ok(())
}
