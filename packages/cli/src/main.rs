mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    component, init, page, publish, save, show, ComponentCommand, Context, InitArgs, PageCommand,
    ShowArgs,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Sitebuilder CLI - drag-and-drop website builder, from the terminal
#[derive(Parser, Debug)]
#[command(name = "sitebuilder")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Project directory (defaults to the current directory)
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Signed-in user id, required for save and publish
    #[arg(long, global = true, env = "SITEBUILDER_USER")]
    user: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a new site in the project directory
    Init(InitArgs),

    /// Manage pages
    #[command(subcommand)]
    Page(PageCommand),

    /// Edit components on a page
    #[command(subcommand)]
    Component(ComponentCommand),

    /// Print the component tree of a page
    Show(ShowArgs),

    /// Save the site to the remote store
    Save,

    /// Save and publish the site
    Publish,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let cwd = match cli.dir {
        Some(dir) => dir,
        None => match std::env::current_dir() {
            Ok(dir) => dir,
            Err(e) => {
                eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), e);
                std::process::exit(1);
            }
        },
    };
    let ctx = Context { cwd, user: cli.user };

    let result = match cli.command {
        Command::Init(args) => init(args, &ctx),
        Command::Page(command) => page(command, &ctx),
        Command::Component(command) => component(command, &ctx),
        Command::Show(args) => show(args, &ctx),
        Command::Save => save(&ctx).await,
        Command::Publish => publish(&ctx).await,
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
