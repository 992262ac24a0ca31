//! CLI entry point for amberpress

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use amberpress::{commands, Site};

#[derive(Parser)]
#[command(name = "amberpress")]
#[command(version)]
#[command(about = "Render blog posts, code blocks and pages to HTML", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List posts in display order
    #[command(alias = "ls")]
    List {
        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the recent posts list as HTML
    Recent,

    /// Render a markdown page
    Render {
        /// Markdown file to render
        file: PathBuf,

        /// Layout to wrap the page in (default, post)
        #[arg(short, long, default_value = "default")]
        layout: String,

        /// Emit only the page shell, without the HTML document
        #[arg(long)]
        fragment: bool,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Highlight a source file as a code block
    Highlight {
        /// Source file
        file: PathBuf,

        /// Language id (defaults to the file extension)
        #[arg(long)]
        lang: Option<String>,
    },

    /// List available highlight themes
    Themes,

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "amberpress=debug,info"
    } else {
        "amberpress=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    if let Commands::Version = cli.command {
        println!("amberpress version {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let site = Site::new(&base_dir)?;

    match cli.command {
        Commands::List { json } => commands::list::run(&site, json)?,

        Commands::Recent => commands::recent::run(&site)?,

        Commands::Render {
            file,
            layout,
            fragment,
            output,
        } => {
            tracing::info!("Rendering {:?} with layout {}", file, layout);
            commands::render::run(&site, &file, &layout, fragment, output.as_deref())?;
        }

        Commands::Highlight { file, lang } => {
            commands::highlight::run(&site, &file, lang.as_deref())?;
        }

        Commands::Themes => commands::themes::run(&site)?,

        Commands::Version => {}
    }

    Ok(())
}
