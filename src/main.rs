//! CLI entry point for inkpress

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inkpress::content::{Catalog, ContentDir};

#[derive(Parser)]
#[command(name = "inkpress")]
#[command(version)]
#[command(about = "A tiny self-contained markdown blog server", long_about = None)]
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
    /// Start the blog server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,
    },

    /// List posts, newest first
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "inkpress=debug,info"
    } else {
        "inkpress=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    let blog = inkpress::Blog::new(&base_dir)?;

    match cli.command {
        Commands::Serve { port, ip, open } => {
            tracing::info!("Starting server at http://{}:{}", ip, port);
            inkpress::server::start(&blog, &ip, port, open).await?;
        }

        Commands::List => {
            let catalog = Catalog::new(ContentDir::new(blog.content_dir.clone()));
            let posts = catalog.list().await;

            println!("Posts ({}):", posts.len());
            for post in posts {
                println!("  {:<28} {} [{}]", post.date, post.title, post.slug);
            }
        }
    }

    Ok(())
}
