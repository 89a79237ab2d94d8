//! CLI entry point for jekyll-matter

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use jekyll_matter::commands;
use jekyll_matter::content::DocumentKind;
use jekyll_matter::Site;

#[derive(Parser)]
#[command(name = "jekyll-matter")]
#[command(version)]
#[command(about = "Parse and regenerate Jekyll front matter", long_about = None)]
struct Cli {
    /// Set the site directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Page,
    Post,
}

impl From<Kind> for DocumentKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Page => DocumentKind::Page,
            Kind::Post => DocumentKind::Post,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a page or post and print it as JSON
    Parse {
        file: PathBuf,

        /// Document kind (inferred from the path when omitted)
        #[arg(short, long, value_enum)]
        kind: Option<Kind>,

        /// Revision the file was read at
        #[arg(long = "ref", default_value = "")]
        source_ref: String,

        /// Review request the file belongs to
        #[arg(long)]
        review_link: Option<String>,
    },

    /// Generate a document from a YAML or JSON field file
    #[command(alias = "g")]
    Generate {
        fields: PathBuf,

        #[arg(short, long, value_enum, default_value = "post")]
        kind: Kind,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Rewrite a document with canonical front matter
    Fmt {
        file: PathBuf,

        #[arg(short, long, value_enum)]
        kind: Option<Kind>,

        /// Overwrite the file instead of printing
        #[arg(short, long)]
        write: bool,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        #[arg(short, long)]
        author: String,

        /// Comma-separated tags
        #[arg(short, long)]
        tags: Option<String>,

        #[arg(long)]
        hero: Option<String>,

        #[arg(long)]
        overlay: Option<String>,

        /// Mark the post as published
        #[arg(long)]
        publish: bool,

        /// Open the body with the lead marker
        #[arg(long)]
        lead: bool,
    },

    /// Parse every Markdown file under a directory and check its images
    Check {
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "jekyll_matter=debug,info"
    } else {
        "jekyll_matter=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let site = Site::new(&base_dir)?;
    let in_site = |path: PathBuf| {
        if path.is_absolute() {
            path
        } else {
            base_dir.join(path)
        }
    };

    match cli.command {
        Commands::Parse {
            file,
            kind,
            source_ref,
            review_link,
        } => {
            commands::parse::run(
                &site,
                &in_site(file),
                kind.map(Into::into),
                &source_ref,
                review_link.as_deref(),
            )?;
        }

        Commands::Generate {
            fields,
            kind,
            output,
        } => {
            let output = output.map(in_site);
            commands::generate::run(&site, &in_site(fields), kind.into(), output.as_deref())?;
        }

        Commands::Fmt { file, kind, write } => {
            commands::fmt::run(&site, &in_site(file), kind.map(Into::into), write)?;
        }

        Commands::New {
            title,
            author,
            tags,
            hero,
            overlay,
            publish,
            lead,
        } => {
            tracing::info!("Creating new post with title: {}", title);
            let post = commands::new::NewPost {
                title,
                author,
                tags,
                hero_image: hero,
                overlay,
                published: publish,
                lead_break: lead,
            };
            commands::new::run(&site, &post)?;
        }

        Commands::Check { dir } => {
            commands::check::run(&site, &in_site(dir))?;
        }
    }

    Ok(())
}
