//! NewsHub CLI
//!
//! Local front-end for managing and reading articles stored in a data
//! directory.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use newshub::{
    codec,
    error::{AppError, Result},
    models::{Article, ArticleDraft, Category, Config},
    render::{self, BlockRenderer, HtmlRenderer, TextRenderer},
    services::ArticleService,
    storage::LocalStorage,
};

/// NewsHub - article publishing tool
#[derive(Parser, Debug)]
#[command(name = "newshub", version, about = "Create, edit and read NewsHub articles")]
struct Cli {
    /// Directory holding articles.json and config.toml
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    /// Configuration file (default: {data_dir}/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all articles
    List,

    /// Show a single article
    Show {
        id: i64,

        /// Render as an HTML page instead of text
        #[arg(long)]
        html: bool,
    },

    /// Publish a new article
    Create {
        #[arg(short, long)]
        title: String,

        /// Article category
        #[arg(long, value_enum, ignore_case = true, default_value_t = Category::News)]
        category: Category,

        /// Body text (may contain [image:<url>] markers)
        #[arg(long, conflicts_with = "content_file")]
        content: Option<String>,

        /// Read the body from a file
        #[arg(long)]
        content_file: Option<PathBuf>,

        /// Feature image URL
        #[arg(long)]
        image: Option<String>,
    },

    /// Edit an existing article; omitted fields keep their values
    Edit {
        id: i64,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(long, value_enum, ignore_case = true)]
        category: Option<Category>,

        #[arg(long, conflicts_with = "content_file")]
        content: Option<String>,

        #[arg(long)]
        content_file: Option<PathBuf>,

        #[arg(long)]
        image: Option<String>,
    },

    /// Delete an article
    Delete { id: i64 },

    /// List articles in a category
    Category {
        #[arg(value_enum, ignore_case = true)]
        category: Category,
    },

    /// Show the latest articles, newest first
    Featured {
        /// Number of articles (default from config)
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },

    /// List inline images of an article
    Images { id: i64 },

    /// Insert an inline image marker into an article body
    InsertImage {
        id: i64,

        /// Character position to insert at (default: end of body)
        #[arg(long)]
        at: Option<usize>,

        url: String,
    },

    /// Validate configuration and stored articles
    Validate,
}

/// Initialize logging with the given default filter.
fn init_logging(level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Read a body from `--content` or `--content-file`.
fn read_content(content: Option<String>, file: Option<PathBuf>) -> Result<Option<String>> {
    match (content, file) {
        (Some(text), _) => Ok(Some(text)),
        (None, Some(path)) => Ok(Some(std::fs::read_to_string(path)?)),
        (None, None) => Ok(None),
    }
}

fn print_listing(articles: &[Article], config: &Config) {
    if articles.is_empty() {
        println!("No articles.");
        return;
    }
    for article in articles {
        println!("{}", article.format("{id}  [{category}] {title}  ({date})"));
        let summary = render::excerpt(&article.content, config.render.excerpt_length);
        if !summary.is_empty() {
            println!("    {summary}");
        }
    }
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| cli.data_dir.join("config.toml"));
    let (config, config_error) = match Config::load(&config_path) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    let level = if cli.verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    init_logging(level);

    match config_error {
        Some(AppError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("No config at {}, using defaults", config_path.display());
        }
        Some(e) => log::warn!(
            "Config load failed from {}: {}. Using defaults.",
            config_path.display(),
            e
        ),
        None => log::debug!("Loaded configuration from {}", config_path.display()),
    }

    let storage = LocalStorage::with_config(&cli.data_dir, &config.storage);
    let service = ArticleService::with_config(storage, &config);

    match cli.command {
        Command::List => {
            let articles = service.list().await?;
            print_listing(&articles, &config);
        }

        Command::Show { id, html } => {
            let article = service.get(id).await?;
            if html {
                let renderer = HtmlRenderer::new(&config.render)?;
                print!("{}", renderer.render_article(&article)?);
            } else {
                println!("{}", article.title);
                println!(
                    "{} | {} | {}",
                    article.category.display_name(),
                    render::display_date(&article.created_at),
                    render::reading_time(&article.content, config.render.words_per_minute)
                );
                println!("Feature image: {}", article.image_url);
                println!();
                println!("{}", TextRenderer.render(&article.blocks())?);
            }
        }

        Command::Create {
            title,
            category,
            content,
            content_file,
            image,
        } => {
            let content = read_content(content, content_file)?.unwrap_or_default();
            let mut draft = ArticleDraft::new(title, content, category);
            draft.image_url = image;

            let article = service.create(draft).await?;
            println!("Published {} at {}", article.id, article.link());
        }

        Command::Edit {
            id,
            title,
            category,
            content,
            content_file,
            image,
        } => {
            let existing = service.get(id).await?;
            let draft = ArticleDraft {
                title: title.unwrap_or(existing.title),
                content: read_content(content, content_file)?.unwrap_or(existing.content),
                category: category.unwrap_or(existing.category),
                image_url: image,
            };

            let article = service.update(id, draft).await?;
            println!("Updated {} at {}", article.id, article.link());
        }

        Command::Delete { id } => {
            let article = service.delete(id).await?;
            println!("Deleted {} \"{}\"", article.id, article.title);
        }

        Command::Category { category } => {
            let articles = service.by_category(category.slug()).await?;
            println!("{}", category.display_name());
            if articles.is_empty() {
                println!(
                    "There are currently no articles in the {} category.",
                    category.display_name()
                );
            } else {
                print_listing(&articles, &config);
            }
        }

        Command::Featured { count } => {
            let count = count.unwrap_or(config.feed.featured_count);
            let articles = service.featured(count).await?;
            print_listing(&articles, &config);
        }

        Command::Images { id } => {
            let urls = service.gallery(id).await?;
            if urls.is_empty() {
                println!("No inline images.");
            }
            for (i, url) in urls.iter().enumerate() {
                println!("{:>3}. {}", i + 1, url);
            }
        }

        Command::InsertImage { id, at, url } => {
            if !codec::is_marker_safe(&url) {
                return Err(AppError::validation(format!(
                    "image URL {url:?} contains ']' which cannot be stored in a marker"
                )));
            }
            let (article, cursor) = service
                .insert_image(id, at.unwrap_or(usize::MAX), &url)
                .await?;
            println!(
                "Inserted {} into {}; cursor now at {}",
                codec::marker(&url),
                article.id,
                cursor
            );
        }

        Command::Validate => {
            log::info!("Validating configuration...");
            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");

            let articles = service.list().await?;
            let mut problems = 0;
            for article in &articles {
                if article.title.trim().is_empty() {
                    log::warn!("Article {} has an empty title", article.id);
                    problems += 1;
                }
            }
            let mut ids: Vec<i64> = articles.iter().map(|a| a.id).collect();
            ids.sort_unstable();
            ids.dedup();
            if ids.len() != articles.len() {
                log::warn!("Duplicate article ids found");
                problems += 1;
            }

            if problems > 0 {
                return Err(AppError::validation(format!(
                    "{problems} problem(s) in stored articles"
                )));
            }
            log::info!("✓ {} articles OK", articles.len());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parsed_case_insensitively() {
        let cli = Cli::try_parse_from(["newshub", "category", "Sport"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Category {
                category: Category::Sport
            }
        ));
    }

    #[test]
    fn test_unknown_category_rejected_at_parse_time() {
        let err = Cli::try_parse_from(["newshub", "create", "-t", "Hi", "--category", "weather"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);

        assert!(Cli::try_parse_from(["newshub", "edit", "1", "--category", "nope"]).is_err());
    }

    #[test]
    fn test_create_category_defaults_to_news() {
        let cli = Cli::try_parse_from(["newshub", "create", "-t", "Hi"]).unwrap();
        match cli.command {
            Command::Create { category, .. } => assert_eq!(category, Category::News),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_help_lists_category_choices() {
        let err = Cli::try_parse_from(["newshub", "create", "--help"]).unwrap_err();
        let help = err.to_string();
        for category in Category::ALL {
            assert!(help.contains(category.slug()), "missing {category} in help");
        }
    }
}
