use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use admin_console::api::HttpAdminApi;
use admin_console::notify::ConsoleNotifier;
use admin_console::pages::{ReviewPage, SaveOutcome, TagEditorPage, TagField};
use admin_console::route::RouteParams;
use admin_console::view::SubmitOutcome;
use admin_console::{AppContext, Config};

/// Command-line driver for the admin pages.
#[derive(Parser)]
#[clap(name = "admin-console", version)]
struct Cli {
    #[clap(subcommand)]
    page: Page,
}

#[derive(Subcommand)]
enum Page {
    /// Load a tag into the edit form.
    Tag {
        /// Tag id, as it would appear in the page URL.
        id: String,
        /// Change a field before rendering, e.g. `--set name=rock`.
        #[clap(long = "set", value_name = "FIELD=VALUE")]
        edits: Vec<String>,
        /// Press Save after editing.
        #[clap(long)]
        save: bool,
    },
    /// List the reviews on a file.
    Reviews {
        /// File id, as it would appear in the page URL.
        id: String,
        /// Post a new review with this text.
        #[clap(long, value_name = "TEXT")]
        submit: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = Config::from_env().context("Failed to load configuration")?;
    info!("Using admin API at {}", config.api_base_url);

    let api = HttpAdminApi::new(config.clone())?;
    let ctx = AppContext::new(config, Arc::new(api), Arc::new(ConsoleNotifier));

    match cli.page {
        Page::Tag { id, edits, save } => {
            let page = TagEditorPage::new(ctx.clone(), &RouteParams::new().with("id", &id));
            page.mount().await?;

            for edit in &edits {
                let (name, value) = edit
                    .split_once('=')
                    .ok_or_else(|| anyhow!("Expected FIELD=VALUE, got {}", edit))?;
                let field =
                    TagField::from_name(name).ok_or_else(|| anyhow!("Unknown field: {}", name))?;
                page.edit(field, value).await?;
            }

            if save {
                match page.save().await? {
                    SaveOutcome::Disabled => info!("Save is disabled (ADMIN_ENABLE_TAG_SAVE)"),
                    SaveOutcome::Saved => info!("Tag saved"),
                    SaveOutcome::Rejected(_) | SaveOutcome::Busy => {}
                }
            }

            print!("{}", page.render().await);
            page.unmount();
        }
        Page::Reviews { id, submit } => {
            let page = ReviewPage::new(ctx.clone(), &RouteParams::new().with("id", &id));
            page.mount().await?;

            if let Some(text) = submit {
                page.set_draft(&text).await;
                if page.submit().await? == SubmitOutcome::Accepted {
                    info!("Review submitted");
                }
            }

            print!("{}", page.render().await);
            page.unmount();
        }
    }

    let stats = ctx.get_stats().await;
    info!(
        "Requests sent: {}, server errors: {}, transport errors: {}",
        stats.requests_sent, stats.api_errors, stats.transport_errors
    );

    Ok(())
}
