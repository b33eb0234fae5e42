use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use feedreel::config::Config;
use feedreel::display::render_post;
use feedreel::feed::{aggregate_all, test_one, FeedFetcher};
use feedreel::ipc::{serve, Handler};
use feedreel::storage::SubscriptionStore;
use feedreel::subscribe::{subscribe, unsubscribe};

/// Get the config directory path (~/.config/feedreel/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("feedreel"))
}

#[derive(Parser, Debug)]
#[command(name = "feedreel", about = "Merged, newest-first reader for RSS and Atom feeds")]
struct Args {
    /// Directory holding config.toml and subscriptions.json
    #[arg(long, value_name = "DIR", global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch every subscription and print the posts, newest first (default)
    Read,
    /// Test a feed URL and add it to the subscriptions
    Subscribe { url: String },
    /// Remove a feed URL from the subscriptions
    Unsubscribe { url: String },
    /// Print the subscribed feed URLs
    List,
    /// Fetch a feed URL once and report whether it parses
    Test { url: String },
    /// Answer JSON requests line by line on stdin/stdout
    Serve,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays clean for `serve`
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config_dir = match args.config_dir {
        Some(dir) => dir,
        None => get_config_dir()?,
    };
    let config = Config::load(&config_dir.join("config.toml")).context("Failed to load config")?;
    let store = SubscriptionStore::open(config_dir.join("subscriptions.json"));
    let fetcher = FeedFetcher::new(&config).context("Failed to build HTTP client")?;

    match args.command.unwrap_or(Command::Read) {
        Command::Read => {
            let urls = store.get().await.context("Failed to read subscriptions")?;
            if urls.is_empty() {
                println!("No feeds subscribed yet.");
                println!("Add one with: feedreel subscribe <url>");
                return Ok(());
            }

            let posts = aggregate_all(&fetcher, &urls).await;
            if posts.is_empty() {
                println!("No posts found in your feeds.");
                return Ok(());
            }

            let now = Utc::now();
            for post in &posts {
                println!("{}", render_post(post, now, config.preview_width));
            }
        }
        Command::Subscribe { url } => match subscribe(&store, &fetcher, &url).await {
            Ok(count) => println!("Successfully subscribed! ({} posts)", count),
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        },
        Command::Unsubscribe { url } => {
            if unsubscribe(&store, &url)
                .await
                .context("Failed to update subscriptions")?
            {
                println!("Unsubscribed from {}", url);
            } else {
                println!("Not subscribed to {}", url);
            }
        }
        Command::List => {
            let urls = store.get().await.context("Failed to read subscriptions")?;
            if urls.is_empty() {
                println!("No feeds subscribed yet.");
            }
            for url in urls {
                println!("{}", url);
            }
        }
        Command::Test { url } => match test_one(&fetcher, &url).await {
            Ok(posts) => println!("OK: {} posts", posts.len()),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        Command::Serve => {
            let handler = Handler::new(store, fetcher);
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            serve(&handler, stdin, tokio::io::stdout())
                .await
                .context("Request stream failed")?;
        }
    }

    Ok(())
}
