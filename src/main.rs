mod config;
mod output;
mod parser;
mod profile;
mod render;
mod scraper;

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};

use config::{DEFAULT_OUT_DIR, DEFAULT_PROFILE_PATH, DEFAULT_TIMEOUT_SECS, DEFAULT_USERNAME, USERNAME_ENV};
use profile::Profile;

#[derive(Parser)]
#[command(name = "kaggle_badges", about = "Kaggle profile badge generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct OutArgs {
    /// Directory for profile_data.json and the <category>.svg badges
    #[arg(short, long, default_value = DEFAULT_OUT_DIR)]
    out_dir: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the profile page via spider.cloud, extract stats, write badges
    Scrape {
        /// Kaggle username
        #[arg(short, long, env = USERNAME_ENV, default_value = DEFAULT_USERNAME)]
        username: String,
        /// Give up on the page render after this many seconds
        #[arg(short, long, default_value_t = DEFAULT_TIMEOUT_SECS)]
        timeout: u64,
        /// Also save the fetched page lines to this file
        #[arg(long)]
        dump: Option<PathBuf>,
        #[command(flatten)]
        out: OutArgs,
    },
    /// Write badges from a hand-maintained profile document
    Render {
        /// Profile JSON (same shape as profile_data.json)
        #[arg(short, long, default_value = DEFAULT_PROFILE_PATH)]
        input: PathBuf,
        /// Override the username stored in the document
        #[arg(long)]
        username: Option<String>,
        #[command(flatten)]
        out: OutArgs,
    },
    /// Extract stats from saved page text and print them
    Parse {
        /// Page text, one line per line (see `scrape --dump`)
        file: PathBuf,
        #[arg(short, long, env = USERNAME_ENV, default_value = DEFAULT_USERNAME)]
        username: String,
        /// Write badges too, not just print
        #[arg(short, long)]
        write: bool,
        #[command(flatten)]
        out: OutArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Scrape { username, timeout, dump, out } => {
            println!("Generating badges for: {}", username);
            let url = config::profile_url(&username);

            // Collaborator failures are not fatal: badges still get written
            // from whatever was extracted, defaults included.
            let profile = match scraper::fetch_page_lines(&url, Duration::from_secs(timeout)).await {
                Ok(lines) => {
                    if let Some(path) = &dump {
                        output::dump_lines(path, &lines)?;
                        info!("Saved page text to {}", path.display());
                    }
                    parser::extract_profile(&username, &lines, &config::Windows::default())
                }
                Err(e) => {
                    warn!("Scrape failed for {}: {:#}", username, e);
                    Profile::new(&username)
                }
            };
            emit(&out.out_dir, &profile)
        }
        Commands::Render { input, username, out } => {
            let mut profile = Profile::load(&input)?;
            if let Some(name) = username {
                profile.username = name;
            }
            println!("Generating badges for: {}", profile.username);
            emit(&out.out_dir, &profile)
        }
        Commands::Parse { file, username, write, out } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let profile = parser::process_text(&username, &text);
            if write {
                emit(&out.out_dir, &profile)
            } else {
                println!("{}", render::render_json(&profile)?);
                Ok(())
            }
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

/// Write every artifact, then echo the JSON summary.
fn emit(out_dir: &Path, profile: &Profile) -> anyhow::Result<()> {
    let written = output::write_all(out_dir, profile)?;
    println!("{}", render::render_json(profile)?);
    println!("Wrote {} files to {}", written.len(), out_dir.display());
    Ok(())
}

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}
