//! Command-line interface for the stats card generator.
//!
//! One invocation performs one complete run: authenticate against the API,
//! fetch the profile and its activity, aggregate a statistics snapshot,
//! render the SVG card and persist the artifacts. There is no daemon mode
//! and no state carried between runs.

use std::{path::PathBuf, process};

use chrono::Utc;
use clap::Parser;
use ghstats::{
    DisplayConfig, Error, GithubClient, Session,
    artifact::{embed_reference, persist},
    card::render_card,
    config::load_display_config,
    stats::{CommunityStats, Snapshot, analyze_events, analyze_repos}
};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Command line interface for generating the profile stats card.
#[derive(Debug, Parser)]
#[command(name = "ghstats", version, about = "Generate a GitHub profile stats card")]
struct Cli {
    /// API token used for every authenticated request.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: String,

    /// Path to the JSON display configuration document.
    #[arg(long = "config", value_name = "PATH", default_value = "config.json")]
    config: PathBuf,

    /// Path to the README that carries the embed reference.
    #[arg(long = "readme", value_name = "PATH", default_value = "README.md")]
    readme: PathBuf,

    /// Path that receives the rendered SVG card.
    #[arg(long = "svg", value_name = "PATH", default_value = "github-stats.svg")]
    svg: PathBuf,

    /// Trailing activity window in days.
    #[arg(long = "days", value_name = "DAYS", default_value_t = 7)]
    days: i64
}

/// Entry point that reports errors and sets the appropriate exit status.
#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("{}", error.to_display_string());
        process::exit(1);
    }
}

/// Executes one full pipeline run using parsed arguments.
///
/// # Errors
///
/// Propagates any fetch, decode, configuration or persistence error; the
/// pipeline aborts before writing artifacts when a required fetch fails.
async fn run() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let display = load_display_config(&cli.config)?;
    let client = GithubClient::new(&cli.token)?;

    collect(client, &display, &cli).await
}

async fn collect(client: GithubClient, display: &DisplayConfig, cli: &Cli) -> Result<(), Error> {
    let days = cli.days;
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.yellow} [{elapsed_precise}] {msg}")
            .expect("valid template")
    );

    pb.set_message("Authenticating...");
    let session = Session::authenticate(client).await?;
    info!(login = session.login(), "authenticated");

    pb.set_message("Fetching profile...");
    let profile = session.profile().await?;
    debug!(followers = profile.followers, repos = profile.public_repos, "profile fetched");

    pb.set_message("Walking repositories...");
    let repos = session.repositories().await?;
    debug!(count = repos.len(), "repositories fetched");

    pb.set_message(format!("Collecting events from the last {days} days..."));
    let events = session.events(days).await?;
    debug!(count = events.len(), "events fetched");

    pb.set_message("Fetching organizations...");
    let orgs = session.organizations().await?;

    pb.set_message("Counting starred and watched repositories...");
    let community = CommunityStats {
        orgs:     orgs.len() as u64,
        starred:  session.starred_count().await?,
        watching: session.watching_count().await?
    };

    pb.set_message("Querying issue totals...");
    let issues = session.issue_stats().await?;

    pb.set_message("Probing repository releases...");
    let repo_stats = analyze_repos(session.client(), &repos).await;

    // Informational only; neither value reaches the rendered card.
    let gists = session.gists_count().await?;
    let contributed = session.contributed_repo_count().await?;
    info!(gists, contributed, "auxiliary account counts");

    let snapshot = Snapshot::assemble(analyze_events(&events), issues, community, repo_stats);
    info!(summary = %snapshot.summary, "snapshot assembled");

    pb.set_message("Rendering card...");
    let card = render_card(&profile, &snapshot, display, Utc::now());

    pb.set_message("Persisting artifacts...");
    let svg_outcome = persist(&cli.svg, &card)?;
    let readme_outcome = persist(&cli.readme, &embed_reference(session.login()))?;

    if svg_outcome.written || readme_outcome.written {
        pb.finish_with_message(format!(
            "Stats card generated for {} ({})",
            session.login(),
            snapshot.summary
        ));
    } else {
        pb.finish_with_message("Stats unchanged since the last run");
    }

    Ok(())
}
