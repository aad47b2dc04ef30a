// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Aggregation of fetched slices into the run snapshot.
//!
//! Everything here is a pure transformation over already-fetched data with
//! one exception: the releases probe, a best-effort secondary GET whose
//! failure is converted into an explicit [`ProbeOutcome::Skipped`] instead of
//! aborting the run.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    api::ApiClient,
    fetch::{Event, IssueTotals, RepoSummary}
};

/// Sentinel license value when no repository declares one.
pub const LICENSE_NONE: &str = "None";

/// Number of repositories probed for releases, in fetch order.
///
/// A sampling bound, not a correctness invariant; repositories past it
/// contribute zero releases.
pub const RELEASE_PROBE_LIMIT: usize = 10;

const EVENT_PUSH: &str = "PushEvent";
const EVENT_PULL_REQUEST: &str = "PullRequestEvent";
const EVENT_PULL_REQUEST_REVIEW: &str = "PullRequestReviewEvent";
const PR_ACTION_OPENED: &str = "opened";

/// Event-derived activity counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ActivityStats {
    /// Push events within the cutoff window.
    pub commits:    u64,
    /// Pull-request review events within the cutoff window.
    pub pr_reviews: u64,
    /// Pull-request events whose action was `opened`.
    pub prs_opened: u64
}

/// Community-facing counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CommunityStats {
    /// Organization memberships.
    pub orgs:     u64,
    /// Starred repositories (count approximation).
    pub starred:  u64,
    /// Watched repositories (count approximation).
    pub watching: u64
}

/// Repository-derived counters and sums.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoStats {
    /// Most frequent declared license key, or [`LICENSE_NONE`].
    pub license:        String,
    /// Best-effort release count over the probed sample.
    pub releases:       u64,
    /// Package count; no API source exists, always zero.
    pub packages:       u64,
    /// Sum of platform-reported repository sizes.
    pub disk_usage:     u64,
    /// Sum of stargazer counts.
    pub total_stars:    u64,
    /// Sum of fork counts.
    pub total_forks:    u64,
    /// Sum of watcher counts.
    pub total_watchers: u64
}

/// Event counters together with the per-day contribution map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActivityBreakdown {
    /// Typed event counters.
    pub activity:            ActivityStats,
    /// Contribution count per UTC calendar date (`YYYY-MM-DD`).
    pub daily_contributions: BTreeMap<String, u64>
}

/// Complete aggregated statistics for one run.
///
/// Every field is populated even when the underlying query returned nothing;
/// zero is the empty value, absence never is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Event-derived activity counters.
    pub activity:            ActivityStats,
    /// Issue search totals.
    pub issues:              IssueTotals,
    /// Community-facing counters.
    pub community:           CommunityStats,
    /// Repository-derived counters and sums.
    pub repos:               RepoStats,
    /// Contribution count per UTC calendar date.
    pub daily_contributions: BTreeMap<String, u64>,
    /// Derived one-line activity summary.
    pub summary:             String
}

impl Snapshot {
    /// Assembles the snapshot from the aggregated parts, deriving the
    /// summary line from the daily contribution map.
    pub fn assemble(
        breakdown: ActivityBreakdown,
        issues: IssueTotals,
        community: CommunityStats,
        repos: RepoStats
    ) -> Self {
        let summary = contribution_summary(&breakdown.daily_contributions);
        Self {
            activity: breakdown.activity,
            issues,
            community,
            repos,
            daily_contributions: breakdown.daily_contributions,
            summary
        }
    }
}

/// Outcome of one tolerated releases probe.
///
/// The skip reason is carried so the tolerated-failure policy stays visible
/// at the call site instead of vanishing into an empty catch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The probe succeeded and enumerated this many releases.
    Counted(u64),
    /// The probe failed; the repository contributes zero releases.
    Skipped(String)
}

/// Derives repository counters and sums from the fetched summaries.
///
/// License mode is a stable argmax over declared license keys: ties keep the
/// first-encountered key. Only the first [`RELEASE_PROBE_LIMIT`] repositories
/// are probed for releases; each probe failure is logged and contributes
/// zero.
pub async fn analyze_repos<C>(client: &C, repos: &[RepoSummary]) -> RepoStats
where
    C: ApiClient
{
    let mut releases = 0;
    for repo in repos.iter().take(RELEASE_PROBE_LIMIT) {
        match probe_releases(client, repo).await {
            ProbeOutcome::Counted(count) => releases += count,
            ProbeOutcome::Skipped(reason) => {
                warn!("releases probe skipped for {}: {reason}", repo.releases_endpoint());
            }
        }
    }

    RepoStats {
        license: license_mode(repos),
        releases,
        packages: 0,
        disk_usage: repos.iter().map(|r| r.size).sum(),
        total_stars: repos.iter().map(|r| r.stargazers_count).sum(),
        total_forks: repos.iter().map(|r| r.forks_count).sum(),
        total_watchers: repos.iter().map(|r| r.watchers_count).sum()
    }
}

/// Probes one repository's releases endpoint with the bounded client
/// timeout.
///
/// Any error, timeout included, becomes [`ProbeOutcome::Skipped`]; the probe
/// never aborts the run.
pub async fn probe_releases<C>(client: &C, repo: &RepoSummary) -> ProbeOutcome
where
    C: ApiClient
{
    let url = repo.releases_endpoint();
    if url.is_empty() {
        return ProbeOutcome::Skipped("no releases endpoint advertised".to_owned());
    }

    match client.probe(&url).await {
        Ok(response) => match response.json::<Vec<serde_json::Value>>(&url) {
            Ok(items) => ProbeOutcome::Counted(items.len() as u64),
            Err(error) => ProbeOutcome::Skipped(error.to_display_string())
        },
        Err(error) => ProbeOutcome::Skipped(error.to_display_string())
    }
}

fn license_mode(repos: &[RepoSummary]) -> String {
    let mut counts: Vec<(&str, u64)> = Vec::new();
    for repo in repos {
        if let Some(license) = repo.license.as_ref() {
            match counts.iter_mut().find(|(key, _)| *key == license.key) {
                Some((_, count)) => *count += 1,
                None => counts.push((license.key.as_str(), 1))
            }
        }
    }

    let mut best: Option<(&str, u64)> = None;
    for (key, count) in counts {
        // Strictly greater keeps the first-encountered key on ties.
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((key, count));
        }
    }

    best.map_or_else(|| LICENSE_NONE.to_owned(), |(key, _)| key.to_owned())
}

/// Counts typed events and builds the per-day contribution map.
pub fn analyze_events(events: &[Event]) -> ActivityBreakdown {
    let mut breakdown = ActivityBreakdown::default();

    for event in events {
        match event.kind.as_str() {
            EVENT_PUSH => breakdown.activity.commits += 1,
            EVENT_PULL_REQUEST => {
                if event.payload.action.as_deref() == Some(PR_ACTION_OPENED) {
                    breakdown.activity.prs_opened += 1;
                }
            }
            EVENT_PULL_REQUEST_REVIEW => breakdown.activity.pr_reviews += 1,
            _ => {}
        }

        let date = event.created_at.format("%Y-%m-%d").to_string();
        *breakdown.daily_contributions.entry(date).or_insert(0) += 1;
    }

    debug!(
        "analyzed {} events into {} active days",
        events.len(),
        breakdown.daily_contributions.len()
    );

    breakdown
}

/// Derives the one-line summary from the daily contribution map.
///
/// The bucket boundaries are inclusive at 5 and 15, and every non-zero
/// message embeds the literal total.
pub fn contribution_summary(daily_contributions: &BTreeMap<String, u64>) -> String {
    let total: u64 = daily_contributions.values().sum();
    match total {
        0 => "No contributions in the last 7 days".to_owned(),
        1..=5 => format!("{total} contributions - Light activity this week"),
        6..=15 => format!("{total} contributions - Moderate activity this week"),
        _ => format!("{total} contributions - High activity this week")
    }
}

/// One cell of the trailing-week calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarCell {
    /// UTC calendar date key (`YYYY-MM-DD`).
    pub date:  String,
    /// Day name abbreviation, e.g. `Mon`.
    pub day:   String,
    /// Contribution count for the day.
    pub count: u64,
    /// Severity tier color token.
    pub color: &'static str
}

/// Builds the seven calendar cells for the trailing week ending at `today`,
/// inclusive, oldest day first.
pub fn contribution_calendar(
    daily_contributions: &BTreeMap<String, u64>,
    today: DateTime<Utc>
) -> Vec<CalendarCell> {
    (0..7)
        .rev()
        .map(|offset| {
            let day = today - Duration::days(offset);
            let date = day.format("%Y-%m-%d").to_string();
            let count = daily_contributions.get(&date).copied().unwrap_or(0);
            CalendarCell {
                date,
                day: day.format("%a").to_string(),
                count,
                color: tier_color(count)
            }
        })
        .collect()
}

/// Maps a daily contribution count onto its fixed severity tier color.
pub fn tier_color(count: u64) -> &'static str {
    match count {
        0 => "#ebedf0",
        1..=3 => "#9be9a8",
        4..=6 => "#40c463",
        7..=9 => "#30a14e",
        _ => "#216e39"
    }
}
