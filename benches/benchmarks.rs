// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;

use chrono::{TimeZone, Utc};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use ghstats::{
    card::render_card,
    config::DisplayConfig,
    fetch::{Event, IssueTotals, Profile},
    stats::{
        ActivityStats, CommunityStats, RepoStats, Snapshot, analyze_events, contribution_summary
    }
};

fn sample_events(count: usize) -> Vec<Event> {
    let kinds = ["PushEvent", "PullRequestEvent", "PullRequestReviewEvent", "WatchEvent"];
    (0..count)
        .map(|index| {
            let document = format!(
                r#"{{
                    "type": "{}",
                    "created_at": "2025-03-{:02}T10:00:00Z",
                    "payload": {{"action": "opened"}}
                }}"#,
                kinds[index % kinds.len()],
                1 + index % 28
            );
            serde_json::from_str(&document).expect("event fixture")
        })
        .collect()
}

fn sample_snapshot() -> Snapshot {
    Snapshot {
        activity:            ActivityStats {
            commits:    42,
            pr_reviews: 7,
            prs_opened: 3
        },
        issues:              IssueTotals {
            open:     5,
            comments: 19
        },
        community:           CommunityStats {
            orgs:     3,
            starred:  120,
            watching: 8
        },
        repos:               RepoStats {
            license:        "mit".to_owned(),
            releases:       12,
            packages:       0,
            disk_usage:     524288,
            total_stars:    900,
            total_forks:    130,
            total_watchers: 900
        },
        daily_contributions: BTreeMap::from([
            ("2025-03-04".to_owned(), 3),
            ("2025-03-06".to_owned(), 8),
            ("2025-03-09".to_owned(), 1)
        ]),
        summary:             "12 contributions - Moderate activity this week".to_owned()
    }
}

fn sample_profile() -> Profile {
    serde_json::from_str(
        r#"{
            "login": "octocat",
            "name": "The Octocat",
            "hireable": true,
            "created_at": "2011-01-25T18:44:36Z",
            "followers": 4000,
            "following": 9,
            "public_repos": 8
        }"#
    )
    .expect("profile fixture")
}

fn benchmark_analyze_events(c: &mut Criterion) {
    let events = sample_events(300);

    c.bench_function("analyze_300_events", |b| {
        b.iter(|| analyze_events(black_box(&events)))
    });
}

fn benchmark_contribution_summary(c: &mut Criterion) {
    let daily: BTreeMap<String, u64> =
        (0..7).map(|day| (format!("2025-03-{:02}", day + 1), day as u64 * 2)).collect();

    c.bench_function("contribution_summary", |b| {
        b.iter(|| contribution_summary(black_box(&daily)))
    });
}

fn benchmark_render_card(c: &mut Criterion) {
    let profile = sample_profile();
    let snapshot = sample_snapshot();
    let config = DisplayConfig::default();
    let today = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).single().expect("valid date");

    c.bench_function("render_full_card", |b| {
        b.iter(|| {
            render_card(
                black_box(&profile),
                black_box(&snapshot),
                black_box(&config),
                black_box(today)
            )
        })
    });
}

criterion_group!(
    benches,
    benchmark_analyze_events,
    benchmark_contribution_summary,
    benchmark_render_card
);
criterion_main!(benches);
