// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! SVG stats card renderer.
//!
//! Rendering is a pure function of the profile, the snapshot, the display
//! configuration and the reference day. Panels are first assembled as typed
//! field descriptors gated by the configuration, then a single emission pass
//! maps them onto SVG text; what to show never mixes with how to format it.
//! All coordinates are static constants, so hiding a field can never shift a
//! sibling panel.

use std::{borrow::Cow, fmt::Write as _};

use chrono::{DateTime, Utc};

use crate::{
    config::DisplayConfig,
    fetch::Profile,
    stats::{Snapshot, contribution_calendar}
};

const CARD_WIDTH: u32 = 900;
const CARD_HEIGHT: u32 = 450;
const BACKGROUND: &str = "#0d1117";
const TEXT_COLOR: &str = "#c9d1d9";
const MUTED_COLOR: &str = "#8b949e";

const PROFILE_X: u32 = 20;
const PROFILE_NAME_Y: u32 = 40;
const PROFILE_ROW_START_Y: u32 = 58;
const PROFILE_ROW_STEP: u32 = 25;

const CALENDAR_X: u32 = 550;
const CALENDAR_HEADER_Y: u32 = 40;
const CALENDAR_CELL_Y: u32 = 60;
const CALENDAR_CELL_STEP: u32 = 45;
const CALENDAR_CELL_SIZE: u32 = 35;

const SUMMARY_X: u32 = 700;
const SUMMARY_Y: u32 = 130;

const PANEL_HEADER_Y: u32 = 190;
const PANEL_FIELD_START_Y: u32 = 210;
const PANEL_FIELD_STEP: u32 = 25;
const PANEL_TEXT_OFFSET: u32 = 18;

/// Static decorative icon prelude, emitted verbatim regardless of
/// configuration.
const ICON_DEFS: &str = r##"  <defs>

    <g id="calendar-icon">
      <rect x="0" y="1.5" width="10.5" height="9" rx="1.5" fill="none" stroke="#c9d1d9" stroke-width="1"/>
      <line x1="2.25" y1="0" x2="2.25" y2="3" stroke="#c9d1d9" stroke-width="1"/>
      <line x1="8.25" y1="0" x2="8.25" y2="3" stroke="#c9d1d9" stroke-width="1"/>
      <line x1="0" y1="4.5" x2="10.5" y2="4.5" stroke="#c9d1d9" stroke-width="1"/>
    </g>
    <g id="users-icon">
      <circle cx="3.75" cy="3" r="2.25" fill="none" stroke="#c9d1d9" stroke-width="1"/>
      <path d="M0,10.5 Q0,7.5 3.75,7.5 Q7.5,7.5 7.5,10.5" fill="none" stroke="#c9d1d9" stroke-width="1"/>
      <circle cx="8.25" cy="3.75" r="1.5" fill="none" stroke="#c9d1d9" stroke-width="1"/>
      <path d="M7.5,10.5 Q7.5,8.25 9.75,8.25 Q12,8.25 12,10.5" fill="none" stroke="#c9d1d9" stroke-width="1"/>
    </g>
    <g id="briefcase-icon">
      <rect x="0.75" y="3.75" width="10.5" height="6.75" rx="1.5" fill="none" stroke="#c9d1d9" stroke-width="1"/>
      <path d="M3.75,3.75 L3.75,2.25 Q3.75,1.5 4.5,1.5 L7.5,1.5 Q8.25,1.5 8.25,2.25 L8.25,3.75" fill="none" stroke="#c9d1d9" stroke-width="1"/>
    </g>
    <g id="activity-icon">
      <polyline points="0,6 3,6 4.5,1.5 7.5,10.5 9,6 12,6" fill="none" stroke="#c9d1d9" stroke-width="1.5"/>
    </g>
    <g id="zap-icon">
      <polygon points="6,0 1.5,6.75 6,6.75 4.5,12 10.5,5.25 6,5.25" fill="none" stroke="#c9d1d9" stroke-width="1"/>
    </g>
    <g id="building-icon">
      <rect x="1.5" y="1.5" width="9" height="9" fill="none" stroke="#c9d1d9" stroke-width="1"/>
      <rect x="3.75" y="3.75" width="1.5" height="1.5" fill="#c9d1d9"/>
      <rect x="6.75" y="3.75" width="1.5" height="1.5" fill="#c9d1d9"/>
      <rect x="3.75" y="6.75" width="1.5" height="1.5" fill="#c9d1d9"/>
      <rect x="6.75" y="6.75" width="1.5" height="1.5" fill="#c9d1d9"/>
    </g>
    <g id="folder-icon">
      <path d="M1.5,2.25 L4.5,2.25 L6,3.75 L10.5,3.75 L10.5,9.75 L1.5,9.75 Z" fill="none" stroke="#c9d1d9" stroke-width="1"/>
    </g>
    <g id="star-icon">
      <polygon points="6,0.75 7.5,4.5 11.25,4.5 8.25,6.75 9.75,10.5 6,8.25 2.25,10.5 3.75,6.75 0.75,4.5 4.5,4.5" fill="none" stroke="#c9d1d9" stroke-width="1"/>
    </g>
    <g id="git-commit-icon">
      <circle cx="6" cy="6" r="2.25" fill="none" stroke="#c9d1d9" stroke-width="1"/>
      <line x1="0" y1="6" x2="3.75" y2="6" stroke="#c9d1d9" stroke-width="1"/>
      <line x1="8.25" y1="6" x2="12" y2="6" stroke="#c9d1d9" stroke-width="1"/>
    </g>
    <g id="eye-icon">
      <ellipse cx="6" cy="6" rx="5.25" ry="3" fill="none" stroke="#c9d1d9" stroke-width="1"/>
      <circle cx="6" cy="6" r="1.5" fill="#c9d1d9"/>
    </g>
    <g id="git-pr-icon">
      <circle cx="2.25" cy="2.25" r="1.5" fill="none" stroke="#c9d1d9" stroke-width="1"/>
      <circle cx="2.25" cy="9.75" r="1.5" fill="none" stroke="#c9d1d9" stroke-width="1"/>
      <circle cx="9.75" cy="6" r="1.5" fill="none" stroke="#c9d1d9" stroke-width="1"/>
      <line x1="2.25" y1="3.75" x2="2.25" y2="8.25" stroke="#c9d1d9" stroke-width="1"/>
      <path d="M8.25,6 L6,6 L6,2.25 L2.25,2.25" fill="none" stroke="#c9d1d9" stroke-width="1"/>
    </g>
    <g id="alert-icon">
      <circle cx="6" cy="6" r="5.25" fill="none" stroke="#c9d1d9" stroke-width="1"/>
      <line x1="6" y1="3" x2="6" y2="6.75" stroke="#c9d1d9" stroke-width="1"/>
      <circle cx="6" cy="9" r="0.375" fill="#c9d1d9"/>
    </g>
    <g id="message-icon">
      <rect x="0.75" y="2.25" width="10.5" height="7.5" rx="1.5" fill="none" stroke="#c9d1d9" stroke-width="1"/>
      <polyline points="0.75,2.25 6,6 11.25,2.25" fill="none" stroke="#c9d1d9" stroke-width="1"/>
    </g>
    <g id="user-plus-icon">
      <circle cx="4.5" cy="3.75" r="2.25" fill="none" stroke="#c9d1d9" stroke-width="1"/>
      <path d="M0,10.5 Q0,7.5 4.5,7.5 Q9,7.5 9,10.5" fill="none" stroke="#c9d1d9" stroke-width="1"/>
      <line x1="9.75" y1="3.75" x2="12" y2="3.75" stroke="#c9d1d9" stroke-width="1"/>
      <line x1="10.875" y1="2.625" x2="10.875" y2="4.875" stroke="#c9d1d9" stroke-width="1"/>
    </g>
    <g id="star-outline-icon">
      <polygon points="6,0.75 7.5,4.5 11.25,4.5 8.25,6.75 9.75,10.5 6,8.25 2.25,10.5 3.75,6.75 0.75,4.5 4.5,4.5" fill="none" stroke="#c9d1d9" stroke-width="1"/>
    </g>
    <g id="scale-icon">
      <line x1="6" y1="1.5" x2="6" y2="10.5" stroke="#c9d1d9" stroke-width="1"/>
      <path d="M1.5,4.5 L6,1.5 L10.5,4.5" fill="none" stroke="#c9d1d9" stroke-width="1"/>
      <path d="M1.5,4.5 L1.5,6 L4.5,6 L4.5,4.5" fill="none" stroke="#c9d1d9" stroke-width="1"/>
      <path d="M7.5,4.5 L7.5,6 L10.5,6 L10.5,4.5" fill="none" stroke="#c9d1d9" stroke-width="1"/>
    </g>
    <g id="rocket-icon">
      <path d="M6,1.5 Q9,1.5 10.5,4.5 L10.5,7.5 L9,9 L7.5,7.5 L4.5,7.5 L3,9 L1.5,7.5 L1.5,4.5 Q3,1.5 6,1.5" fill="none" stroke="#c9d1d9" stroke-width="1"/>
      <circle cx="6.75" cy="4.5" r="0.75" fill="#c9d1d9"/>
      <path d="M4.5,7.5 L3,10.5 L4.5,9" fill="none" stroke="#c9d1d9" stroke-width="1"/>
      <path d="M7.5,7.5 L9,10.5 L7.5,9" fill="none" stroke="#c9d1d9" stroke-width="1"/>
    </g>
    <g id="package-icon">
      <path d="M1.5,3 L6,0.75 L10.5,3 L10.5,9 L6,11.25 L1.5,9 Z" fill="none" stroke="#c9d1d9" stroke-width="1"/>
      <polyline points="1.5,3 6,5.25 10.5,3" fill="none" stroke="#c9d1d9" stroke-width="1"/>
      <line x1="6" y1="5.25" x2="6" y2="11.25" stroke="#c9d1d9" stroke-width="1"/>
    </g>
    <g id="database-icon">
      <ellipse cx="6" cy="2.25" rx="4.5" ry="1.5" fill="none" stroke="#c9d1d9" stroke-width="1"/>
      <path d="M1.5,2.25 L1.5,9.75 Q1.5,11.25 6,11.25 Q10.5,11.25 10.5,9.75 L10.5,2.25" fill="none" stroke="#c9d1d9" stroke-width="1"/>
      <ellipse cx="6" cy="6" rx="4.5" ry="1.5" fill="none" stroke="#c9d1d9" stroke-width="1"/>
    </g>
    <g id="fork-icon">
      <circle cx="6" cy="1.5" r="1.5" fill="none" stroke="#c9d1d9" stroke-width="1"/>
      <circle cx="2.25" cy="10.5" r="1.5" fill="none" stroke="#c9d1d9" stroke-width="1"/>
      <circle cx="9.75" cy="10.5" r="1.5" fill="none" stroke="#c9d1d9" stroke-width="1"/>
      <path d="M6,3 L6,6 M3.75,6 Q3.75,7.5 2.25,9 M8.25,6 Q8.25,7.5 9.75,9" fill="none" stroke="#c9d1d9" stroke-width="1"/>
    </g>
  </defs>
"##;

/// One gated line inside a stat panel.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PanelField {
    icon:  &'static str,
    label: String
}

/// A stat panel anchored at a fixed column.
///
/// Only enabled fields are carried; an empty panel emits nothing, header
/// included.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Panel {
    header: &'static str,
    x:      u32,
    fields: Vec<PanelField>
}

/// Renders the complete stats card.
///
/// `today` anchors the trailing-week calendar; production passes
/// `Utc::now()`, tests pass a fixed instant.
pub fn render_card(
    profile: &Profile,
    snapshot: &Snapshot,
    config: &DisplayConfig,
    today: DateTime<Utc>
) -> String {
    let mut svg = String::with_capacity(16 * 1024);

    let _ = writeln!(
        svg,
        "<svg width=\"{CARD_WIDTH}\" height=\"{CARD_HEIGHT}\" xmlns=\"http://www.w3.org/2000/svg\">"
    );
    svg.push_str(ICON_DEFS);
    let _ = writeln!(
        svg,
        "\n  <rect width=\"{CARD_WIDTH}\" height=\"{CARD_HEIGHT}\" fill=\"{BACKGROUND}\"/>\n"
    );

    emit_profile_block(&mut svg, profile, config);
    if config.calendar.enabled {
        emit_calendar(&mut svg, snapshot, today);
    }
    let _ = writeln!(
        svg,
        "  <text x=\"{SUMMARY_X}\" y=\"{SUMMARY_Y}\" font-family=\"Arial\" font-size=\"12\" fill=\"{MUTED_COLOR}\" text-anchor=\"middle\">{}</text>",
        escape_xml(&snapshot.summary)
    );

    for panel in build_panels(profile, snapshot, config) {
        emit_panel(&mut svg, &panel);
    }

    svg.push_str("</svg>\n");
    svg
}

fn emit_profile_block(svg: &mut String, profile: &Profile, config: &DisplayConfig) {
    let display_name = profile.name.as_deref().unwrap_or(&profile.login);
    if config.profile.name {
        let _ = writeln!(
            svg,
            "  <text x=\"{PROFILE_X}\" y=\"{PROFILE_NAME_Y}\" font-family=\"Arial\" font-size=\"24\" font-weight=\"bold\" fill=\"{TEXT_COLOR}\">{}</text>",
            escape_xml(display_name)
        );
    }

    let mut rows: Vec<(&'static str, String)> = Vec::with_capacity(3);
    if config.profile.joined_date {
        rows.push((
            "calendar-icon",
            format!("Joined: {}", profile.created_at.format("%B %d, %Y"))
        ));
    }
    if config.profile.followers {
        rows.push(("users-icon", format!("Followers: {}", profile.followers)));
    }
    if config.profile.available_for_hire {
        let hireable = if profile.hireable.unwrap_or(false) { "Yes" } else { "No" };
        rows.push(("briefcase-icon", format!("Available for hire: {hireable}")));
    }

    let mut y = PROFILE_ROW_START_Y;
    for (icon, label) in rows {
        let _ = writeln!(svg, "  <use href=\"#{icon}\" x=\"{PROFILE_X}\" y=\"{y}\"/>");
        let _ = writeln!(
            svg,
            "  <text x=\"{}\" y=\"{}\" font-family=\"Arial\" font-size=\"14\" fill=\"{TEXT_COLOR}\">{}</text>",
            PROFILE_X + 22,
            y + 12,
            escape_xml(&label)
        );
        y += PROFILE_ROW_STEP;
    }
}

fn emit_calendar(svg: &mut String, snapshot: &Snapshot, today: DateTime<Utc>) {
    let _ = writeln!(
        svg,
        "  <text x=\"{CALENDAR_X}\" y=\"{CALENDAR_HEADER_Y}\" font-family=\"Arial\" font-size=\"18\" font-weight=\"bold\" fill=\"{TEXT_COLOR}\">Last 7 Days</text>"
    );

    for (index, cell) in contribution_calendar(&snapshot.daily_contributions, today)
        .iter()
        .enumerate()
    {
        let x = CALENDAR_X + index as u32 * CALENDAR_CELL_STEP;
        let _ = writeln!(
            svg,
            "  <rect x=\"{x}\" y=\"{CALENDAR_CELL_Y}\" width=\"{CALENDAR_CELL_SIZE}\" height=\"{CALENDAR_CELL_SIZE}\" fill=\"{}\" rx=\"3\"/>",
            cell.color
        );
        let _ = writeln!(
            svg,
            "  <text x=\"{}\" y=\"{}\" font-family=\"Arial\" font-size=\"10\" fill=\"{MUTED_COLOR}\" text-anchor=\"middle\">{}</text>",
            x + 17,
            CALENDAR_CELL_Y + 55,
            cell.day
        );
    }
}

fn build_panels(profile: &Profile, snapshot: &Snapshot, config: &DisplayConfig) -> Vec<Panel> {
    let mut activity = Panel {
        header: "Activity Stats",
        x:      20,
        fields: Vec::new()
    };
    if config.activity.commits {
        activity.push("git-commit-icon", format!("Commits (7d): {}", snapshot.activity.commits));
    }
    if config.activity.pr_reviews {
        activity.push("eye-icon", format!("PR Reviews: {}", snapshot.activity.pr_reviews));
    }
    if config.activity.prs_opened {
        activity.push("git-pr-icon", format!("PRs Opened: {}", snapshot.activity.prs_opened));
    }
    if config.activity.issues_open {
        activity.push("alert-icon", format!("Issues Open: {}", snapshot.issues.open));
    }
    if config.activity.issue_comments {
        activity.push("message-icon", format!("Issue Comments: {}", snapshot.issues.comments));
    }

    let mut community = Panel {
        header: "Community Stats",
        x:      240,
        fields: Vec::new()
    };
    if config.community.organizations {
        community.push("building-icon", format!("Organizations: {}", snapshot.community.orgs));
    }
    if config.community.following {
        community.push("user-plus-icon", format!("Following: {}", profile.following));
    }
    if config.community.starred {
        community.push("star-outline-icon", format!("Starred: {}", snapshot.community.starred));
    }
    if config.community.watching {
        community.push("eye-icon", format!("Watching: {}", snapshot.community.watching));
    }

    let mut repository = Panel {
        header: "Repository Stats",
        x:      460,
        fields: Vec::new()
    };
    if config.repository.total_repos {
        repository.push("folder-icon", format!("Total Repos: {}", profile.public_repos));
    }
    if config.repository.license {
        repository.push("scale-icon", format!("License: {}", snapshot.repos.license));
    }
    if config.repository.releases {
        repository.push("rocket-icon", format!("Releases: {}", snapshot.repos.releases));
    }
    if config.repository.packages {
        repository.push("package-icon", format!("Packages: {}", snapshot.repos.packages));
    }
    if config.repository.disk_usage {
        repository.push(
            "database-icon",
            format!("Disk: {:.2} MB", snapshot.repos.disk_usage as f64 / 1024.0)
        );
    }

    let mut metadata = Panel {
        header: "Metadata",
        x:      680,
        fields: Vec::new()
    };
    if config.metadata.stargazers {
        metadata.push("star-icon", format!("Stargazers: {}", snapshot.repos.total_stars));
    }
    if config.metadata.forkers {
        metadata.push("fork-icon", format!("Forkers: {}", snapshot.repos.total_forks));
    }
    if config.metadata.watchers {
        metadata.push("eye-icon", format!("Watchers: {}", snapshot.repos.total_watchers));
    }

    vec![activity, community, repository, metadata]
}

impl Panel {
    fn push(&mut self, icon: &'static str, label: String) {
        self.fields.push(PanelField {
            icon,
            label
        });
    }
}

fn emit_panel(svg: &mut String, panel: &Panel) {
    if panel.fields.is_empty() {
        return;
    }

    let _ = writeln!(
        svg,
        "  <text x=\"{}\" y=\"{PANEL_HEADER_Y}\" font-family=\"Arial\" font-size=\"16\" font-weight=\"bold\" fill=\"{TEXT_COLOR}\">{}</text>",
        panel.x, panel.header
    );

    let mut y = PANEL_FIELD_START_Y;
    for field in &panel.fields {
        let _ = writeln!(svg, "  <use href=\"#{}\" x=\"{}\" y=\"{y}\"/>", field.icon, panel.x);
        let _ = writeln!(
            svg,
            "  <text x=\"{}\" y=\"{}\" font-family=\"Arial\" font-size=\"13\" fill=\"{TEXT_COLOR}\">{}</text>",
            panel.x + PANEL_TEXT_OFFSET,
            y + 10,
            escape_xml(&field.label)
        );
        y += PANEL_FIELD_STEP;
    }
}

fn escape_xml(value: &str) -> Cow<'_, str> {
    if value
        .chars()
        .any(|character| matches!(character, '&' | '<' | '>' | '\"' | '\''))
    {
        let mut escaped = String::with_capacity(value.len());
        for character in value.chars() {
            match character {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '\"' => escaped.push_str("&quot;"),
                '\'' => escaped.push_str("&apos;"),
                other => escaped.push(other)
            }
        }
        Cow::Owned(escaped)
    } else {
        Cow::Borrowed(value)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::{DateTime, TimeZone, Utc};

    use super::{escape_xml, render_card};
    use crate::{
        config::DisplayConfig,
        fetch::{IssueTotals, Profile},
        stats::{ActivityStats, CommunityStats, RepoStats, Snapshot}
    };

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
        .expect("profile should decode")
    }

    fn sample_snapshot() -> Snapshot {
        Snapshot {
            activity:            ActivityStats {
                commits:    6,
                pr_reviews: 2,
                prs_opened: 1
            },
            issues:              IssueTotals {
                open:     3,
                comments: 11
            },
            community:           CommunityStats {
                orgs:     2,
                starred:  40,
                watching: 5
            },
            repos:               RepoStats {
                license:        "mit".to_owned(),
                releases:       4,
                packages:       0,
                disk_usage:     2048,
                total_stars:    120,
                total_forks:    14,
                total_watchers: 120
            },
            daily_contributions: BTreeMap::from([("2025-03-10".to_owned(), 9)]),
            summary:             "9 contributions - Moderate activity this week".to_owned()
        }
    }

    fn fixed_today() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).single().expect("valid date")
    }

    #[test]
    fn full_card_contains_every_panel_header() {
        let svg = render_card(
            &sample_profile(),
            &sample_snapshot(),
            &DisplayConfig::default(),
            fixed_today()
        );

        assert!(svg.contains("Activity Stats"));
        assert!(svg.contains("Community Stats"));
        assert!(svg.contains("Repository Stats"));
        assert!(svg.contains("Metadata"));
        assert!(svg.contains("The Octocat"));
        assert!(svg.contains("Last 7 Days"));
        assert!(svg.contains("9 contributions - Moderate activity this week"));
    }

    #[test]
    fn disabling_every_field_omits_the_panel_header() {
        let mut config = DisplayConfig::default();
        config.metadata.stargazers = false;
        config.metadata.forkers = false;
        config.metadata.watchers = false;

        let svg = render_card(&sample_profile(), &sample_snapshot(), &config, fixed_today());

        assert!(!svg.contains(">Metadata</text>"));
        assert!(!svg.contains("Stargazers:"));
        assert!(svg.contains("Activity Stats"));
    }

    #[test]
    fn disabling_one_field_keeps_header_and_siblings() {
        let mut config = DisplayConfig::default();
        config.activity.pr_reviews = false;

        let svg = render_card(&sample_profile(), &sample_snapshot(), &config, fixed_today());

        assert!(svg.contains("Activity Stats"));
        assert!(!svg.contains("PR Reviews:"));
        assert!(svg.contains("Commits (7d): 6"));
        assert!(svg.contains("PRs Opened: 1"));
    }

    #[test]
    fn panel_columns_stay_fixed_when_fields_are_hidden() {
        let mut config = DisplayConfig::default();
        config.activity.commits = false;
        config.activity.pr_reviews = false;
        config.activity.prs_opened = false;
        config.activity.issues_open = false;
        config.activity.issue_comments = false;

        let svg = render_card(&sample_profile(), &sample_snapshot(), &config, fixed_today());

        // Sibling panels keep their static columns even with a panel gone.
        assert!(svg.contains("x=\"240\" y=\"190\""));
        assert!(svg.contains("x=\"460\" y=\"190\""));
        assert!(svg.contains("x=\"680\" y=\"190\""));
    }

    #[test]
    fn calendar_emits_seven_cells_with_tier_colors() {
        let svg = render_card(
            &sample_profile(),
            &sample_snapshot(),
            &DisplayConfig::default(),
            fixed_today()
        );

        assert_eq!(svg.matches("rx=\"3\"/>").count(), 7);
        // 2025-03-10 carried 9 contributions.
        assert!(svg.contains("#30a14e"));
        assert!(svg.contains(">Mon</text>"));
    }

    #[test]
    fn disabled_calendar_omits_header_and_cells() {
        let mut config = DisplayConfig::default();
        config.calendar.enabled = false;

        let svg = render_card(&sample_profile(), &sample_snapshot(), &config, fixed_today());

        assert!(!svg.contains("Last 7 Days"));
        assert_eq!(svg.matches("rx=\"3\"/>").count(), 0);
    }

    #[test]
    fn disk_usage_divides_by_1024_with_two_decimals() {
        let svg = render_card(
            &sample_profile(),
            &sample_snapshot(),
            &DisplayConfig::default(),
            fixed_today()
        );

        assert!(svg.contains("Disk: 2.00 MB"));
    }

    #[test]
    fn display_name_falls_back_to_login() {
        let profile: Profile = serde_json::from_str(
            r#"{"login": "octocat", "created_at": "2011-01-25T18:44:36Z"}"#
        )
        .expect("profile should decode");

        let svg = render_card(
            &profile,
            &sample_snapshot(),
            &DisplayConfig::default(),
            fixed_today()
        );

        assert!(svg.contains(">octocat</text>"));
        assert!(svg.contains("Joined: January 25, 2011"));
    }

    #[test]
    fn icon_defs_are_emitted_regardless_of_configuration() {
        let mut config = DisplayConfig::default();
        config.profile.name = false;
        config.calendar.enabled = false;

        let svg = render_card(&sample_profile(), &sample_snapshot(), &config, fixed_today());

        assert!(svg.contains("<g id=\"rocket-icon\">"));
        assert!(svg.contains("<g id=\"fork-icon\">"));
    }

    #[test]
    fn escape_xml_handles_all_special_characters() {
        let input = "&<>\"'normal";
        let result = escape_xml(input);
        assert_eq!(result, "&amp;&lt;&gt;&quot;&apos;normal");
    }

    #[test]
    fn dynamic_profile_content_is_escaped() {
        let profile: Profile = serde_json::from_str(
            r#"{"login": "octocat", "name": "ACME & <Partners>", "created_at": "2011-01-25T18:44:36Z"}"#
        )
        .expect("profile should decode");

        let svg = render_card(
            &profile,
            &sample_snapshot(),
            &DisplayConfig::default(),
            fixed_today()
        );

        assert!(svg.contains("ACME &amp; &lt;Partners&gt;"));
    }
}
