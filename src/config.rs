// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Display configuration controlling which card fields are rendered.
//!
//! The document is a JSON object with six flat boolean groups. Every field
//! defaults to `true`, both when the key is absent and when the whole file is
//! missing, so the zero-configuration run renders the full card. The
//! structure is typed and validated once at load time; nothing downstream
//! performs defaulted lookups.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{self, Error};

fn enabled() -> bool {
    true
}

/// Field-visibility matrix loaded once at startup and never mutated.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Profile header block toggles.
    pub profile:    ProfileToggles,
    /// Trailing-week calendar toggle.
    pub calendar:   CalendarToggles,
    /// Activity panel toggles.
    #[serde(rename = "activity_stats")]
    pub activity:   ActivityToggles,
    /// Community panel toggles.
    #[serde(rename = "community_stats")]
    pub community:  CommunityToggles,
    /// Repository panel toggles.
    #[serde(rename = "repository_stats")]
    pub repository: RepositoryToggles,
    /// Metadata panel toggles.
    pub metadata:   MetadataToggles
}

/// Profile header block toggles.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProfileToggles {
    /// Display name line.
    pub name:               bool,
    /// Account creation date line.
    pub joined_date:        bool,
    /// Follower count line.
    pub followers:          bool,
    /// Hireable flag line.
    pub available_for_hire: bool
}

/// Trailing-week calendar toggle.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct CalendarToggles {
    /// Calendar header, cells and day labels.
    pub enabled: bool
}

/// Activity panel toggles.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ActivityToggles {
    /// Commit count field.
    pub commits:        bool,
    /// PR review count field.
    pub pr_reviews:     bool,
    /// Opened-PR count field.
    pub prs_opened:     bool,
    /// Open issue count field.
    pub issues_open:    bool,
    /// Issue comment count field.
    pub issue_comments: bool
}

/// Community panel toggles.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct CommunityToggles {
    /// Organization count field.
    pub organizations: bool,
    /// Following count field.
    pub following:     bool,
    /// Starred count field.
    pub starred:       bool,
    /// Watching count field.
    pub watching:      bool
}

/// Repository panel toggles.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct RepositoryToggles {
    /// Public repository count field.
    pub total_repos: bool,
    /// License mode field.
    pub license:     bool,
    /// Release count field.
    pub releases:    bool,
    /// Package count field.
    pub packages:    bool,
    /// Disk usage field.
    pub disk_usage:  bool
}

/// Metadata panel toggles.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct MetadataToggles {
    /// Total stargazers field.
    pub stargazers: bool,
    /// Total forks field.
    pub forkers:    bool,
    /// Total watchers field.
    pub watchers:   bool
}

impl Default for ProfileToggles {
    fn default() -> Self {
        Self {
            name:               enabled(),
            joined_date:        enabled(),
            followers:          enabled(),
            available_for_hire: enabled()
        }
    }
}

impl Default for CalendarToggles {
    fn default() -> Self {
        Self {
            enabled: enabled()
        }
    }
}

impl Default for ActivityToggles {
    fn default() -> Self {
        Self {
            commits:        enabled(),
            pr_reviews:     enabled(),
            prs_opened:     enabled(),
            issues_open:    enabled(),
            issue_comments: enabled()
        }
    }
}

impl Default for CommunityToggles {
    fn default() -> Self {
        Self {
            organizations: enabled(),
            following:     enabled(),
            starred:       enabled(),
            watching:      enabled()
        }
    }
}

impl Default for RepositoryToggles {
    fn default() -> Self {
        Self {
            total_repos: enabled(),
            license:     enabled(),
            releases:    enabled(),
            packages:    enabled(),
            disk_usage:  enabled()
        }
    }
}

impl Default for MetadataToggles {
    fn default() -> Self {
        Self {
            stargazers: enabled(),
            forkers:    enabled(),
            watchers:   enabled()
        }
    }
}

/// Loads the display configuration from `path`.
///
/// A missing file is not an error: the built-in default (everything enabled)
/// is returned instead. A malformed file is fatal.
///
/// # Errors
///
/// Returns [`Error::ConfigIo`] when the file exists but cannot be read and
/// [`Error::ConfigParse`] when it is not valid JSON for the documented
/// shape.
pub fn load_display_config(path: &Path) -> Result<DisplayConfig, Error> {
    if !path.exists() {
        debug!("no configuration at {}, using built-in defaults", path.display());
        return Ok(DisplayConfig::default());
    }

    let document = fs::read_to_string(path).map_err(|source| error::config_io_error(path, source))?;
    parse_display_config(&document)
}

/// Parses a display configuration document.
///
/// # Errors
///
/// Returns [`Error::ConfigParse`] when the document is not valid JSON for
/// the documented shape.
pub fn parse_display_config(document: &str) -> Result<DisplayConfig, Error> {
    let config = serde_json::from_str(document)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::{DisplayConfig, load_display_config, parse_display_config};
    use crate::error::Error;

    #[test]
    fn default_enables_every_field() {
        let config = DisplayConfig::default();
        assert!(config.profile.name);
        assert!(config.calendar.enabled);
        assert!(config.activity.issue_comments);
        assert!(config.community.watching);
        assert!(config.repository.disk_usage);
        assert!(config.metadata.watchers);
    }

    #[test]
    fn absent_keys_default_to_enabled() {
        let config = parse_display_config(r#"{"activity_stats": {"commits": false}}"#)
            .expect("partial document should parse");

        assert!(!config.activity.commits);
        assert!(config.activity.pr_reviews);
        assert!(config.profile.name);
        assert_eq!(config.metadata, DisplayConfig::default().metadata);
    }

    #[test]
    fn full_document_round_trips() {
        let config = DisplayConfig::default();
        let json = serde_json::to_string(&config).expect("serialization should succeed");
        assert!(json.contains("activity_stats"));
        assert!(json.contains("repository_stats"));

        let parsed = parse_display_config(&json).expect("round trip should parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn malformed_document_is_fatal() {
        let error = parse_display_config("{ not json").expect_err("expected parse failure");
        assert!(matches!(error, Error::ConfigParse { .. }));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempdir().expect("failed to create tempdir");
        let config = load_display_config(&dir.path().join("absent.json"))
            .expect("missing file should not be an error");
        assert_eq!(config, DisplayConfig::default());
    }

    #[test]
    fn existing_file_is_loaded() {
        let dir = tempdir().expect("failed to create tempdir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"calendar": {"enabled": false}}"#)
            .expect("failed to write config");

        let config = load_display_config(&path).expect("file should load");
        assert!(!config.calendar.enabled);
        assert!(config.profile.followers);
    }
}
