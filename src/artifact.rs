// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Change-detecting artifact sink.
//!
//! Output files are rewritten only when their content actually changed, so a
//! run that produced identical statistics leaves mtimes untouched and keeps
//! commit automation quiet.

use std::{fs, path::Path};

use tracing::info;

use crate::error::{Error, artifact_io_error};

/// Result of one persist attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersistOutcome {
    /// Whether the file on disk was rewritten.
    pub written: bool
}

/// Writes `content` to `path` unless the file already holds exactly that
/// content.
///
/// A missing or unreadable existing file counts as changed and triggers a
/// write; only the write itself can fail.
///
/// # Errors
///
/// Returns [`Error::ArtifactIo`] when writing the file fails.
pub fn persist(path: &Path, content: &str) -> Result<PersistOutcome, Error> {
    if let Ok(existing) = fs::read_to_string(path)
        && existing == content
    {
        info!(path = %path.display(), "artifact unchanged, skipping write");
        return Ok(PersistOutcome {
            written: false
        });
    }

    fs::write(path, content).map_err(|source| artifact_io_error(path, source))?;
    info!(path = %path.display(), bytes = content.len(), "artifact written");
    Ok(PersistOutcome {
        written: true
    })
}

/// Builds the README embed line pointing at the published card for `login`.
pub fn embed_reference(login: &str) -> String {
    format!(
        "<img src=\"https://raw.githubusercontent.com/{login}/{login}/main/github-stats.svg\" alt=\"GitHub Stats\" />\n"
    )
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::{embed_reference, persist};

    #[test]
    fn persist_creates_missing_file() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("card.svg");

        let outcome = persist(&path, "<svg/>").expect("persist should succeed");

        assert!(outcome.written);
        assert_eq!(fs::read_to_string(&path).expect("read back"), "<svg/>");
    }

    #[test]
    fn persist_skips_identical_content() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("card.svg");
        fs::write(&path, "<svg/>").expect("seed file");

        let outcome = persist(&path, "<svg/>").expect("persist should succeed");

        assert!(!outcome.written);
    }

    #[test]
    fn persist_rewrites_changed_content() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("card.svg");
        fs::write(&path, "<svg>old</svg>").expect("seed file");

        let outcome = persist(&path, "<svg>new</svg>").expect("persist should succeed");

        assert!(outcome.written);
        assert_eq!(fs::read_to_string(&path).expect("read back"), "<svg>new</svg>");
    }

    #[test]
    fn repeated_persist_writes_once() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("card.svg");

        let first = persist(&path, "<svg/>").expect("first persist");
        let second = persist(&path, "<svg/>").expect("second persist");

        assert!(first.written);
        assert!(!second.written);
    }

    #[test]
    fn persist_fails_on_unwritable_path() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("missing-dir").join("card.svg");

        let error = match persist(&path, "<svg/>") {
            Err(error) => error,
            Ok(_) => panic!("persist into a missing directory should fail")
        };

        assert!(error.to_display_string().contains("card.svg"));
    }

    #[test]
    fn embed_reference_targets_profile_repository() {
        let line = embed_reference("octocat");

        assert_eq!(
            line,
            "<img src=\"https://raw.githubusercontent.com/octocat/octocat/main/github-stats.svg\" alt=\"GitHub Stats\" />\n"
        );
    }
}
