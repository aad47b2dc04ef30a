#![allow(non_shorthand_field_patterns)]
#![doc = "Error handling primitives shared across the stats generator."]
// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! The derive emitted by [`masterror::Error`] expands pattern matches that
//! trigger the `non_shorthand_field_patterns` lint. The lint is disabled for
//! the module to keep the generated implementations warning-free while still
//! exposing a thoroughly documented error surface for library consumers.

use std::path::{Path, PathBuf};

/// Unified error type covering the fetch pipeline, configuration loading and
/// artifact persistence.
///
/// Any [`Error::Http`] or [`Error::Transport`] raised outside the tolerated
/// releases probe aborts the run before any artifact is written; there is no
/// retry or partial-result path.
#[derive(Debug, masterror::Error)]
pub enum Error {
    /// Wraps I/O errors that occur while reading the display configuration.
    #[error("failed to read configuration from {path:?}: {source}")]
    ConfigIo {
        /// Location of the configuration file.
        path:   PathBuf,
        /// Underlying I/O error.
        source: std::io::Error
    },
    /// Wraps JSON decoding errors for the display configuration.
    #[error("failed to parse configuration: {source}")]
    ConfigParse {
        /// Source decoding error from serde_json.
        source: serde_json::Error
    },
    /// Returned when a required API endpoint answers with a non-2xx status.
    #[error("GitHub API request to {endpoint} failed with status {status}")]
    Http {
        /// Endpoint path of the failing request.
        endpoint: String,
        /// HTTP status code reported by the platform.
        status:   u16
    },
    /// Connection-level failures before a status code is available.
    #[error("transport error: {message}")]
    Transport {
        /// Human readable description of the transport failure.
        message: String
    },
    /// Wraps body decoding errors for a successful API response.
    #[error("failed to decode response from {endpoint}: {source}")]
    Decode {
        /// Endpoint path whose body could not be decoded.
        endpoint: String,
        /// Underlying deserialization error.
        source:   serde_json::Error
    },
    /// Wraps I/O errors that occur while persisting output artifacts.
    #[error("failed to persist artifact at {path:?}: {source}")]
    ArtifactIo {
        /// Location of the artifact being written.
        path:   PathBuf,
        /// Underlying I/O error reported by the operating system.
        source: std::io::Error
    },
    /// Returned when inputs violate invariants before any request is made.
    #[error("invalid input: {message}")]
    Validation {
        /// Human readable message describing the validation problem.
        message: String
    }
}

impl Error {
    /// Constructs a validation error from the provided displayable value.
    ///
    /// # Parameters
    ///
    /// * `message` - Human-readable description of the validation failure.
    pub fn validation<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Validation {
            message: message.into()
        }
    }

    /// Constructs a transport error from the provided displayable value.
    ///
    /// # Parameters
    ///
    /// * `message` - Human-readable description of the transport failure.
    pub fn transport<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Transport {
            message: message.into()
        }
    }

    /// Constructs an [`Error::Http`] for a non-2xx response.
    ///
    /// # Parameters
    ///
    /// * `endpoint` - Endpoint path of the failing request.
    /// * `status` - HTTP status code reported by the platform.
    pub fn http<E>(endpoint: E, status: u16) -> Self
    where
        E: Into<String>
    {
        Self::Http {
            endpoint: endpoint.into(),
            status
        }
    }

    /// Constructs an [`Error::Decode`] for an undecodable response body.
    ///
    /// # Parameters
    ///
    /// * `endpoint` - Endpoint path whose body could not be decoded.
    /// * `source` - Underlying deserialization error.
    pub fn decode<E>(endpoint: E, source: serde_json::Error) -> Self
    where
        E: Into<String>
    {
        Self::Decode {
            endpoint: endpoint.into(),
            source
        }
    }

    /// Formats the error for diagnostics without the variant name.
    ///
    /// This method is primarily intended for CLI contexts where the variant
    /// name does not add value to end users. The returned string matches the
    /// [`std::fmt::Display`] implementation.
    pub fn to_display_string(&self) -> String {
        format!("{self}")
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Self::ConfigParse {
            source
        }
    }
}

/// Creates an [`Error::ConfigIo`] variant capturing the failing path and
/// source.
///
/// # Parameters
///
/// * `path` - Location of the configuration file that triggered the error.
/// * `source` - I/O error reported by the operating system.
pub fn config_io_error(path: &Path, source: std::io::Error) -> Error {
    Error::ConfigIo {
        path: path.to_path_buf(),
        source
    }
}

/// Creates an [`Error::ArtifactIo`] variant capturing the failing path and
/// source.
///
/// # Parameters
///
/// * `path` - Location of the artifact that triggered the error.
/// * `source` - I/O error reported by the operating system.
pub fn artifact_io_error(path: &Path, source: std::io::Error) -> Error {
    Error::ArtifactIo {
        path: path.to_path_buf(),
        source
    }
}
