// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Narrow query operations, one per raw data slice.
//!
//! A [`Session`] resolves the authenticated login once and is then threaded
//! through the run; every operation issues sequential GETs through the
//! session's client and fails the whole run on the first non-2xx response.
//! There is no partial-success handling and no retry.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    api::ApiClient,
    error::Error,
    page::{count_via_pagination, fetch_all_pages}
};

/// Number of event pages the time-bounded fetch will ever request.
const EVENT_PAGE_CAP: u32 = 10;

/// Page size for full-collection walks.
const WALK_PAGE_SIZE: u32 = 100;

/// Public user record consumed by the card header.
#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    /// Account login.
    pub login:        String,
    /// Display name; falls back to the login when absent.
    #[serde(default)]
    pub name:         Option<String>,
    /// Whether the account advertises availability for hire.
    #[serde(default)]
    pub hireable:     Option<bool>,
    /// Account creation timestamp.
    pub created_at:   DateTime<Utc>,
    /// Follower count.
    #[serde(default)]
    pub followers:    u64,
    /// Following count.
    #[serde(default)]
    pub following:    u64,
    /// Public repository count.
    #[serde(default)]
    pub public_repos: u64
}

/// Declared license of a repository.
#[derive(Debug, Clone, Deserialize)]
pub struct License {
    /// SPDX-ish license key, e.g. `mit`.
    pub key: String
}

/// Per-repository fields consumed by the aggregation.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoSummary {
    /// Declared license, when the repository has one.
    #[serde(default)]
    pub license:          Option<License>,
    /// Stargazer count.
    #[serde(default)]
    pub stargazers_count: u64,
    /// Fork count.
    #[serde(default)]
    pub forks_count:      u64,
    /// Watcher count.
    #[serde(default)]
    pub watchers_count:   u64,
    /// Platform-reported size.
    #[serde(default)]
    pub size:             u64,
    /// Releases endpoint reference, carrying a `{/id}` template suffix.
    #[serde(default)]
    pub releases_url:     String
}

impl RepoSummary {
    /// Resolves the releases collection URL by stripping the `{/id}` template
    /// suffix.
    pub fn releases_endpoint(&self) -> String {
        self.releases_url.replace("{/id}", "")
    }
}

/// One public activity record.
#[derive(Debug, Clone, Deserialize)]
pub struct Event {
    /// Platform event type tag, e.g. `PushEvent`.
    #[serde(rename = "type")]
    pub kind:       String,
    /// Event timestamp; collections arrive newest first.
    pub created_at: DateTime<Utc>,
    /// Optional payload; only the PR action is consumed.
    #[serde(default)]
    pub payload:    EventPayload
}

/// Subset of the event payload the aggregation reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventPayload {
    /// Action tag for pull-request events, e.g. `opened`.
    #[serde(default)]
    pub action: Option<String>
}

/// Organization membership record.
#[derive(Debug, Clone, Deserialize)]
pub struct Organization {
    /// Organization login.
    pub login: String
}

/// Server-reported totals from the two issue search queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IssueTotals {
    /// Open issues authored by the user.
    pub open:     u64,
    /// Issues the user has commented on.
    pub comments: u64
}

#[derive(Debug, Deserialize)]
struct SearchTotals {
    #[serde(default)]
    total_count: u64
}

#[derive(Debug, Deserialize)]
struct AuthenticatedUser {
    login: String
}

/// Run context binding a client to the authenticated identity.
///
/// Constructed once per run and passed by reference everywhere a query is
/// made; there is no ambient global state.
#[derive(Debug)]
pub struct Session<C> {
    client: C,
    login:  String
}

impl<C> Session<C>
where
    C: ApiClient
{
    /// Resolves the authenticated login via `GET /user` and binds it to the
    /// client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] when the token is rejected; this is the first
    /// request of every run, so an invalid token aborts before any other
    /// work happens.
    pub async fn authenticate(client: C) -> Result<Self, Error> {
        let response = client.get("/user", &[]).await?;
        let user: AuthenticatedUser = response.json("/user")?;
        info!("authenticated as {}", user.login);

        Ok(Self {
            client,
            login: user.login
        })
    }

    /// Login of the authenticated user.
    pub fn login(&self) -> &str {
        &self.login
    }

    /// Client handle for the tolerated releases probe.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Fetches the full public profile record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] on any non-2xx response.
    pub async fn profile(&self) -> Result<Profile, Error> {
        let endpoint = format!("/users/{}", self.login);
        debug!("fetching profile from {endpoint}");
        let response = self.client.get(&endpoint, &[]).await?;
        response.json(&endpoint)
    }

    /// Fetches every repository owned (not collaborated) by the user.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] on any non-2xx response.
    pub async fn repositories(&self) -> Result<Vec<RepoSummary>, Error> {
        debug!("fetching owned repositories");
        let params = [("affiliation", "owner".to_owned())];
        fetch_all_pages(&self.client, "/user/repos", &params, WALK_PAGE_SIZE, None, |_| true).await
    }

    /// Fetches public events within the trailing `days`-day cutoff window.
    ///
    /// At most ten pages are requested; because events arrive newest first,
    /// the walk stops entirely at the first event older than the cutoff.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] on any non-2xx response.
    pub async fn events(&self, days: i64) -> Result<Vec<Event>, Error> {
        let cutoff = Utc::now() - Duration::days(days);
        self.events_since(cutoff).await
    }

    /// Fetches public events created at or after `cutoff`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] on any non-2xx response.
    pub async fn events_since(&self, cutoff: DateTime<Utc>) -> Result<Vec<Event>, Error> {
        let endpoint = format!("/users/{}/events", self.login);
        debug!("fetching events since {cutoff} from {endpoint}");
        fetch_all_pages(
            &self.client,
            &endpoint,
            &[],
            WALK_PAGE_SIZE,
            Some(EVENT_PAGE_CAP),
            |event: &Event| event.created_at >= cutoff
        )
        .await
    }

    /// Fetches organization memberships in a single unpaginated request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] on any non-2xx response.
    pub async fn organizations(&self) -> Result<Vec<Organization>, Error> {
        debug!("fetching organizations");
        let response = self.client.get("/user/orgs", &[]).await?;
        response.json("/user/orgs")
    }

    /// Approximates the starred-repository count from pagination metadata.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] on any non-2xx response.
    pub async fn starred_count(&self) -> Result<u64, Error> {
        let endpoint = format!("/users/{}/starred", self.login);
        count_via_pagination(&self.client, &endpoint).await
    }

    /// Approximates the watched-repository count from pagination metadata.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] on any non-2xx response.
    pub async fn watching_count(&self) -> Result<u64, Error> {
        let endpoint = format!("/users/{}/subscriptions", self.login);
        count_via_pagination(&self.client, &endpoint).await
    }

    /// Approximates the gist count from pagination metadata.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] on any non-2xx response.
    pub async fn gists_count(&self) -> Result<u64, Error> {
        let endpoint = format!("/users/{}/gists", self.login);
        count_via_pagination(&self.client, &endpoint).await
    }

    /// Fetches the two issue search totals in independent queries.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] when either search request fails.
    pub async fn issue_stats(&self) -> Result<IssueTotals, Error> {
        debug!("fetching issue search totals");
        let open = self
            .search_total("/search/issues", format!("author:{} type:issue is:open", self.login))
            .await?;
        let comments =
            self.search_total("/search/issues", format!("commenter:{}", self.login)).await?;

        Ok(IssueTotals {
            open,
            comments
        })
    }

    /// Fetches the server-reported count of repositories the user has
    /// committed to.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] on any non-2xx response.
    pub async fn contributed_repo_count(&self) -> Result<u64, Error> {
        self.search_total("/search/commits", format!("author:{}", self.login)).await
    }

    async fn search_total(&self, endpoint: &str, query: String) -> Result<u64, Error> {
        let params = [("q", query), ("per_page", "1".to_owned())];
        let response = self.client.get(endpoint, &params).await?;
        let totals: SearchTotals = response.json(endpoint)?;
        Ok(totals.total_count)
    }
}
