// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Pagination helpers shared by every collection endpoint.
//!
//! Two access patterns cover the whole run: walking numbered pages until the
//! platform returns an empty one, and deriving a collection total from the
//! `Link` response header without enumerating items.

use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;

use crate::{api::ApiClient, error::Error};

/// Exact extraction pattern for the advertised last page number.
static LAST_PAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"page=(\d+)>; rel="last""#).expect("valid pattern"));

/// Approximates a collection total from one `per_page=1` request.
///
/// When the response advertises a last page through the `Link` header, that
/// page number is the total — an O(1) shortcut instead of walking the whole
/// collection. A missing or malformed header means the collection fits on a
/// single page, so the item count of the fetched page (0 or 1) is returned.
///
/// # Errors
///
/// Returns [`Error::Http`] for any non-2xx status; the run treats that as
/// fatal.
pub async fn count_via_pagination<C>(client: &C, endpoint: &str) -> Result<u64, Error>
where
    C: ApiClient
{
    let response = client.get(endpoint, &[("per_page", "1".to_owned())]).await?;

    if let Some(link) = response.link.as_deref()
        && let Some(total) = last_page_number(link)
    {
        return Ok(total);
    }

    let items: Vec<serde_json::Value> = response.json(endpoint)?;
    Ok(items.len() as u64)
}

fn last_page_number(link: &str) -> Option<u64> {
    LAST_PAGE.captures(link)?.get(1)?.as_str().parse().ok()
}

/// Accumulates items across numbered pages starting at 1.
///
/// The walk stops at the first empty page, at `max_pages` when a cap is
/// supplied, or as soon as `keep` rejects an item. The rejection path exists
/// for the time-bounded event fetch: events arrive newest first, so one item
/// older than the cutoff proves everything after it is stale too. Items
/// collected before the rejected one are returned in their original order;
/// the rejected item itself is discarded.
///
/// # Errors
///
/// Returns [`Error::Http`] for any non-2xx status and [`Error::Decode`] when
/// a page body does not match `T`.
pub async fn fetch_all_pages<C, T, P>(
    client: &C,
    endpoint: &str,
    params: &[(&str, String)],
    page_size: u32,
    max_pages: Option<u32>,
    mut keep: P
) -> Result<Vec<T>, Error>
where
    C: ApiClient,
    T: DeserializeOwned,
    P: FnMut(&T) -> bool
{
    let mut items = Vec::new();
    let mut page = 1u32;

    loop {
        if let Some(cap) = max_pages
            && page > cap
        {
            break;
        }

        let mut query: Vec<(&str, String)> = params.to_vec();
        query.push(("per_page", page_size.to_string()));
        query.push(("page", page.to_string()));

        let response = client.get(endpoint, &query).await?;
        let batch: Vec<T> = response.json(endpoint)?;
        if batch.is_empty() {
            break;
        }

        for item in batch {
            if !keep(&item) {
                return Ok(items);
            }
            items.push(item);
        }

        page += 1;
    }

    Ok(items)
}
