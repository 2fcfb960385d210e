// ABOUTME: Cursor-based pagination primitives for Canvas list endpoints
// ABOUTME: Opaque continuation cursors, decoded pages and RFC 8288 Link header parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::constants::NEXT_RELATION;

/// Opaque continuation marker for the next page of a listing
///
/// Canvas hands out the next page as an absolute URL in the `Link` header.
/// The client never inspects it beyond checking its origin before following it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Cursor(String);

impl Cursor {
    /// Wrap a raw continuation value
    #[must_use]
    pub const fn from_string(raw: String) -> Self {
        Self(raw)
    }

    /// Raw continuation value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the cursor into its raw value
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl Display for Cursor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One page of a listing: ordered items and the continuation, if any
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Items in server order
    pub items: Vec<T>,
    /// Cursor of the following page, `None` on the last page
    pub next: Option<Cursor>,
}

impl<T> Page<T> {
    /// Create a page
    #[must_use]
    pub const fn new(items: Vec<T>, next: Option<Cursor>) -> Self {
        Self { items, next }
    }

    /// Whether this page ends the listing
    #[must_use]
    pub const fn is_last(&self) -> bool {
        self.next.is_none()
    }
}

/// One entry of a `Link` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkEntry {
    /// Target URI between the angle brackets
    pub target: String,
    /// Relation types from the `rel` parameter
    pub relations: Vec<String>,
}

impl LinkEntry {
    /// Whether the entry carries the given relation (case-insensitive)
    #[must_use]
    pub fn has_relation(&self, relation: &str) -> bool {
        self.relations
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(relation))
    }
}

/// Parse an RFC 8288 `Link` header value
///
/// Malformed entries are skipped rather than failing the whole header.
#[must_use]
pub fn parse_link_header(value: &str) -> Vec<LinkEntry> {
    split_link_values(value)
        .into_iter()
        .filter_map(parse_link_value)
        .collect()
}

/// Continuation cursor named by the `rel="next"` entry of a `Link` header
#[must_use]
pub fn next_cursor(link_header: &str) -> Option<Cursor> {
    parse_link_header(link_header)
        .into_iter()
        .find(|entry| entry.has_relation(NEXT_RELATION))
        .map(|entry| Cursor::from_string(entry.target))
}

// Commas inside `<...>` or quoted strings do not separate entries
fn split_link_values(value: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut in_target = false;
    let mut in_quotes = false;
    let mut start = 0;

    for (index, ch) in value.char_indices() {
        match ch {
            '<' if !in_quotes => in_target = true,
            '>' if !in_quotes => in_target = false,
            '"' if !in_target => in_quotes = !in_quotes,
            ',' if !in_target && !in_quotes => {
                parts.push(&value[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    parts.push(&value[start..]);
    parts
}

fn parse_link_value(raw: &str) -> Option<LinkEntry> {
    let raw = raw.trim();
    let rest = raw.strip_prefix('<')?;
    let (target, params) = rest.split_once('>')?;

    let relations = params
        .split(';')
        .filter_map(|param| {
            let (name, value) = param.trim().split_once('=')?;
            name.trim()
                .eq_ignore_ascii_case("rel")
                .then(|| value.trim().trim_matches('"').to_owned())
        })
        .flat_map(|value| {
            value
                .split_whitespace()
                .map(str::to_owned)
                .collect::<Vec<_>>()
        })
        .collect();

    Some(LinkEntry {
        target: target.trim().to_owned(),
        relations,
    })
}
