// ABOUTME: Domain factory turning decoded wire records into immutable domain objects
// ABOUTME: Shared decoding helpers for nullable lists and enum tokens
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Domain Factory
//!
//! Every public resource type implements [`FromWire`]: it names a private
//! `serde` wire record and converts it into the domain object. The
//! [`DomainFactory`] drives that conversion for single records and lazy
//! streams, and hands each object a [`WeakContext`] so it can issue
//! follow-up calls without owning the context.
//!
//! Decoding rules shared by all records:
//!
//! - nullable wire fields become `Option`,
//! - list fields that are absent or `null` become an empty `Vec` (see [`empty_if_null`]),
//! - enum tokens go through [`WireEnum::parse_token`] unless the field tolerates unknown tokens,
//! - polymorphic records resolve their discriminant once, into an enum variant.

use canvas_core::{CanvasError, CanvasResult, WireEnum};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

use crate::context::{CanvasContext, WeakContext};
use crate::stream::{stream_pages, ItemStream, StreamConfig};
use crate::transport::ApiRequest;

/// Conversion from a wire record into a domain object
pub trait FromWire: Sized {
    /// Wire record as decoded from JSON
    type Wire: DeserializeOwned;

    /// Record name used in diagnostics
    const RECORD: &'static str;

    /// Build the domain object
    ///
    /// # Errors
    ///
    /// Returns `Communication` for undeclared enum tokens and `BadApiState`
    /// for records that break a documented invariant
    fn from_wire(wire: Self::Wire, context: &WeakContext) -> CanvasResult<Self>;
}

/// Builds domain objects bound to one context
#[derive(Debug, Clone, Default)]
pub struct DomainFactory {
    context: WeakContext,
}

impl DomainFactory {
    /// Factory whose objects can call back into `context`
    #[must_use]
    pub fn new(context: &CanvasContext) -> Self {
        Self {
            context: context.downgrade(),
        }
    }

    /// Factory whose objects have no follow-up capability
    #[must_use]
    pub fn detached() -> Self {
        Self::default()
    }

    /// Build one domain object from a decoded JSON value
    ///
    /// # Errors
    ///
    /// Returns `MalformedPayload` if the value does not match the wire record,
    /// or whatever [`FromWire::from_wire`] reports
    pub fn build<D: FromWire>(&self, value: Value) -> CanvasResult<D> {
        let wire: D::Wire =
            serde_json::from_value(value).map_err(|e| CanvasError::malformed(D::RECORD, e))?;
        D::from_wire(wire, &self.context)
    }

    /// Lazily stream a listing as domain objects
    #[must_use]
    pub fn stream<D>(
        context: &CanvasContext,
        request: ApiRequest,
        config: StreamConfig,
    ) -> ItemStream<D>
    where
        D: FromWire + Send + 'static,
    {
        let factory = Self::new(context);
        stream_pages(context.clone(), request, config, D::RECORD, move |record| {
            factory.build::<D>(record)
        })
    }

    /// Send a request and build the single object it returns
    ///
    /// # Errors
    ///
    /// Returns the transport failure or the decode failure
    pub async fn fetch<D: FromWire>(context: &CanvasContext, request: ApiRequest) -> CanvasResult<D> {
        let response = context.send(request).await?;
        Self::new(context).build(response.body)
    }
}

/// Deserialize a list that may be absent or `null` into a possibly empty `Vec`
///
/// Use together with `#[serde(default)]`.
///
/// # Errors
///
/// Propagates element decoding errors
pub fn empty_if_null<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Resolve an optional enum token, failing on undeclared values
///
/// # Errors
///
/// Returns `UndeclaredEnumValue` for tokens outside the table
pub fn parse_optional<E: WireEnum>(token: Option<&str>) -> CanvasResult<Option<E>> {
    token.map(E::parse_token).transpose()
}

/// Resolve a list of enum tokens, failing on the first undeclared value
///
/// # Errors
///
/// Returns `UndeclaredEnumValue` for tokens outside the table
pub fn parse_all<E: WireEnum>(tokens: &[String]) -> CanvasResult<Vec<E>> {
    tokens.iter().map(|token| E::parse_token(token)).collect()
}

/// Resolve an enum token on a field that tolerates unknown values
///
/// Unknown tokens are logged and mapped to `None`.
#[must_use]
pub fn tolerate_unknown<E: WireEnum>(record: &str, token: Option<&str>) -> Option<E> {
    let token = token?;
    let resolved = E::from_token(token);
    if resolved.is_none() {
        warn!(
            record,
            enumeration = E::ENUMERATION,
            token,
            "ignoring undeclared enumeration token"
        );
    }
    resolved
}
