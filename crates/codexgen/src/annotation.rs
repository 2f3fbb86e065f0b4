// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Annotation resolver: wire key and temporal strategy of one field.

use crate::error::{GenerationError, Result};
use crate::formatter::{FormatterRef, FormatterRegistry};
use crate::model::{FieldSpec, TEMPORAL_FORMAT, WIRE_KEY};
use crate::naming;
use crate::pattern;

/// How a temporal value travels on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemporalStrategy {
    Iso8601,
    UnixSeconds,
    UnixMilliseconds,
    /// A named formatter built from a date pattern.
    Custom(FormatterRef),
}

impl TemporalStrategy {
    /// Expression evaluating to a `&impl TemporalCodec` in generated code.
    pub fn codec_expr(&self, runtime: &str) -> String {
        match self {
            Self::Iso8601 => format!("&::{runtime}::Iso8601"),
            Self::UnixSeconds => format!("&::{runtime}::UnixSeconds"),
            Self::UnixMilliseconds => format!("&::{runtime}::UnixMilliseconds"),
            Self::Custom(formatter) => format!("{}()", formatter.accessor),
        }
    }
}

/// Unregistered form of a `temporalFormat` annotation value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrategyRequest {
    Iso8601,
    UnixSeconds,
    UnixMilliseconds,
    Custom {
        pattern: String,
        /// Translated chrono format.
        format: String,
        /// Explicit `#name`, if any.
        name: Option<String>,
    },
}

/// Parse an annotation value (`iso8601`, `seconds`, `yyyy-MM-dd#day`, ...).
///
/// Returns the failure reason on error.
pub fn parse_strategy(value: &str) -> std::result::Result<StrategyRequest, String> {
    let trimmed = value.trim();
    match trimmed {
        "iso" | "iso8601" => return Ok(StrategyRequest::Iso8601),
        "seconds" | "unixSeconds" => return Ok(StrategyRequest::UnixSeconds),
        "ms" | "unixMilliseconds" => return Ok(StrategyRequest::UnixMilliseconds),
        _ => {}
    }

    let mut parts = trimmed.split('#');
    let pattern = parts.next().unwrap_or_default();
    let name = parts.next();
    if parts.next().is_some() {
        return Err("more than one `#` in pattern".to_string());
    }

    let name = match name {
        None => None,
        Some(name) => {
            let name = name.trim();
            if name.is_empty() {
                return Err("empty formatter name after `#`".to_string());
            }
            if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
                || !name.starts_with(|c: char| c.is_ascii_alphabetic())
            {
                return Err(format!("formatter name `{name}` is not an identifier"));
            }
            Some(name.to_string())
        }
    };

    let format = pattern::translate(pattern)?;
    Ok(StrategyRequest::Custom {
        pattern: pattern.to_string(),
        format,
        name,
    })
}

/// Wire key of `field`: the explicit `wireKey` annotation, else the identifier.
pub fn resolve_key(field: &FieldSpec) -> String {
    match field.annotation(WIRE_KEY) {
        Some(key) if !key.is_empty() => key.to_string(),
        _ => field.name.clone(),
    }
}

/// Temporal strategy of `field`, or `None` for fields that carry no instant.
///
/// A `temporalFormat` annotation on a non-temporal field is ignored with a
/// warning and never produces a transform. Custom patterns are registered in
/// `formatters`, which deduplicates them by formatter name.
pub fn resolve_temporal_strategy(
    owner: &str,
    field: &FieldSpec,
    formatters: &mut FormatterRegistry,
) -> Result<Option<TemporalStrategy>> {
    for key in field.annotations.keys() {
        if key != WIRE_KEY && key != TEMPORAL_FORMAT {
            tracing::debug!(owner, field = %field.name, annotation = %key, "ignoring unrecognized annotation");
        }
    }

    let annotation = field.annotation(TEMPORAL_FORMAT);

    if !field.declared_type.accepts_temporal_strategy() {
        if let Some(value) = annotation {
            tracing::warn!(
                owner,
                field = %field.name,
                ty = %field.declared_type,
                format = value,
                "temporal format on a non-temporal field is ignored"
            );
        }
        return Ok(None);
    }

    let Some(value) = annotation else {
        return Ok(Some(TemporalStrategy::Iso8601));
    };

    let request = parse_strategy(value).map_err(|reason| GenerationError::UnsupportedFormat {
        owner: owner.to_string(),
        field: field.name.clone(),
        value: value.to_string(),
        reason,
    })?;

    let strategy = match request {
        StrategyRequest::Iso8601 => TemporalStrategy::Iso8601,
        StrategyRequest::UnixSeconds => TemporalStrategy::UnixSeconds,
        StrategyRequest::UnixMilliseconds => TemporalStrategy::UnixMilliseconds,
        StrategyRequest::Custom {
            pattern,
            format,
            name,
        } => {
            let name = name.unwrap_or_else(|| naming::capitalize(&field.name));
            TemporalStrategy::Custom(formatters.request(&name, &pattern, &format)?)
        }
    };
    Ok(Some(strategy))
}
