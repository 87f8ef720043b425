// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Payload unwrap adapter.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::ParseError;
use crate::state::DeviceRecord;
use crate::types::DeviceKind;

/// Roster files write offsets without a colon (`+0000`).
const ROSTER_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

/// Normalises a list payload into device records.
///
/// # Errors
///
/// Returns `ParseError::UnexpectedFormat` if the payload is not a list or an
/// object, and `ParseError::MissingField` if a record has no name.
pub fn unwrap_records(kind: DeviceKind, payload: &Value) -> Result<Vec<DeviceRecord>, ParseError> {
    entries(payload)?
        .into_iter()
        .map(|(key, value)| parse_record(kind, key, record_body(value)))
        .collect()
}

/// Splits a payload into `(dictionary key, element)` pairs.
pub(crate) fn entries(payload: &Value) -> Result<Vec<(Option<&str>, &Value)>, ParseError> {
    match payload {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => Ok(items.iter().map(|item| (None, item)).collect()),
        Value::Object(map) => {
            for key in ["data", "items"] {
                if let Some(inner @ Value::Array(_)) = map.get(key) {
                    return entries(inner);
                }
            }
            if map.contains_key("type") && map.get("data").is_some_and(Value::is_object) {
                return Ok(vec![(None, payload)]);
            }
            Ok(map.iter().map(|(key, item)| (Some(key.as_str()), item)).collect())
        }
        other => Err(ParseError::UnexpectedFormat(format!(
            "expected a list of records, got {}",
            json_type_name(other)
        ))),
    }
}

/// Strips a `{"type": ..., "data": {...}}` envelope.
pub(crate) fn record_body(value: &Value) -> &Value {
    match value.get("data") {
        Some(inner) if inner.is_object() => inner,
        _ => value,
    }
}

fn parse_record(
    kind: DeviceKind,
    key: Option<&str>,
    body: &Value,
) -> Result<DeviceRecord, ParseError> {
    if !body.is_object() {
        return Err(ParseError::UnexpectedFormat(format!(
            "expected a record object, got {}",
            json_type_name(body)
        )));
    }

    let identifier = string_field(body, "name")
        .or_else(|| string_field(body, "id"))
        .or(key)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ParseError::MissingField("name".to_string()))?;

    Ok(DeviceRecord::new(kind, identifier)
        .with_display_name(string_field(body, "userName").unwrap_or_default())
        .with_comment(string_field(body, "comment").unwrap_or_default())
        .with_raw_state(integer_field(body, "state").and_then(|n| i32::try_from(n).ok()))
        .with_inverted(bool_field(body, "inverted"))
        .with_address(integer_field(body, "address").and_then(|n| u32::try_from(n).ok()))
        .with_date_modified(string_field(body, "dateModified").and_then(parse_date)))
}

fn string_field<'a>(body: &'a Value, field: &str) -> Option<&'a str> {
    body.get(field).and_then(Value::as_str)
}

/// Reads a number that may also arrive as a numeric string.
fn integer_field(body: &Value, field: &str) -> Option<i64> {
    match body.get(field)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn bool_field(body: &Value, field: &str) -> bool {
    match body.get(field) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(text)
        .or_else(|_| DateTime::parse_from_str(text, ROSTER_DATE_FORMAT));
    match parsed {
        Ok(date) => Some(date.with_timezone(&Utc)),
        Err(err) => {
            tracing::debug!(date = text, error = %err, "Ignoring unparseable date");
            None
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
