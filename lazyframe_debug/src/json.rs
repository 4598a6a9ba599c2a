// Copyright 2026 the Lazyframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON export of recorded events.
//!
//! [`export`] writes a slice of [`RecordedEvent`]s as one JSON array, one
//! object per event, tagged by `"type"`. The output loads directly into
//! `jq` or a notebook for post-mortem analysis.

use std::io::{self, Write};

use serde_json::{Value, json};

use crate::recorder::RecordedEvent;

/// Converts one event into its JSON object.
#[must_use]
pub fn to_value(event: &RecordedEvent) -> Value {
    match event {
        RecordedEvent::Log {
            level,
            kind,
            uuid,
            message,
        } => json!({
            "type": "log",
            "level": level.as_str(),
            "component": kind.component(),
            "uuid": uuid,
            "message": message,
        }),
        RecordedEvent::Transition {
            kind,
            uuid,
            from,
            to,
        } => json!({
            "type": "transition",
            "component": kind.component(),
            "uuid": uuid,
            "from": from.to_string(),
            "to": to.to_string(),
        }),
        RecordedEvent::Recheck {
            kind,
            uuid,
            cause,
            visible,
            outcome,
        } => json!({
            "type": "recheck",
            "component": kind.component(),
            "uuid": uuid,
            "cause": cause.as_str(),
            "visible": visible,
            "outcome": outcome.as_str(),
        }),
    }
}

/// Writes `events` to `writer` as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns any I/O error from `writer`.
pub fn export(events: &[RecordedEvent], mut writer: impl Write) -> io::Result<()> {
    let array = Value::Array(events.iter().map(to_value).collect());
    serde_json::to_writer_pretty(&mut writer, &array)?;
    writeln!(writer)
}
