//! Recorded host-event traces.
//!
//! A trace is JSON lines, one host event per line with an optional `at`
//! (milliseconds on the trace clock). Pointer events default to their own
//! timestamp; other events without `at` happen at the previous record's time.
//! Blank lines and lines starting with `#` are skipped.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::ui::events::HostEvent;
use crate::ui::shell::{Shell, ShellEffect};
use crate::ui::timer::Millis;

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("Failed to read trace '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid trace record at line {line}: {source}")]
    ParseError {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Trace record at line {line} goes back in time ({at} < {previous})")]
    OutOfOrder {
        line: usize,
        at: Millis,
        previous: Millis,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TraceRecord {
    /// Source line, for error reporting.
    #[serde(skip)]
    pub line: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at: Option<Millis>,
    #[serde(flatten)]
    pub event: HostEvent,
}

/// One effect, stamped with the time it was produced.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EffectRecord {
    pub at: Millis,
    #[serde(flatten)]
    pub effect: ShellEffect,
}

pub fn read_trace(path: &Path) -> Result<Vec<TraceRecord>, TraceError> {
    let text = fs::read_to_string(path).map_err(|source| TraceError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    parse_trace(&text)
}

pub fn parse_trace(text: &str) -> Result<Vec<TraceRecord>, TraceError> {
    text.lines()
        .enumerate()
        .map(|(index, raw)| (index + 1, raw.trim()))
        .filter(|(_, raw)| !raw.is_empty() && !raw.starts_with('#'))
        .map(|(line, raw)| {
            serde_json::from_str::<TraceRecord>(raw)
                .map(|record| TraceRecord { line, ..record })
                .map_err(|source| TraceError::ParseError { line, source })
        })
        .collect()
}

/// Run `records` through `shell` on the trace clock, then let every pending
/// timer fire. Timer effects carry their own deadline as timestamp.
pub fn replay(
    shell: &mut Shell,
    records: impl IntoIterator<Item = TraceRecord>,
) -> Result<Vec<EffectRecord>, TraceError> {
    let mut out = Vec::new();
    let mut clock: Millis = 0;

    for record in records {
        let at = record
            .at
            .or_else(|| record.event.timestamp())
            .unwrap_or(clock);
        if at < clock {
            return Err(TraceError::OutOfOrder {
                line: record.line,
                at,
                previous: clock,
            });
        }
        fire_until(shell, at, false, &mut out);
        clock = at;
        stamp(&mut out, at, shell.handle(record.event.stamped(at), at));
    }

    fire_until(shell, Millis::MAX, true, &mut out);
    debug!(effects = out.len(), "trace replayed");
    Ok(out)
}

fn fire_until(shell: &mut Shell, limit: Millis, inclusive: bool, out: &mut Vec<EffectRecord>) {
    while let Some(deadline) = shell
        .next_deadline()
        .filter(|deadline| *deadline < limit || (inclusive && *deadline == limit))
    {
        stamp(out, deadline, shell.advance(deadline));
    }
}

fn stamp(out: &mut Vec<EffectRecord>, at: Millis, effects: Vec<ShellEffect>) {
    out.extend(effects.into_iter().map(|effect| EffectRecord { at, effect }));
}
