//! Tooltip payloads serialized as single-line JSON.
//!
//! The output uses `", "` between members and `": "` after keys, so a
//! tooltip reads `{"owner": "ARM1", "role": "", "description": ""}`.

use std::io;

use serde::Serialize;
use serde_json::ser::Formatter;

use protograph_core::semantic::{State, Transition};

use super::Error;

#[derive(Debug, Serialize)]
pub(super) struct StateTooltip<'a> {
    owner: &'a str,
    role: &'a str,
    description: &'a str,
}

impl<'a> StateTooltip<'a> {
    pub(super) fn new(state: &'a State) -> Self {
        Self {
            owner: state.owner(),
            role: state.role(),
            description: state.description(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct TransitionTooltip<'a> {
    trigger: &'a str,
    message: &'a str,
    notes: &'a str,
    payload: &'a str,
}

impl<'a> TransitionTooltip<'a> {
    /// `payload` is the resolved command's payload, or empty.
    pub(super) fn new(transition: &'a Transition, payload: &'a str) -> Self {
        Self {
            trigger: transition.trigger(),
            message: transition.message(),
            notes: transition.notes(),
            payload,
        }
    }
}

/// Compact JSON with a space after each separator.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }
}

/// Serializes `value` as a single JSON line.
pub(super) fn to_json<T: Serialize>(value: &T) -> Result<String, Error> {
    let mut buffer = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, SpacedFormatter);
    value
        .serialize(&mut serializer)
        .map_err(|err| Error::Render(format!("tooltip serialization failed: {err}")))?;
    String::from_utf8(buffer).map_err(|err| Error::Render(err.to_string()))
}
