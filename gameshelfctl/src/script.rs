//! Replay scripts
//!
//! One event per line, timestamps in milliseconds since the shelf mounted.
//! `down` takes an optional pointer position (default `0 0`); `move` offsets
//! are relative to the position of the last `down`.
//!
//! ```text
//! # tap the third tile, then hold the first one
//! down 2 0
//! up 80
//! down 0 200 40 40
//! move 3 4 260
//! tick 800
//! up 900
//! next 1000
//! rows 2 1200
//! ```

use gameshelf_core::{Direction, GestureTarget, RowMode, ShelfMessage};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
}

/// One scheduled message.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptEvent {
    pub t_ms: u64,
    pub message: ShelfMessage,
}

pub fn parse(source: &str) -> Result<Vec<ScriptEvent>, ScriptError> {
    let mut events = Vec::new();
    let mut last = 0;
    let mut origin = (0.0, 0.0);

    for (number, raw) in source.lines().enumerate() {
        let line = number + 1;
        let text = raw.split('#').next().unwrap_or_default().trim();
        if text.is_empty() {
            continue;
        }

        let fail = |message: String| ScriptError::Parse { line, message };
        let words: Vec<&str> = text.split_whitespace().collect();
        let event = parse_words(&words, last, &mut origin).map_err(fail)?;
        if event.t_ms < last {
            return Err(fail(format!(
                "time {} is earlier than the previous event ({last})",
                event.t_ms
            )));
        }
        last = event.t_ms;
        events.push(event);
    }

    Ok(events)
}

fn parse_words(
    words: &[&str],
    last: u64,
    origin: &mut (f32, f32),
) -> Result<ScriptEvent, String> {
    let (command, args) = match words.split_first() {
        Some((command, args)) => (*command, args),
        None => return Err("empty command".into()),
    };

    let (message, t_ms) = match (command, args) {
        ("down", [target, t]) => {
            *origin = (0.0, 0.0);
            (contact_start(target, *origin)?, parse_time(t)?)
        }
        ("down", [target, t, x, y]) => {
            *origin = (parse_number(x)?, parse_number(y)?);
            (contact_start(target, *origin)?, parse_time(t)?)
        }
        ("move", [dx, dy, t]) => (
            ShelfMessage::ContactMove {
                x: origin.0 + parse_number(dx)?,
                y: origin.1 + parse_number(dy)?,
            },
            parse_time(t)?,
        ),
        ("up", [t]) => (ShelfMessage::ContactEnd, parse_time(t)?),
        ("cancel", [t]) => (ShelfMessage::ContactCancel, parse_time(t)?),
        ("next", [t]) => {
            (ShelfMessage::Navigate(Direction::Next), parse_time(t)?)
        }
        ("prev", [t]) => {
            (ShelfMessage::Navigate(Direction::Prev), parse_time(t)?)
        }
        ("rows", [rows, t]) => {
            (ShelfMessage::SetRowMode(parse_rows(rows)?), parse_time(t)?)
        }
        ("resize", [w, h, t]) => (
            ShelfMessage::SetViewport {
                width: parse_number(w)?,
                height: parse_number(h)?,
            },
            parse_time(t)?,
        ),
        ("tick", [t]) => (ShelfMessage::Tick, parse_time(t)?),
        ("clear", []) => (ShelfMessage::ClearSelection, last),
        ("clear", [t]) => (ShelfMessage::ClearSelection, parse_time(t)?),
        (
            "down" | "move" | "up" | "cancel" | "next" | "prev" | "rows"
            | "resize" | "tick" | "clear",
            _,
        ) => {
            return Err(format!(
                "wrong number of arguments for `{command}`"
            ));
        }
        _ => return Err(format!("unknown command `{command}`")),
    };

    Ok(ScriptEvent { t_ms, message })
}

fn contact_start(
    target: &str,
    (x, y): (f32, f32),
) -> Result<ShelfMessage, String> {
    Ok(ShelfMessage::ContactStart {
        target: parse_target(target)?,
        x,
        y,
    })
}

fn parse_target(word: &str) -> Result<GestureTarget, String> {
    if word == "bg" {
        return Ok(GestureTarget::Background);
    }
    word.parse()
        .map(GestureTarget::Tile)
        .map_err(|_| format!("`{word}` is not a slot position or `bg`"))
}

fn parse_time(word: &str) -> Result<u64, String> {
    word.parse()
        .map_err(|_| format!("`{word}` is not a time in milliseconds"))
}

fn parse_number(word: &str) -> Result<f32, String> {
    word.parse().map_err(|_| format!("`{word}` is not a number"))
}

fn parse_rows(word: &str) -> Result<RowMode, String> {
    match word {
        "1" => Ok(RowMode::One),
        "2" => Ok(RowMode::Two),
        _ => Err(format!("row mode must be 1 or 2, got `{word}`")),
    }
}
