//! Interactive chat session on stdin/stdout.
//!
//! Each input line is one user message. Lines starting with `/` are
//! session commands:
//!
//! | Command | Effect |
//! |---------|--------|
//! | `/clear` | Reset the history to the greeting |
//! | `/history` | Print every turn with its timestamp |
//! | `/samples` | List sample questions |
//! | `/quit` | End the session (EOF works too) |
//!
//! The engine is built before the first prompt, so a bad catalog stops the
//! session before it accepts any input.

use anyhow::Result;
use std::io::{BufRead, Write};

use support_bot_core::engine::Responder;

use crate::bot::build_engine;
use crate::catalog::SAMPLE_QUESTIONS;
use crate::config::Config;
use crate::conversation::{format_confidence, Conversation, Role, Turn};

/// Parsed input line.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Message(&'a str),
    Clear,
    History,
    Samples,
    Quit,
    Empty,
    Unknown(&'a str),
}

fn parse_input(line: &str) -> Input<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Input::Empty;
    }
    match trimmed {
        "/clear" => Input::Clear,
        "/history" => Input::History,
        "/samples" => Input::Samples,
        "/quit" | "/exit" => Input::Quit,
        cmd if cmd.starts_with('/') => Input::Unknown(cmd),
        _ => Input::Message(trimmed),
    }
}

pub fn run_chat(config: &Config) -> Result<()> {
    let engine = build_engine(config)?;
    let interactive = atty::is(atty::Stream::Stdin);
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    chat_loop(&engine, stdin.lock(), &mut stdout.lock(), interactive)
}

/// Drive a session from `input` until EOF or `/quit`.
fn chat_loop<R, W>(
    responder: &dyn Responder,
    input: R,
    out: &mut W,
    interactive: bool,
) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    let mut convo = Conversation::new();
    print_turn(out, &convo.turns()[0])?;
    if interactive {
        writeln!(out, "(type /samples for ideas, /quit to leave)")?;
    }

    let mut lines = input.lines();
    loop {
        if interactive {
            write!(out, "> ")?;
            out.flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        match parse_input(&line) {
            Input::Empty => continue,
            Input::Quit => break,
            Input::Clear => {
                convo.clear();
                writeln!(out, "History cleared.")?;
                print_turn(out, &convo.turns()[0])?;
            }
            Input::History => {
                for turn in convo.turns() {
                    print_turn(out, turn)?;
                }
            }
            Input::Samples => {
                for q in SAMPLE_QUESTIONS {
                    writeln!(out, "  - {}", q)?;
                }
            }
            Input::Unknown(cmd) => {
                writeln!(
                    out,
                    "Unknown command {}. Try /clear, /history, /samples, or /quit.",
                    cmd
                )?;
            }
            Input::Message(text) => {
                let reply = convo.ask(responder, text)?;
                print_turn(out, reply)?;
            }
        }
    }
    Ok(())
}

fn print_turn<W: Write>(out: &mut W, turn: &Turn) -> Result<()> {
    let who = match turn.role {
        Role::User => "you",
        Role::Assistant => "bot",
    };
    let badge = turn
        .confidence
        .and_then(format_confidence)
        .map(|pct| format!(" ({})", pct))
        .unwrap_or_default();
    writeln!(out, "[{}] {}{}:", turn.clock(), who, badge)?;
    writeln!(out, "{}", turn.content)?;
    writeln!(out)?;
    Ok(())
}
