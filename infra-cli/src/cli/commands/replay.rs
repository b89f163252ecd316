//! Headless wizard: dispatch a JSON script of messages

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use colored::*;

use super::session::{Outcome, Session};
use crate::cli::render;
use crate::wizard::Msg;

pub fn handle_replay(session: &mut Session<'_>, script: &Path) -> Result<()> {
    let msgs = read_script(script)?;
    log::info!("Replaying {} messages from {}", msgs.len(), script.display());

    run(session, msgs);

    println!();
    print!("{}", render::session_summary(&session.view()));
    Ok(())
}

pub fn read_script(path: &Path) -> Result<Vec<Msg>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read replay script: {}", path.display()))?;
    parse_script(&content).with_context(|| format!("Invalid replay script: {}", path.display()))
}

pub fn parse_script(content: &str) -> Result<Vec<Msg>> {
    serde_json::from_str(content).context("Expected a JSON array of wizard messages")
}

/// Dispatch every message in order, printing what each one produced
fn run(session: &mut Session<'_>, msgs: Vec<Msg>) {
    for (idx, msg) in msgs.into_iter().enumerate() {
        log::debug!("#{}: {:?}", idx + 1, msg);
        let outcome = session.dispatch(msg);
        if matches!(outcome, Outcome::Notified(_) | Outcome::Exported(_)) {
            print!("{} ", format!("#{}", idx + 1).dimmed());
            outcome.print();
        }
    }
}
