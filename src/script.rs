//! Scripted input replay
//!
//! A script is a YAML list of steps, each a map with exactly one key:
//!
//! ```yaml
//! - show: true
//! - text: "hello"
//! - key: "alt+left"
//! - compose: { text: "ni", selection: [2, 2] }
//! - commit: { text: "你" }
//! - key: "enter"
//! - deliver: true
//! ```

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::input::{CompositionEvent, RawKeyEvent};
use crate::keymap::parse_key_sequence;
use crate::session::{BufferId, ScratchBuffer, Session, SessionOutcome};

/// Provisional input-method text
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComposeStep {
    pub text: String,
    /// Selection inside `text`; defaults to a caret after it
    #[serde(default)]
    pub selection: Option<(usize, usize)>,
    #[serde(default)]
    pub replacement: Option<(usize, usize)>,
}

/// Final input-method text
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommitStep {
    pub text: String,
    #[serde(default)]
    pub replacement: Option<(usize, usize)>,
}

/// One script step. Exactly one field must be set; replay rejects anything
/// else.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Step {
    /// Key or chord, e.g. `cmd+left` or `ctrl+k ctrl+d`
    #[serde(default)]
    pub key: Option<String>,
    /// Characters typed one at a time
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub compose: Option<ComposeStep>,
    #[serde(default)]
    pub commit: Option<CommitStep>,
    #[serde(default)]
    pub unmark: bool,
    #[serde(default)]
    pub show: bool,
    #[serde(default)]
    pub hide: bool,
    /// Report the last submission as delivered to a valid (true) or
    /// invalid (false) target
    #[serde(default)]
    pub deliver: Option<bool>,
}

/// Everything a replay produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transcript {
    pub outcomes: Vec<SessionOutcome>,
    pub buffers: Vec<ScratchBuffer>,
    pub current: usize,
    pub text: String,
    pub cursor: usize,
}

pub fn parse_script(yaml: &str) -> Result<Vec<Step>> {
    serde_yaml::from_str(yaml).context("Failed to parse script")
}

/// Feed `steps` through `session`
pub fn replay(session: &mut Session, steps: &[Step]) -> Result<Transcript> {
    let mut outcomes = Vec::new();
    let mut last_submitted: Option<BufferId> = None;

    for (i, step) in steps.iter().enumerate() {
        let events = events_for(step).with_context(|| format!("step {}", i + 1))?;
        for event in events {
            let outcome = session.handle(event);
            if let SessionOutcome::Submitted { buffer, .. } = &outcome {
                last_submitted = Some(*buffer);
            }
            outcomes.push(outcome);
        }

        if step.show {
            session.show();
        }
        if step.hide {
            session.hide();
        }
        if let Some(valid) = step.deliver {
            let Some(buffer) = last_submitted.take() else {
                bail!("step {}: deliver without a prior submit", i + 1);
            };
            session.delivery_finished(buffer, valid);
        }
    }

    let engine = session.engine();
    let mut buffers: Vec<ScratchBuffer> = session.buffers().iter().cloned().collect();
    let current = session.buffers().current_index();
    if session.is_visible() {
        if let Some(live) = buffers.get_mut(current) {
            engine.snapshot_into(live);
        }
    }

    Ok(Transcript {
        outcomes,
        buffers,
        current,
        text: engine.text(),
        cursor: engine.cursor(),
    })
}

impl Step {
    fn fields_set(&self) -> usize {
        [
            self.key.is_some(),
            self.text.is_some(),
            self.compose.is_some(),
            self.commit.is_some(),
            self.unmark,
            self.show,
            self.hide,
            self.deliver.is_some(),
        ]
        .into_iter()
        .filter(|&set| set)
        .count()
    }
}

fn events_for(step: &Step) -> Result<Vec<RawKeyEvent>> {
    let set = step.fields_set();
    if set != 1 {
        bail!("expected exactly one action per step, found {}", set);
    }
    if let Some(keys) = &step.key {
        let keystrokes = parse_key_sequence(keys)?;
        return Ok(keystrokes.into_iter().map(RawKeyEvent::key).collect());
    }
    if let Some(text) = &step.text {
        return Ok(text.chars().map(RawKeyEvent::char).collect());
    }
    if let Some(compose) = &step.compose {
        let len = compose.text.chars().count();
        let (start, end) = compose.selection.unwrap_or((len, len));
        return Ok(vec![RawKeyEvent::composition(CompositionEvent::SetMarked {
            text: compose.text.clone(),
            selection: start..end,
            replacement: compose.replacement.map(|(s, e)| s..e),
        })]);
    }
    if let Some(commit) = &step.commit {
        return Ok(vec![RawKeyEvent::composition(CompositionEvent::Commit {
            text: commit.text.clone(),
            replacement: commit.replacement.map(|(s, e)| s..e),
        })]);
    }
    if step.unmark {
        return Ok(vec![RawKeyEvent::composition(CompositionEvent::Unmark)]);
    }
    Ok(Vec::new())
}
