//! The three demo flows, each writing a transcript to `out`.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use rewind::{Caretaker, HistoryConfig, HistoryError, Owner};

use crate::error::{DemoError, Result};

/// Text owner that also remembers every state restored into it.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    text: String,
    restored: Vec<String>,
}

impl TextBuffer {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            restored: Vec::new(),
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Every text restored by undo, redo or revert, oldest first.
    #[must_use]
    pub fn restored(&self) -> &[String] {
        &self.restored
    }
}

impl Owner for TextBuffer {
    type State = String;

    fn capture(&self) -> String {
        self.text.clone()
    }

    fn apply(&mut self, state: String) {
        self.restored.push(state.clone());
        self.text = state;
    }
}

// ============================================================================
// checkpoint
// ============================================================================

/// One save/restore slot: save, change, restore.
pub fn run_checkpoint(out: &mut impl Write) -> Result<()> {
    let mut caretaker = Caretaker::new(TextBuffer::default(), HistoryConfig::single_slot());
    writeln!(out, "Single checkpoint:")?;

    caretaker.owner_mut().set_text("State 1");
    writeln!(out, "Current state: {}", caretaker.owner().text())?;
    caretaker.record();

    caretaker.owner_mut().set_text("State 2");
    writeln!(out, "Current state: {}", caretaker.owner().text())?;

    caretaker.revert()?;
    writeln!(out, "Current state: {}", caretaker.owner().text())?;
    Ok(())
}

// ============================================================================
// editor
// ============================================================================

pub const INITIAL_TEXT: &str = "Hello World";

/// Checkpoint after every edit, then undo until history runs out.
pub fn run_editor(config: HistoryConfig, edits: &[String], out: &mut impl Write) -> Result<()> {
    let mut caretaker = Caretaker::new(TextBuffer::new(INITIAL_TEXT), config);
    writeln!(out, "Multiple checkpoints:")?;
    caretaker.record();

    for edit in edits {
        caretaker.edit(|buffer| buffer.set_text(edit.as_str()));
        writeln!(out, "edit  -> {}", caretaker.owner().text())?;
    }

    loop {
        match caretaker.undo() {
            Ok(snapshot) => writeln!(out, "undo  -> {}", snapshot.payload())?,
            Err(err) => {
                writeln!(out, "stop: {err}")?;
                break;
            }
        }
    }

    writeln!(out, "Restored texts:")?;
    for text in caretaker.owner().restored() {
        writeln!(out, "  {text}")?;
    }
    Ok(())
}

// ============================================================================
// script
// ============================================================================

/// One step of a script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptOp {
    /// Change the buffer without recording.
    Set(String),
    Record,
    Undo,
    Redo,
    Revert,
}

impl FromStr for ScriptOp {
    type Err = DemoError;

    fn from_str(s: &str) -> Result<Self> {
        if let Some(text) = s.strip_prefix("set:") {
            return Ok(Self::Set(text.to_string()));
        }
        match s {
            "record" => Ok(Self::Record),
            "undo" => Ok(Self::Undo),
            "redo" => Ok(Self::Redo),
            "revert" => Ok(Self::Revert),
            _ => Err(DemoError::InvalidOp { op: s.to_string() }),
        }
    }
}

impl fmt::Display for ScriptOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Set(text) => write!(f, "set:{text}"),
            Self::Record => f.write_str("record"),
            Self::Undo => f.write_str("undo"),
            Self::Redo => f.write_str("redo"),
            Self::Revert => f.write_str("revert"),
        }
    }
}

/// Parse every op up front so a typo aborts before anything runs.
pub fn parse_script(ops: &[String]) -> Result<Vec<ScriptOp>> {
    ops.iter().map(|op| op.parse()).collect()
}

/// Run `ops` against an empty buffer, one transcript line per op.
pub fn run_script(config: HistoryConfig, ops: &[ScriptOp], out: &mut impl Write) -> Result<()> {
    let mut caretaker = Caretaker::new(TextBuffer::default(), config);

    for (step, op) in ops.iter().enumerate() {
        let outcome: std::result::Result<(), HistoryError> = match op {
            ScriptOp::Set(text) => {
                caretaker.owner_mut().set_text(text.as_str());
                Ok(())
            }
            ScriptOp::Record => {
                caretaker.record();
                Ok(())
            }
            ScriptOp::Undo => caretaker.undo().map(drop),
            ScriptOp::Redo => caretaker.redo().map(drop),
            ScriptOp::Revert => caretaker.revert().map(drop),
        };

        let history = caretaker.history();
        match outcome {
            Ok(()) => writeln!(
                out,
                "{step:>3} {:<14} text={:?} undo={} redo={}",
                op.to_string(),
                caretaker.owner().text(),
                history.undo_depth(),
                history.redo_depth()
            )?,
            Err(err) => writeln!(out, "{step:>3} {:<14} no-op: {err}", op.to_string())?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transcript<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> Result<()>,
    {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn ops(raw: &[&str]) -> Vec<ScriptOp> {
        let raw: Vec<String> = raw.iter().map(|s| s.to_string()).collect();
        parse_script(&raw).unwrap()
    }

    #[test]
    fn checkpoint_restores_saved_state() {
        let text = transcript(|out| run_checkpoint(out));
        assert_eq!(
            text,
            "Single checkpoint:\n\
             Current state: State 1\n\
             Current state: State 2\n\
             Current state: State 1\n"
        );
    }

    #[test]
    fn editor_unwinds_to_initial_text() {
        let edits = vec!["Hello C#".to_string(), "Hello .Net".to_string()];
        let text = transcript(|out| run_editor(HistoryConfig::default(), &edits, out));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Multiple checkpoints:",
                "edit  -> Hello C#",
                "edit  -> Hello .Net",
                "undo  -> Hello C#",
                "undo  -> Hello World",
                "stop: nothing to undo",
                "Restored texts:",
                "  Hello C#",
                "  Hello World",
            ]
        );
    }

    #[test]
    fn editor_respects_depth_limit() {
        let edits: Vec<String> = (1..=5).map(|i| format!("v{i}")).collect();
        let text = transcript(|out| run_editor(HistoryConfig::new(2), &edits, out));
        assert!(text.contains("undo  -> v4\n"));
        assert!(!text.contains("undo  -> v3"));
    }

    #[test]
    fn parse_accepts_all_ops() {
        assert_eq!(
            ops(&["set:a b", "record", "undo", "redo", "revert"]),
            vec![
                ScriptOp::Set("a b".to_string()),
                ScriptOp::Record,
                ScriptOp::Undo,
                ScriptOp::Redo,
                ScriptOp::Revert,
            ]
        );
    }

    #[test]
    fn parse_rejects_unknown_op() {
        let err = parse_script(&["record".to_string(), "jump".to_string()]).unwrap_err();
        assert!(matches!(err, DemoError::InvalidOp { ref op } if op == "jump"));
    }

    #[test]
    fn script_reports_empty_history_as_no_op() {
        let script = ops(&["undo", "set:A", "record", "set:B", "record", "undo", "redo", "redo"]);
        let text = transcript(|out| run_script(HistoryConfig::default(), &script, out));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 8);
        assert!(lines[0].ends_with("no-op: nothing to undo"));
        assert!(lines[5].contains("text=\"A\" undo=1 redo=1"));
        assert!(lines[6].contains("text=\"B\" undo=2 redo=0"));
        assert!(lines[7].ends_with("no-op: nothing to redo"));
    }

    #[test]
    fn display_round_trips_through_parse() {
        for op in ops(&["set:x", "record", "undo", "redo", "revert"]) {
            assert_eq!(op.to_string().parse::<ScriptOp>().unwrap(), op);
        }
    }

    #[test]
    fn apply_logs_restored_text() {
        let mut buffer = TextBuffer::new("a");
        buffer.apply("b".to_string());
        assert_eq!(buffer.text(), "b");
        assert_eq!(buffer.restored(), ["b".to_string()]);
    }
}
