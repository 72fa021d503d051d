//! Linear undo/redo history for transcript commands.
//!
//! ```text
//! execute(c3)         history: [c1, c2, c3]   redo: []
//! undo() x2           history: [c1]           redo: [c3, c2]
//! execute(c4)         history: [c1, c4]       redo: []      <- redo branch dropped
//! ```
//!
//! There is no branching and no merging of adjacent commands: callers debounce
//! keystroke-level edits into one command before dispatching it.

use crate::command::TranscriptCommand;
use crate::transcript::Transcript;

/// Sequences command execution and keeps the undo and redo stacks.
#[derive(Debug, Default)]
pub struct CommandInvoker {
    /// Executed commands, newest at the back
    history: Vec<TranscriptCommand>,
    /// Undone commands, newest at the back
    redo: Vec<TranscriptCommand>,
}

impl CommandInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `command` and records it. Any pending redo is discarded.
    pub fn execute(&mut self, mut command: TranscriptCommand, transcript: &mut Transcript) {
        command.execute(transcript);
        self.history.push(command);
        if !self.redo.is_empty() {
            tracing::debug!("Dropping {} redo entries", self.redo.len());
            self.redo.clear();
        }
    }

    /// Reverts the most recent command. Returns its description, or `None` when
    /// there is nothing to undo.
    pub fn undo(&mut self, transcript: &mut Transcript) -> Option<&'static str> {
        let mut command = self.history.pop()?;
        command.undo(transcript);
        let description = command.description();
        self.redo.push(command);
        Some(description)
    }

    /// Re-applies the most recently undone command.
    pub fn redo(&mut self, transcript: &mut Transcript) -> Option<&'static str> {
        let mut command = self.redo.pop()?;
        command.execute(transcript);
        let description = command.description();
        self.history.push(command);
        Some(description)
    }

    pub fn is_undo_available(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn is_redo_available(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    /// Descriptions of undoable commands, most recent first.
    pub fn undo_descriptions(&self, limit: usize) -> Vec<&'static str> {
        self.history
            .iter()
            .rev()
            .take(limit)
            .map(TranscriptCommand::description)
            .collect()
    }

    /// Descriptions of redoable commands, next to be redone first.
    pub fn redo_descriptions(&self, limit: usize) -> Vec<&'static str> {
        self.redo
            .iter()
            .rev()
            .take(limit)
            .map(TranscriptCommand::description)
            .collect()
    }

    /// Forgets both stacks. Used when the document is replaced wholesale.
    pub fn clear(&mut self) {
        self.history.clear();
        self.redo.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{CombineWithNext, DeleteSegment, UpdateText, UpdateTitle};
    use crate::transcript::Segment;
    use serde_json::Value;

    fn doc() -> Transcript {
        Transcript::new(
            "en",
            vec![
                Segment::new("s1", 0.0, 4.0, "Hello"),
                Segment::new("s2", 4.0, 8.0, "World"),
                Segment::new("s3", 8.0, 9.0, "again"),
            ],
        )
    }

    fn snapshot(transcript: &Transcript) -> Value {
        serde_json::to_value(transcript).unwrap()
    }

    fn rename(transcript: &Transcript, title: &str) -> TranscriptCommand {
        UpdateTitle::new(transcript, title).into()
    }

    #[test]
    fn undo_and_redo_on_empty_stacks_are_no_ops() {
        let mut transcript = doc();
        let before = snapshot(&transcript);
        let mut invoker = CommandInvoker::new();

        assert_eq!(invoker.undo(&mut transcript), None);
        assert_eq!(invoker.redo(&mut transcript), None);
        assert_eq!(snapshot(&transcript), before);
        assert!(!invoker.is_undo_available());
        assert!(!invoker.is_redo_available());
    }

    #[test]
    fn undo_moves_one_command_to_redo_and_back() {
        let mut transcript = doc();
        let mut invoker = CommandInvoker::new();

        let cmd = rename(&transcript, "First");
        invoker.execute(cmd, &mut transcript);
        let cmd = rename(&transcript, "Second");
        invoker.execute(cmd, &mut transcript);
        assert_eq!((invoker.undo_depth(), invoker.redo_depth()), (2, 0));

        assert_eq!(invoker.undo(&mut transcript), Some("Rename transcript"));
        assert_eq!((invoker.undo_depth(), invoker.redo_depth()), (1, 1));
        assert_eq!(transcript.title, "First");

        invoker.redo(&mut transcript);
        assert_eq!((invoker.undo_depth(), invoker.redo_depth()), (2, 0));
        assert_eq!(transcript.title, "Second");
    }

    #[test]
    fn execute_after_undo_discards_redo_branch() {
        let mut transcript = doc();
        let mut invoker = CommandInvoker::new();

        for title in ["a", "b", "c"] {
            let cmd = rename(&transcript, title);
            invoker.execute(cmd, &mut transcript);
        }
        invoker.undo(&mut transcript);
        invoker.undo(&mut transcript);
        assert_eq!(invoker.redo_depth(), 2);

        let cmd = rename(&transcript, "d");
        invoker.execute(cmd, &mut transcript);
        assert!(!invoker.is_redo_available());
        assert_eq!(invoker.redo(&mut transcript), None);
        assert_eq!(transcript.title, "d");
        assert_eq!(invoker.undo_depth(), 2);
    }

    #[test]
    fn two_command_round_trip() {
        let mut transcript = doc();
        let original = snapshot(&transcript);
        let mut invoker = CommandInvoker::new();

        let a = CombineWithNext::new(&transcript, "s1", "s2").unwrap().into();
        invoker.execute(a, &mut transcript);
        let b = UpdateText::new(&transcript, "s1", "Hello World!").unwrap().into();
        invoker.execute(b, &mut transcript);
        let after_both = snapshot(&transcript);

        invoker.undo(&mut transcript);
        invoker.undo(&mut transcript);
        assert_eq!(snapshot(&transcript), original);

        invoker.redo(&mut transcript);
        invoker.redo(&mut transcript);
        assert_eq!(snapshot(&transcript), after_both);
    }

    #[test]
    fn delete_round_trip_keeps_position() {
        let mut transcript = doc();
        let original = snapshot(&transcript);
        let mut invoker = CommandInvoker::new();

        let cmd = DeleteSegment::new(&transcript, "s2").unwrap().into();
        invoker.execute(cmd, &mut transcript);
        assert_eq!(transcript.segment_ids(), vec!["s1", "s3"]);

        invoker.undo(&mut transcript);
        assert_eq!(snapshot(&transcript), original);
    }

    #[test]
    fn descriptions_list_most_recent_first() {
        let mut transcript = doc();
        let mut invoker = CommandInvoker::new();

        let cmd = rename(&transcript, "x");
        invoker.execute(cmd, &mut transcript);
        let cmd = DeleteSegment::new(&transcript, "s1").unwrap().into();
        invoker.execute(cmd, &mut transcript);

        assert_eq!(
            invoker.undo_descriptions(5),
            vec!["Delete segment", "Rename transcript"]
        );
        assert_eq!(invoker.undo_descriptions(1), vec!["Delete segment"]);

        invoker.undo(&mut transcript);
        assert_eq!(invoker.redo_descriptions(5), vec!["Delete segment"]);

        invoker.clear();
        assert_eq!(invoker.undo_depth() + invoker.redo_depth(), 0);
    }
}
