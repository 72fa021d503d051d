// src/command/mod.rs
// Reversible transcript edits

mod field;
mod speakers;
mod structural;

pub use field::{UpdateEndTime, UpdateSpeaker, UpdateStartTime, UpdateText, UpdateTitle};
pub use speakers::AlternateSpeakers;
pub use structural::{AddSegment, CombineWithNext, DeleteSegment, DuplicateSegment};

use crate::transcript::Transcript;

/// A reversible unit of document mutation.
///
/// Each variant snapshots the values it needs for `undo` when it is built, so a
/// command must be executed right after construction. Targets are resolved by
/// segment id every time the command runs; a target that no longer exists turns
/// the call into a silent no-op.
#[derive(Debug, Clone)]
pub enum TranscriptCommand {
    AddSegment(AddSegment),
    DeleteSegment(DeleteSegment),
    DuplicateSegment(DuplicateSegment),
    CombineWithNext(CombineWithNext),
    UpdateText(UpdateText),
    UpdateSpeaker(UpdateSpeaker),
    UpdateStartTime(UpdateStartTime),
    UpdateEndTime(UpdateEndTime),
    AlternateSpeakers(AlternateSpeakers),
    UpdateTitle(UpdateTitle),
}

impl TranscriptCommand {
    pub fn execute(&mut self, transcript: &mut Transcript) {
        match self {
            Self::AddSegment(cmd) => cmd.execute(transcript),
            Self::DeleteSegment(cmd) => cmd.execute(transcript),
            Self::DuplicateSegment(cmd) => cmd.execute(transcript),
            Self::CombineWithNext(cmd) => cmd.execute(transcript),
            Self::UpdateText(cmd) => cmd.execute(transcript),
            Self::UpdateSpeaker(cmd) => cmd.execute(transcript),
            Self::UpdateStartTime(cmd) => cmd.execute(transcript),
            Self::UpdateEndTime(cmd) => cmd.execute(transcript),
            Self::AlternateSpeakers(cmd) => cmd.execute(transcript),
            Self::UpdateTitle(cmd) => cmd.execute(transcript),
        }
    }

    pub fn undo(&mut self, transcript: &mut Transcript) {
        match self {
            Self::AddSegment(cmd) => cmd.undo(transcript),
            Self::DeleteSegment(cmd) => cmd.undo(transcript),
            Self::DuplicateSegment(cmd) => cmd.undo(transcript),
            Self::CombineWithNext(cmd) => cmd.undo(transcript),
            Self::UpdateText(cmd) => cmd.undo(transcript),
            Self::UpdateSpeaker(cmd) => cmd.undo(transcript),
            Self::UpdateStartTime(cmd) => cmd.undo(transcript),
            Self::UpdateEndTime(cmd) => cmd.undo(transcript),
            Self::AlternateSpeakers(cmd) => cmd.undo(transcript),
            Self::UpdateTitle(cmd) => cmd.undo(transcript),
        }
    }

    /// Short label for menus ("Undo Delete segment").
    pub fn description(&self) -> &'static str {
        match self {
            Self::AddSegment(_) => "Add segment",
            Self::DeleteSegment(_) => "Delete segment",
            Self::DuplicateSegment(_) => "Duplicate segment",
            Self::CombineWithNext(_) => "Combine with next segment",
            Self::UpdateText(_) => "Edit text",
            Self::UpdateSpeaker(_) => "Change speaker",
            Self::UpdateStartTime(_) => "Change start time",
            Self::UpdateEndTime(_) => "Change end time",
            Self::AlternateSpeakers(_) => "Alternate speakers",
            Self::UpdateTitle(_) => "Rename transcript",
        }
    }
}

macro_rules! impl_from_command {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for TranscriptCommand {
                fn from(cmd: $variant) -> Self {
                    Self::$variant(cmd)
                }
            }
        )*
    };
}

impl_from_command!(
    AddSegment,
    DeleteSegment,
    DuplicateSegment,
    CombineWithNext,
    UpdateText,
    UpdateSpeaker,
    UpdateStartTime,
    UpdateEndTime,
    AlternateSpeakers,
    UpdateTitle,
);
