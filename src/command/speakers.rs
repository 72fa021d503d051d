use crate::transcript::{Segment, Speaker, Transcript};

/// Assigns speakers round-robin over the whole transcript, in display order.
#[derive(Debug, Clone)]
pub struct AlternateSpeakers {
    speakers: Vec<Speaker>,
    previous: Option<Vec<Segment>>,
}

impl AlternateSpeakers {
    pub fn new(speakers: Vec<Speaker>) -> Self {
        Self {
            speakers,
            previous: None,
        }
    }

    pub(super) fn execute(&mut self, transcript: &mut Transcript) {
        tracing::info!(
            "execute >>> alternate {} speakers over {} segments",
            self.speakers.len(),
            transcript.segments.len()
        );
        self.previous = Some(transcript.segments.clone());

        if self.speakers.is_empty() {
            return;
        }
        for (index, segment) in transcript.segments.iter_mut().enumerate() {
            segment.speaker = Some(self.speakers[index % self.speakers.len()].clone());
        }
    }

    pub(super) fn undo(&mut self, transcript: &mut Transcript) {
        let Some(previous) = self.previous.take() else {
            return;
        };
        tracing::info!("undo <<< restore speakers of {} segments", previous.len());
        transcript.segments = previous;
    }
}
