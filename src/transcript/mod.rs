// src/transcript/mod.rs
// Document model: transcripts, segments, speakers and segment ids

mod id;
mod types;

pub use id::{IdGenerator, SequentialIdGenerator, UuidIdGenerator};
pub use types::{Segment, Speaker, Transcript};
