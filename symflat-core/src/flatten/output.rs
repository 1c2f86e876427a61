//! Side-channel results: output produced by commands that is not part of the algebraic result.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An RGBA image.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Image {
    pub width: u32,
    pub height: u32,

    /// The pixels, row by row, four bytes per pixel.
    pub rgba: Vec<u8>,
}

/// A single side-channel result.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Output {
    Text(String),
    Image(Image),
}

/// Collects side-channel results in the order they are produced.
pub trait OutputSink {
    fn push(&mut self, output: Output);
}

/// Discards every result.
impl OutputSink for () {
    fn push(&mut self, _: Output) {}
}

impl OutputSink for Vec<Output> {
    fn push(&mut self, output: Output) {
        Vec::push(self, output);
    }
}
