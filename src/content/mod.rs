//! Topic content handling.
//!
//! This module owns the two halves of the content pipeline: the catalog of
//! tutorial topics ([`Catalog`]) and the segmenter that splits one topic's
//! raw text into alternating prose and code segments ([`segment`]).

mod catalog;
mod segmenter;

pub use catalog::{Catalog, Topic};
pub use segmenter::{copy_key, paragraphs, segment, Language, Segment};
