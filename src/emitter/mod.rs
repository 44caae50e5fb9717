mod segment;

#[cfg(test)]
mod tests;

pub use segment::{derive_label, materialize, write_segments, Segment};
