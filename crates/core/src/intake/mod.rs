pub mod cues;
pub mod fields;
