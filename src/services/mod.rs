pub mod title;

pub use title::{fallback_title, generate_title, make_title, TitleCandidate};
