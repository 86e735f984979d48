pub mod replace;

pub use replace::{Replacement, ReplacementPreview, ReplaceError, recompute_day};
