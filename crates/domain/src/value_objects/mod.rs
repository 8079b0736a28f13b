pub mod range_preset;

pub use range_preset::{PercentRange, RangePreset};
