pub mod types;
pub mod classification;

pub use types::ThreatError;
pub use classification::ErrorClassification;
