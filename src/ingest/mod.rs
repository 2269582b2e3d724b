pub mod reader;
pub mod pipeline;
pub mod storage;

pub use pipeline::{ingest_csv, IngestPipeline};
pub use reader::{read_rows, ThreatRow};
