pub mod threat;
pub mod report;
pub mod tree;

pub use threat::*;
pub use report::*;
pub use tree::*;
