pub mod parser;
pub mod prompts;
pub mod orchestrator;

pub use orchestrator::Generator;
pub use parser::{extract_list_items, extract_test_cases};
