pub mod health;
pub mod threats;
pub mod upload;
