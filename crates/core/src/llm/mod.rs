pub mod anthropic;
pub mod error;
pub mod text;
