pub mod catalog;
pub mod deal;
