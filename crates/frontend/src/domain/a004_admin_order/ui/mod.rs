pub mod board;
pub mod details;
