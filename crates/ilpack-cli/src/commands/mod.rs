pub mod dump;
pub mod export;
pub mod members;
