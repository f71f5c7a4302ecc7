pub mod catalogue;
pub mod export;
pub mod velocity;
