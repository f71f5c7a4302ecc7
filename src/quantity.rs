#[macro_use]
mod macros;

pub mod area;
pub mod density;
pub mod energy;
pub mod percentage;
pub mod power;
pub mod velocity;
