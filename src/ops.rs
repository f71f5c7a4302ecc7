mod argmax;
mod stepped;

pub use self::{argmax::FirstMax, stepped::Stepped};
