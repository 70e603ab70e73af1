//! Design token primitives: shade scale, color math, shadow grammar

mod color;
mod scale;
mod shadow;

pub use color::*;
pub use scale::*;
pub use shadow::*;
