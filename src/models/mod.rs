pub mod field;
pub mod presentation;
pub mod slide;

pub use field::Field;
