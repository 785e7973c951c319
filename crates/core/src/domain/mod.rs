pub mod asteroid;
pub mod range;
