pub mod duration;
pub mod letters;
