pub mod evaluate;
pub mod segment;
