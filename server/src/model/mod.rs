pub mod catalog;
pub mod point;
