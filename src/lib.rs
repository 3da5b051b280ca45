//MIT License
pub mod expressions;
