pub mod manual;
pub mod types;
