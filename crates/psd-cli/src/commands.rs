pub mod clean;
pub mod expand;
