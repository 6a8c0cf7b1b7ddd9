pub mod list;
pub mod target;
pub mod upload;
