pub mod health;
pub mod list;
pub mod predict;
pub mod upload;
