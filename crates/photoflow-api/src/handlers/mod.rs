pub mod access;
pub mod events;
pub mod health;
pub mod upload;
