pub mod cache;
pub mod health;
pub mod movie;
pub mod user;
