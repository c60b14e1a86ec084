pub mod activities;
pub mod articles;
pub mod error;
pub mod events;
pub mod health;
pub mod users;

pub use error::AppError;
