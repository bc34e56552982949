pub mod catalog;
pub mod health;
pub mod resource;
pub mod submission;

pub use health::health_check;
