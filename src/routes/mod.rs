pub mod health;
pub mod poster;
pub mod search;
pub mod session;
