pub mod backend;
pub mod poster;
pub mod session;
