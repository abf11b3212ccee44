pub mod album;
pub mod requests;
pub mod responses;
pub mod session;
