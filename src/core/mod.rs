pub mod handler;
pub mod notification;
pub mod response;
