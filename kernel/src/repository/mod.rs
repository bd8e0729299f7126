pub mod auth;
pub mod health;
pub mod notification;
pub mod reservation;
pub mod user;
pub mod venue;
