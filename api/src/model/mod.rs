pub mod notification;
pub mod reservation;
pub mod venue;
