pub mod usage;
pub mod users;
