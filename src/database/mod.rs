pub mod db;
pub mod store;

pub use db::{establish_connection, DbPool};
pub use store::{PgUserStore, StoreError, UserStore};
