use diesel_async::pooled_connection::deadpool::{BuildError, Pool};
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::AsyncPgConnection;

pub type DbPool = Pool<AsyncPgConnection>;

const MAX_POOL_SIZE: usize = 8;

pub fn establish_connection(database_url: &str) -> Result<DbPool, BuildError> {
    let config = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);
    Pool::builder(config).max_size(MAX_POOL_SIZE).build()
}
