mod baskets;
mod db;
mod errors;
mod order_lines;

pub use db::SqliteDatabase;
pub use errors::SqliteDatabaseError;
