pub mod user;

pub use user::{PgUserRepository, RepositoryError, UserRepository};
