pub mod auth;
pub mod user;

pub use auth::{LoginRequest, LoginResponse, RegisterRequest};
pub use user::{CreateUser, ListUsers, UpdateUser, UpdateUserRequest, User, UserList};
