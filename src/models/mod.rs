pub mod user;

pub use user::{LoginRequest, LoginResponse, RegisterRequest, User};
