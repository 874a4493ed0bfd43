/// Security module: token issuance/verification and password credential checks
pub mod jwt;
pub mod password;

pub use jwt::{Claims, TokenService, TOKEN_VALIDITY_MINUTES};
pub use password::{hash_password, verify_password};
