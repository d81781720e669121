pub mod jwt;

pub use jwt::{
    AUTH_COOKIE_NAME, Claims, TokenPurpose, generate_magic_token, generate_session_token,
    validate_token,
};
