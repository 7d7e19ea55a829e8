//! Authentication: session tokens, Google sign-in, cookies, and extractors.

pub mod cookies;
pub mod extract;
pub mod google;
pub mod jwt;

pub use cookies::{read_cookie, CookiePolicy};
pub use extract::{Auth, RequireAuth};
pub use google::GoogleIdentityProvider;
pub use jwt::JwtIssuer;
