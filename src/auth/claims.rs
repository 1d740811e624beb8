use serde::{Deserialize, Serialize};

/// JWT payload. `sub` is the hex ObjectId of the user; tokens are
/// stateless and carry nothing else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user ID (hex)
    pub iat: usize,  // issued at (unix timestamp)
    pub exp: usize,  // expires at (unix timestamp)
}
