//! Application Configuration

/// Users application configuration
#[derive(Debug, Clone)]
pub struct UsersConfig {
    /// HMAC key for signing bearer tokens (32 bytes)
    pub token_secret: [u8; 32],
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Largest accepted avatar upload, in bytes
    pub avatar_max_bytes: usize,
    /// Stored avatars are resized to this edge (square, pixels)
    pub avatar_edge: u32,
}

/// Defaults carry a fresh random token secret; tokens die with the process
impl Default for UsersConfig {
    fn default() -> Self {
        let mut token_secret = [0u8; 32];
        token_secret.copy_from_slice(&platform::crypto::random_bytes(32));

        Self {
            token_secret,
            password_pepper: None,
            avatar_max_bytes: 1_000_000,
            avatar_edge: 250,
        }
    }
}

impl UsersConfig {
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}
