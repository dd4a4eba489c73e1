//! Bearer Token Signing
//!
//! Token format: `<token-uuid>.<base64url(HMAC-SHA256(secret, token-uuid))>`.
//! The signature lets forged tokens be refused before any database lookup;
//! revocation is handled by deleting the token record.

use kernel::id::TokenId;
use platform::crypto::{from_base64_url, hmac_sign, hmac_verify, to_base64_url};

use crate::domain::entity::auth_token::AuthToken;
use crate::error::{UsersError, UsersResult};

#[derive(Clone)]
pub struct TokenSigner {
    secret: [u8; 32],
}

impl TokenSigner {
    pub fn new(secret: [u8; 32]) -> Self {
        Self { secret }
    }

    /// Bearer string for an issued token
    pub fn sign(&self, token: &AuthToken) -> String {
        let token_id = token.token_id.to_string();
        let signature = hmac_sign(&self.secret, token_id.as_bytes());
        format!("{}.{}", token_id, to_base64_url(&signature))
    }

    /// Verify the signature and recover the token ID
    pub fn verify(&self, bearer: &str) -> UsersResult<TokenId> {
        let (token_id, signature_b64) = bearer
            .split_once('.')
            .ok_or(UsersError::Unauthenticated)?;

        let signature = from_base64_url(signature_b64).map_err(|_| UsersError::Unauthenticated)?;

        if !hmac_verify(&self.secret, token_id.as_bytes(), &signature) {
            return Err(UsersError::Unauthenticated);
        }

        token_id.parse().map_err(|_| UsersError::Unauthenticated)
    }
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner").finish_non_exhaustive()
    }
}
