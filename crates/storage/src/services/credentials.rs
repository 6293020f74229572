use argon2::{
    Argon2, PasswordHash, PasswordVerifier,
    password_hash::{PasswordHasher, SaltString},
};
use uuid::Uuid;

use crate::error::{Result, StorageError};

/// Capability token for share and invite links.
///
/// 32 hex characters from a random v4 UUID (OS CSPRNG).
pub fn generate_token() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Password handed to judges that are created through an invite. Judges
/// sign in through their invite link, so nobody is ever told this value.
pub fn throwaway_password() -> String {
    Uuid::new_v4().simple().to_string()
}

pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::encode_b64(Uuid::new_v4().as_bytes())
        .map_err(|e| StorageError::PasswordHash(e.to_string()))?;

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| StorageError::PasswordHash(e.to_string()))
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}
