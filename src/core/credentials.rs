//! Secure credential storage using the system keyring
//!
//! The Gemini API key is kept in the system keyring (macOS Keychain, Linux
//! Secret Service) with an in-memory cache to minimize keychain prompts.
//!
//! ## Environment Variable Fallback
//!
//! For development and CI, set `GEMINI_API_KEY` instead.
//!
//! Priority: env var > cache > keyring

use std::sync::RwLock;

use keyring::Entry;
use once_cell::sync::Lazy;
use secrecy::{ExposeSecret, SecretString};

use crate::error::{GemcommitError, Result};

const SERVICE_NAME: &str = "gemcommit";
const GEMINI_API_KEY_NAME: &str = "gemini_api_key";

/// Environment variable that overrides the stored key
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

// Option<Option<T>>:
//   - None = not yet fetched from keyring
//   - Some(None) = fetched, but no credential exists
//   - Some(Some(value)) = fetched and cached
static GEMINI_KEY_CACHE: Lazy<RwLock<Option<Option<SecretString>>>> =
    Lazy::new(|| RwLock::new(None));

/// Credential store for the Gemini API key
pub struct CredentialStore;

impl CredentialStore {
    /// Store the Gemini API key securely
    ///
    /// Updates both the keyring and the in-memory cache.
    pub fn store_gemini_key(key: &str) -> Result<()> {
        let key = key.trim();
        if key.is_empty() {
            return Err(GemcommitError::InvalidInput(
                "API key cannot be empty.".to_string(),
            ));
        }

        let entry = Entry::new(SERVICE_NAME, GEMINI_API_KEY_NAME)?;
        entry.set_password(key)?;

        if let Ok(mut cache) = GEMINI_KEY_CACHE.write() {
            *cache = Some(Some(SecretString::from(key.to_string())));
        }

        Ok(())
    }

    /// Retrieve the Gemini API key
    ///
    /// Priority: environment variable > cache > keyring
    pub fn get_gemini_key() -> Result<Option<SecretString>> {
        if let Ok(key) = std::env::var(GEMINI_API_KEY_ENV) {
            if !key.trim().is_empty() {
                return Ok(Some(SecretString::from(key)));
            }
        }

        if let Ok(cache) = GEMINI_KEY_CACHE.read() {
            if let Some(cached_value) = cache.as_ref() {
                return Ok(cached_value.clone());
            }
        }

        let result = Self::fetch_gemini_key_from_keyring()?;

        if let Ok(mut cache) = GEMINI_KEY_CACHE.write() {
            *cache = Some(result.clone());
        }

        Ok(result)
    }

    /// Fetch Gemini key directly from keyring (no cache)
    fn fetch_gemini_key_from_keyring() -> Result<Option<SecretString>> {
        let entry = Entry::new(SERVICE_NAME, GEMINI_API_KEY_NAME)?;
        match entry.get_password() {
            Ok(password) => Ok(Some(SecretString::from(password))),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(GemcommitError::Credential(format!(
                "Cannot access system keychain. Make sure your keyring is unlocked. ({})",
                e
            ))),
        }
    }

    /// Delete the stored Gemini API key
    ///
    /// Clears both the keyring and the in-memory cache.
    pub fn delete_gemini_key() -> Result<()> {
        let entry = Entry::new(SERVICE_NAME, GEMINI_API_KEY_NAME)?;
        let result = match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()), // Already deleted
            Err(e) => Err(GemcommitError::Credential(e.to_string())),
        };

        if let Ok(mut cache) = GEMINI_KEY_CACHE.write() {
            *cache = Some(None);
        }

        result
    }

    /// Whether the key comes from the environment rather than the keyring
    pub fn key_from_env() -> bool {
        std::env::var(GEMINI_API_KEY_ENV).is_ok_and(|key| !key.trim().is_empty())
    }

    /// Get a masked version of a key for display (shows first 4 and last 4 chars)
    pub fn mask_token(token: &SecretString) -> String {
        let exposed = token.expose_secret();
        let chars: Vec<char> = exposed.chars().collect();
        if chars.len() <= 8 {
            "*".repeat(chars.len())
        } else {
            let head: String = chars[..4].iter().collect();
            let tail: String = chars[chars.len() - 4..].iter().collect();
            format!("{}...{}", head, tail)
        }
    }
}
