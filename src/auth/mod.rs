//! Credential storage for the generation API key.
//!
//! The key lives in the platform keyring under the `lucent` service. The
//! `GEMINI_API_KEY` environment variable is consulted when the keyring has
//! nothing, or exclusively when `--env` is passed.

use std::error::Error as StdError;
use std::fmt;

use keyring::Entry;
use tracing::{debug, warn};

use crate::core::constants::API_KEY_ENV;

mod ui;

use self::ui::{prompt_api_key, prompt_confirmation, UiError};

const KEYRING_SERVICE: &str = "lucent";
const KEYRING_ENTRY: &str = "gemini";

/// Failures when talking to the system keyring.
///
/// Recoverable errors mean the backend was temporarily unavailable (a
/// locked keychain, a missing secret service); callers can fall back to the
/// environment for those.
#[derive(Debug)]
pub enum KeyringAccessError {
    Recoverable(keyring::Error),
    Permanent(keyring::Error),
}

impl KeyringAccessError {
    fn inner(&self) -> &keyring::Error {
        match self {
            KeyringAccessError::Recoverable(err) | KeyringAccessError::Permanent(err) => err,
        }
    }

    pub fn is_recoverable(&self) -> bool {
        matches!(self, KeyringAccessError::Recoverable(_))
    }
}

impl From<keyring::Error> for KeyringAccessError {
    fn from(err: keyring::Error) -> Self {
        match err {
            keyring::Error::PlatformFailure(_) | keyring::Error::NoStorageAccess(_) => {
                KeyringAccessError::Recoverable(err)
            }
            other => KeyringAccessError::Permanent(other),
        }
    }
}

impl fmt::Display for KeyringAccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "keyring unavailable: {}", self.inner())
    }
}

impl StdError for KeyringAccessError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.inner())
    }
}

pub struct AuthManager {
    use_keyring: bool,
}

impl AuthManager {
    pub fn new() -> Self {
        Self::new_with_keyring(true)
    }

    /// Construct an AuthManager, optionally disabling keyring access (useful for tests)
    pub fn new_with_keyring(use_keyring: bool) -> Self {
        Self { use_keyring }
    }

    fn entry(&self) -> Result<Entry, KeyringAccessError> {
        Ok(Entry::new(KEYRING_SERVICE, KEYRING_ENTRY)?)
    }

    pub fn store_token(&self, token: &str) -> Result<(), KeyringAccessError> {
        if !self.use_keyring {
            return Ok(());
        }
        self.entry()?.set_password(token)?;
        debug!("stored API key in keyring");
        Ok(())
    }

    pub fn get_token(&self) -> Result<Option<String>, KeyringAccessError> {
        if !self.use_keyring {
            return Ok(None);
        }
        match self.entry()?.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Delete the stored key. Returns `false` when nothing was stored.
    pub fn remove_token(&self) -> Result<bool, KeyringAccessError> {
        if !self.use_keyring {
            return Ok(false);
        }
        match self.entry()?.delete_credential() {
            Ok(()) => Ok(true),
            Err(keyring::Error::NoEntry) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    /// Find the key to use for this session, if any.
    ///
    /// Keyring failures are logged and treated as "no stored key" so the
    /// environment can still supply one.
    pub fn resolve_api_key(&self, env_only: bool) -> Option<String> {
        let env = std::env::var(API_KEY_ENV).ok();
        if env_only {
            return pick_api_key(None, env);
        }
        let stored = self.get_token().unwrap_or_else(|err| {
            warn!(error = %err, recoverable = err.is_recoverable(), "keyring lookup failed");
            None
        });
        pick_api_key(stored, env)
    }

    pub fn interactive_auth(&self) -> Result<(), Box<dyn StdError>> {
        println!("🔐 Lucent Authentication Setup");
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        println!();
        println!("Paste your Gemini API key. It is stored in the system keyring.");

        let token = prompt_api_key().map_err(boxed)?;
        self.store_token(&token)?;
        println!("✅ API key saved.");
        Ok(())
    }

    pub fn interactive_deauth(&self) -> Result<(), Box<dyn StdError>> {
        if !prompt_confirmation("Remove the stored API key?").map_err(boxed)? {
            println!("Cancelled.");
            return Ok(());
        }
        if self.remove_token()? {
            println!("✅ API key removed.");
        } else {
            println!("No stored API key found.");
        }
        Ok(())
    }
}

impl Default for AuthManager {
    fn default() -> Self {
        Self::new()
    }
}

fn boxed(err: UiError) -> Box<dyn StdError> {
    Box::new(err)
}

/// Keyring beats environment; blank values count as missing.
fn pick_api_key(stored: Option<String>, env: Option<String>) -> Option<String> {
    let usable = |value: Option<String>| {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };
    usable(stored).or_else(|| usable(env))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_key_wins_over_environment() {
        assert_eq!(
            pick_api_key(Some("stored".into()), Some("env".into())).as_deref(),
            Some("stored")
        );
    }

    #[test]
    fn environment_fills_in_for_missing_or_blank_keys() {
        assert_eq!(pick_api_key(None, Some("env".into())).as_deref(), Some("env"));
        assert_eq!(
            pick_api_key(Some("  ".into()), Some(" env\n".into())).as_deref(),
            Some("env")
        );
        assert_eq!(pick_api_key(None, Some(String::new())), None);
    }

    #[test]
    fn disabled_keyring_is_inert() {
        let auth = AuthManager::new_with_keyring(false);
        assert!(auth.store_token("secret").is_ok());
        assert_eq!(auth.get_token().ok().flatten(), None);
        assert!(matches!(auth.remove_token(), Ok(false)));
    }

    #[test]
    fn platform_failures_are_recoverable() {
        let err = KeyringAccessError::from(keyring::Error::NoStorageAccess(Box::new(
            std::io::Error::other("locked"),
        )));
        assert!(err.is_recoverable());
        assert!(!KeyringAccessError::from(keyring::Error::NoEntry).is_recoverable());
    }
}
