//! Environment variable credential resolution.
//!
//! The provider API key is the one secret Parley needs. It is read from
//! the environment only -- never from disk -- checking
//! `PARLEY_OPENAI_API_KEY` first and falling back to `OPENAI_API_KEY`.
//!
//! Absence is not fatal at startup: the gateway runs without a key and
//! every provider call then fails through the generic error path.

use secrecy::SecretString;

/// Variables checked, in priority order.
const API_KEY_VARS: [&str; 2] = ["PARLEY_OPENAI_API_KEY", "OPENAI_API_KEY"];

/// Resolve the provider API key from the environment.
pub fn resolve_api_key() -> Option<SecretString> {
    for var in API_KEY_VARS {
        match std::env::var(var) {
            Ok(val) if !val.is_empty() => return Some(SecretString::from(val)),
            Ok(_) => continue,
            Err(std::env::VarError::NotPresent) => continue,
            Err(std::env::VarError::NotUnicode(_)) => {
                // Var exists but has invalid Unicode -- treat as not found,
                // since the key must be a valid string.
                continue;
            }
        }
    }
    None
}
