//! OAuth token wrapper.

use secrecy::{ExposeSecret, SecretString};

use crate::{Error, Result};

/// Environment variable consulted by [`Token::from_env`].
pub const TOKEN_ENV_VAR: &str = "YANDEX_AUDIENCE_TOKEN";

/// OAuth token for the Yandex.Audience API.
///
/// The value is held in a [`SecretString`] and never shows up in `Debug`
/// output or logs.
#[derive(Clone)]
pub struct Token(SecretString);

impl Token {
    /// Wrap an existing token.
    ///
    /// Returns [`Error::TokenNotSet`] for an empty string.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.is_empty() {
            return Err(Error::TokenNotSet);
        }
        Ok(Self(SecretString::from(token)))
    }

    /// Read the token from `YANDEX_AUDIENCE_TOKEN`, falling back to the
    /// supplied value when the variable is unset or empty.
    pub fn from_env(fallback: Option<&str>) -> Result<Self> {
        Self::resolve(std::env::var(TOKEN_ENV_VAR).ok(), fallback)
    }

    /// Pick the first non-empty candidate: environment value, then fallback.
    pub(crate) fn resolve(env_value: Option<String>, fallback: Option<&str>) -> Result<Self> {
        match env_value.filter(|v| !v.is_empty()) {
            Some(token) => Self::new(token),
            None => match fallback.filter(|v| !v.is_empty()) {
                Some(token) => Self::new(token),
                None => Err(Error::TokenNotSet),
            },
        }
    }

    /// Value of the `Authorization` header for this token.
    pub(crate) fn authorization(&self) -> String {
        format!("OAuth {}", self.0.expose_secret())
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Token([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_value_wins() {
        let token = Token::resolve(Some("from-env".into()), Some("from-ctx")).unwrap();
        assert_eq!(token.authorization(), "OAuth from-env");
    }

    #[test]
    fn test_fallback_when_env_missing_or_empty() {
        let token = Token::resolve(None, Some("blah")).unwrap();
        assert_eq!(token.authorization(), "OAuth blah");

        let token = Token::resolve(Some(String::new()), Some("blah")).unwrap();
        assert_eq!(token.authorization(), "OAuth blah");
    }

    #[test]
    fn test_token_not_set() {
        assert!(matches!(Token::resolve(None, None), Err(Error::TokenNotSet)));
        assert!(matches!(
            Token::resolve(Some(String::new()), Some("")),
            Err(Error::TokenNotSet)
        ));
        assert!(matches!(Token::new(""), Err(Error::TokenNotSet)));
    }

    #[test]
    fn test_debug_redacts_token() {
        let token = Token::new("super-secret-token").unwrap();
        let debug_str = format!("{:?}", token);
        assert!(!debug_str.contains("super-secret-token"));
        assert!(debug_str.contains("REDACTED"));
    }
}
