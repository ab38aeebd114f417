//! Token handling for the Yandex.Audience API.
//!
//! The management API authenticates every request with a single static
//! OAuth token sent as `Authorization: OAuth <token>`. Obtaining that token
//! is outside the scope of this crate; callers either pass it explicitly or
//! let [`Token::from_env`] read it once at the program boundary.
//!
//! ```no_run
//! use yandex_audience::Token;
//!
//! # fn example() -> yandex_audience::Result<()> {
//! // Environment first, then the fallback value
//! let token = Token::from_env(Some("token-from-cli-flag"))?;
//! # Ok(())
//! # }
//! ```

mod token;

pub use token::{Token, TOKEN_ENV_VAR};
