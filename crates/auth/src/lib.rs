//! `usersvc-auth` — token gate policy, decoupled from HTTP.
//!
//! The API layer extracts candidate tokens from a request; this crate decides
//! which candidate counts and whether it is authorized.

pub mod authorizer;
pub mod source;
pub mod token;

pub use authorizer::{StaticTokenSet, TokenAuthorizer};
pub use source::{authenticate, resolve_token, TokenCandidates, TokenRejection, TokenSource};
pub use token::ApiToken;
