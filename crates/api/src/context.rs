use usersvc_auth::TokenSource;

/// Authentication context for a request, inserted by the token gate.
///
/// Absent on public paths.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AuthContext {
    source: TokenSource,
}

impl AuthContext {
    pub fn new(source: TokenSource) -> Self {
        Self { source }
    }

    /// Where the accepted token was read from.
    pub fn source(&self) -> TokenSource {
        self.source
    }
}
