//! Anti-forgery state for an in-progress flow.

/// Runtime state for one Authorization-Code flow run.
///
/// Created at flow start, compared against the redirect capture, and
/// discarded after the token exchange.
#[derive(Debug, Clone)]
pub struct FlowContext {
    /// Random state parameter for CSRF protection
    pub state: String,
    /// When this context was created (Unix timestamp)
    pub created_at: u64,
}

impl FlowContext {
    /// Create a new context with a freshly generated state value.
    pub fn new() -> Self {
        Self {
            state: Self::generate_random_string(32),
            created_at: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs(),
        }
    }

    /// Generate a random hex string of the given length (in bytes).
    fn generate_random_string(bytes: usize) -> String {
        use std::fmt::Write;
        let mut rng_bytes = vec![0u8; bytes];
        getrandom::getrandom(&mut rng_bytes).expect("Failed to generate random bytes");
        let mut s = String::with_capacity(bytes * 2);
        for b in rng_bytes {
            write!(s, "{:02x}", b).unwrap();
        }
        s
    }

    /// Check if this context has expired (authorization codes are
    /// short-lived; 5 minutes matches the strictest provider).
    pub fn is_expired(&self) -> bool {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        now - self.created_at > 300
    }
}

impl Default for FlowContext {
    fn default() -> Self {
        Self::new()
    }
}
