//! Authorization guards.
//!
//! Route code depends on the [`Authenticator`] trait only, so the shared
//! secret check can be swapped for a real scheme without touching handlers.

use std::sync::Arc;

/// Decides whether a presented credential grants access.
pub trait Authenticator: Send + Sync {
    /// Returns `true` when `credential` is accepted.
    fn verify(&self, credential: &str) -> bool;
}

/// Shared handle used by route state.
pub type SharedAuthenticator = Arc<dyn Authenticator>;

/// Accepts exactly one pre-shared credential.
pub struct SharedSecret {
    secret: String,
}

impl SharedSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn shared(secret: impl Into<String>) -> SharedAuthenticator {
        Arc::new(Self::new(secret))
    }
}

impl Authenticator for SharedSecret {
    fn verify(&self, credential: &str) -> bool {
        let accepted = constant_time_eq(self.secret.as_bytes(), credential.as_bytes());
        if !accepted {
            tracing::debug!(target: "catalog-authz", "shared secret mismatch");
        }
        accepted
    }
}

impl std::fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedSecret").finish_non_exhaustive()
    }
}

/// Byte comparison whose running time depends only on the input lengths.
fn constant_time_eq(expected: &[u8], presented: &[u8]) -> bool {
    if expected.len() != presented.len() {
        return false;
    }
    let diff = expected
        .iter()
        .zip(presented)
        .fold(0u8, |acc, (a, b)| std::hint::black_box(acc | (a ^ b)));
    std::hint::black_box(diff) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "HMAC d5951928a797e3de418978abeb1c4f036672aa63b3241843493bfae1c0e60923";

    #[test]
    fn accepts_exact_secret() {
        let auth = SharedSecret::new(SECRET);
        assert!(auth.verify(SECRET));
    }

    #[test]
    fn rejects_other_values() {
        let auth = SharedSecret::new(SECRET);
        assert!(!auth.verify(""));
        assert!(!auth.verify("HMAC"));
        assert!(!auth.verify(&SECRET.to_lowercase()));
        assert!(!auth.verify(&format!("{SECRET} ")));
        assert!(!auth.verify(&SECRET.replace('d', "e")));
    }

    #[test]
    fn compares_every_byte() {
        assert!(constant_time_eq(b"abcd", b"abcd"));
        assert!(!constant_time_eq(b"abcd", b"xbcd"));
        assert!(!constant_time_eq(b"abcd", b"abcx"));
        assert!(!constant_time_eq(b"abcd", b"abc"));
        assert!(constant_time_eq(b"", b""));
    }

    #[test]
    fn debug_hides_secret() {
        let rendered = format!("{:?}", SharedSecret::new(SECRET));
        assert!(!rendered.contains("d5951928"));
    }

    #[test]
    fn works_behind_trait_object() {
        let auth: SharedAuthenticator = SharedSecret::shared("token");
        assert!(auth.verify("token"));
        assert!(!auth.verify("Token"));
    }
}
