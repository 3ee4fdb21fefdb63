//! Cache key builders for all Warden cache entries.
//!
//! Centralising key construction prevents typos and makes it easy
//! to find every key the application uses.

// ── Passport keys ──────────────────────────────────────────

/// Cache key for a revoked token, addressed by its fingerprint.
pub fn revoked_token(fingerprint: &str) -> String {
    format!("revoked:{fingerprint}")
}

/// Cache key for a pending captcha answer.
pub fn captcha(correlation_id: &str) -> String {
    format!("captcha:{correlation_id}")
}
