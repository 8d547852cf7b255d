//! Webhook sender authentication.
//!
//! Flutterwave echoes the operator-configured secret hash verbatim in the
//! `verif-hash` header of every webhook delivery. The check is a shared-secret
//! comparison, not an HMAC over the request body, so it authenticates the
//! sender without detecting payload tampering; that matches the provider's
//! actual scheme. The comparison itself runs in constant time.

use subtle::ConstantTimeEq;

pub fn verify_signature(header_signature: &str, configured_secret: &str) -> bool {
    if header_signature.is_empty() {
        return false;
    }

    bool::from(
        header_signature
            .as_bytes()
            .ct_eq(configured_secret.as_bytes()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_matching_secret() {
        assert!(verify_signature("s3cret-hash", "s3cret-hash"));
    }

    #[test]
    fn rejects_empty_header() {
        assert!(!verify_signature("", "s3cret-hash"));
    }

    #[test]
    fn rejects_wrong_secret() {
        assert!(!verify_signature("wrong", "s3cret-hash"));
        assert!(!verify_signature("s3cret-hash ", "s3cret-hash"));
        assert!(!verify_signature("S3CRET-HASH", "s3cret-hash"));
        assert!(!verify_signature("s3cret-has", "s3cret-hash"));
    }
}
