//! HS256 JSON Web Tokens
//!
//! Compact `header.claims.signature` form, base64url without padding,
//! HMAC-SHA256 over `header.claims`.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{TimeDelta, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::error::{HubError, Result};

type HmacSha256 = Hmac<Sha256>;

const HEADER: &str = r#"{"alg":"HS256","typ":"JWT"}"#;

/// Token payload; `sub` is the account email
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and validates access tokens
#[derive(Clone)]
pub struct TokenSigner {
    secret: Vec<u8>,
    ttl: TimeDelta,
}

impl TokenSigner {
    pub fn new(secret: &str, ttl_days: i64) -> Result<Self> {
        let ttl = TimeDelta::try_days(ttl_days)
            .filter(|ttl| *ttl > TimeDelta::zero())
            .ok_or_else(|| {
                HubError::Validation(format!("Token lifetime of {} days is out of range", ttl_days))
            })?;
        Ok(Self {
            secret: secret.as_bytes().to_vec(),
            ttl,
        })
    }

    pub fn issue(&self, subject: &str) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: subject.to_string(),
            iat: now,
            exp: now.saturating_add(self.ttl.num_seconds()),
        };
        self.encode(&claims)
    }

    pub fn encode(&self, claims: &Claims) -> Result<String> {
        let header = URL_SAFE_NO_PAD.encode(HEADER);
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims)?);
        let signing_input = format!("{}.{}", header, payload);
        let signature = URL_SAFE_NO_PAD.encode(self.sign(signing_input.as_bytes())?);
        Ok(format!("{}.{}", signing_input, signature))
    }

    /// Validate signature, algorithm and expiry
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let mut parts = token.split('.');
        let (Some(header), Some(payload), Some(signature), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(HubError::Unauthorized("Malformed token".into()));
        };

        let header_json = URL_SAFE_NO_PAD
            .decode(header)
            .map_err(|_| HubError::Unauthorized("Malformed token header".into()))?;
        let header_value: serde_json::Value = serde_json::from_slice(&header_json)
            .map_err(|_| HubError::Unauthorized("Malformed token header".into()))?;
        if header_value.get("alg").and_then(|a| a.as_str()) != Some("HS256") {
            return Err(HubError::Unauthorized("Unsupported token algorithm".into()));
        }

        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| HubError::Unauthorized("Malformed token signature".into()))?;
        let mut mac = self.mac()?;
        mac.update(header.as_bytes());
        mac.update(b".");
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| HubError::Unauthorized("Invalid token signature".into()))?;

        let payload = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| HubError::Unauthorized("Malformed token payload".into()))?;
        let claims: Claims = serde_json::from_slice(&payload)
            .map_err(|_| HubError::Unauthorized("Malformed token claims".into()))?;

        if claims.exp <= Utc::now().timestamp() {
            return Err(HubError::Unauthorized("Token expired".into()));
        }

        Ok(claims)
    }

    fn sign(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut mac = self.mac()?;
        mac.update(data);
        Ok(mac.finalize().into_bytes().to_vec())
    }

    fn mac(&self) -> Result<HmacSha256> {
        HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| HubError::Internal(format!("HMAC key error: {}", e)))
    }
}

/// Pull the token out of an `Authorization: Bearer <token>` header value
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_TOKEN_TTL_DAYS;

    #[test]
    fn test_issue_and_verify() {
        let signer = TokenSigner::new("secret", 30).unwrap();
        let token = signer.issue("user1@example.com").unwrap();
        assert_eq!(token.split('.').count(), 3);

        let claims = signer.verify(&token).unwrap();
        assert_eq!(claims.sub, "user1@example.com");
        assert_eq!(claims.exp - claims.iat, 30 * 24 * 3600);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = TokenSigner::new("secret", 1).unwrap().issue("a@b.c").unwrap();
        let err = TokenSigner::new("other", 1).unwrap().verify(&token).unwrap_err();
        assert!(matches!(err, HubError::Unauthorized(_)));
    }

    #[test]
    fn test_expired_token_rejected() {
        let signer = TokenSigner::new("secret", 1).unwrap();
        let now = Utc::now().timestamp();
        let token = signer
            .encode(&Claims {
                sub: "a@b.c".into(),
                iat: now - 100,
                exp: now - 10,
            })
            .unwrap();
        assert!(signer.verify(&token).is_err());
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let signer = TokenSigner::new("secret", 1).unwrap();
        let token = signer.issue("a@b.c").unwrap();
        let parts: Vec<&str> = token.split('.').collect();
        let forged_claims = URL_SAFE_NO_PAD.encode(r#"{"sub":"admin@b.c","iat":0,"exp":9999999999}"#);
        let forged = format!("{}.{}.{}", parts[0], forged_claims, parts[2]);
        assert!(signer.verify(&forged).is_err());
    }

    #[test]
    fn test_malformed_tokens() {
        let signer = TokenSigner::new("secret", 1).unwrap();
        assert!(signer.verify("").is_err());
        assert!(signer.verify("a.b").is_err());
        assert!(signer.verify("a.b.c.d").is_err());
        assert!(signer.verify("!!.??.##").is_err());
    }

    #[test]
    fn test_lifetime_out_of_range() {
        assert!(TokenSigner::new("secret", 0).is_err());
        assert!(TokenSigner::new("secret", -3).is_err());
        assert!(matches!(
            TokenSigner::new("secret", i64::MAX),
            Err(HubError::Validation(_))
        ));
        assert!(TokenSigner::new("secret", MAX_TOKEN_TTL_DAYS).is_ok());
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(bearer_token("bearer   tok "), Some("tok"));
        assert_eq!(bearer_token("Basic abc"), None);
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("abc"), None);
    }
}
