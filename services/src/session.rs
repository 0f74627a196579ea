use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::oauth::CmuBasicInfo;

/// Claims embedded in every session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionClaims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faculty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<usize>,
}

/// Who the token is issued for.
#[derive(Debug, Clone, Copy)]
pub enum SessionSubject<'a> {
    Profile(&'a CmuBasicInfo),
    Manual {
        first_name: &'a str,
        last_name: &'a str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionScope {
    /// A recognized staff user.
    Admin,
    Visitor,
}

impl SessionClaims {
    pub fn build(subject: SessionSubject<'_>, scope: SessionScope) -> Self {
        match subject {
            SessionSubject::Profile(info) => {
                let student_id = match scope {
                    SessionScope::Visitor if !info.student_id.is_empty() => {
                        Some(info.student_id.clone())
                    }
                    _ => None,
                };

                Self {
                    email: Some(info.account.clone()),
                    first_name: prefer_thai(&info.firstname_th, &info.firstname_en),
                    last_name: prefer_thai(&info.lastname_th, &info.lastname_en),
                    faculty: Some(info.organization_name_th.clone()),
                    student_id,
                    exp: None,
                }
            }
            SessionSubject::Manual { first_name, last_name } => Self {
                email: None,
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                faculty: None,
                student_id: None,
                exp: None,
            },
        }
    }
}

fn prefer_thai(th: &str, en: &str) -> String {
    if th.is_empty() { capitalize(en) } else { th.to_string() }
}

/// Uppercases the first character and leaves the rest as is.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Signs and verifies HS256 session tokens.
#[derive(Clone)]
pub struct SessionSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    duration_minutes: Option<u64>,
}

impl SessionSigner {
    /// Tokens carry an `exp` claim only when `duration_minutes` is set.
    pub fn new(secret: &str, duration_minutes: Option<u64>) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            duration_minutes,
        }
    }

    pub fn issue(&self, claims: &SessionClaims) -> Result<String, jsonwebtoken::errors::Error> {
        let mut claims = claims.clone();
        claims.exp = self.duration_minutes.map(|minutes| {
            let expiry = Utc::now() + Duration::minutes(minutes as i64);
            expiry.timestamp() as usize
        });

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
    }

    /// Decodes a token signed with the same secret. `exp` is checked only when present.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();

        decode::<SessionClaims>(token, &self.decoding, &validation).map(|data| data.claims)
    }
}
