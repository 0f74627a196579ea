//! Client for the CMU OAuth provider.
//!
//! Login is a two-step exchange: the authorization code the frontend received
//! is traded for an access token, and the access token is used to fetch the
//! caller's basic profile. Neither call is retried.

use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use strum::{AsRefStr, Display, EnumIter, EnumString};
use thiserror::Error;
use util::config::OAuthSettings;

#[derive(Debug, Error)]
pub enum OAuthError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to {endpoint} endpoint failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} endpoint returned {status}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
    },
    #[error("invalid access token response")]
    MissingAccessToken,
    #[error("failed to decode {endpoint} response: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

/// Account types reported in `itaccounttype_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr, EnumIter)]
pub enum CmuAccountRole {
    #[strum(serialize = "MISEmpAcc")]
    Mis,
    #[strum(serialize = "StdAcc")]
    Student,
    #[strum(serialize = "AlumAcc")]
    Alumni,
    #[strum(serialize = "EmpResiAcc")]
    Resign,
    #[strum(serialize = "ManAcc")]
    Manager,
    #[strum(serialize = "NonMISEmpAcc")]
    NonMis,
    #[strum(serialize = "OrgAcc")]
    Org,
    #[strum(serialize = "ProjAcc")]
    Project,
    #[strum(serialize = "RetEmpAcc")]
    Retired,
    #[strum(serialize = "VIPAcc")]
    Vip,
}

/// Basic profile returned by the provider. Missing fields decode as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CmuBasicInfo {
    #[serde(rename = "cmuitaccount_name")]
    pub account_name: String,
    /// The account e-mail, used to match staff users.
    #[serde(rename = "cmuitaccount")]
    pub account: String,
    pub student_id: String,
    pub prename_id: String,
    #[serde(rename = "prename_TH")]
    pub prename_th: String,
    #[serde(rename = "prename_EN")]
    pub prename_en: String,
    #[serde(rename = "firstname_TH")]
    pub firstname_th: String,
    #[serde(rename = "firstname_EN")]
    pub firstname_en: String,
    #[serde(rename = "lastname_TH")]
    pub lastname_th: String,
    #[serde(rename = "lastname_EN")]
    pub lastname_en: String,
    pub organization_code: String,
    #[serde(rename = "organization_name_TH")]
    pub organization_name_th: String,
    #[serde(rename = "organization_name_EN")]
    pub organization_name_en: String,
    #[serde(rename = "itaccounttype_id")]
    pub account_type_id: String,
    #[serde(rename = "itaccounttype_TH")]
    pub account_type_th: String,
    #[serde(rename = "itaccounttype_EN")]
    pub account_type_en: String,
}

impl CmuBasicInfo {
    /// The account role, or `None` for a type id outside the known set.
    pub fn role(&self) -> Option<CmuAccountRole> {
        self.account_type_id.parse().ok()
    }

    pub fn is_student(&self) -> bool {
        self.role() == Some(CmuAccountRole::Student)
    }
}

#[derive(Clone)]
pub struct CmuOAuthClient {
    http: reqwest::Client,
    token_url: String,
    profile_url: String,
    client_id: String,
    client_secret: String,
}

impl CmuOAuthClient {
    pub fn new(settings: &OAuthSettings) -> Result<Self, OAuthError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(OAuthError::Client)?;

        Ok(Self {
            http,
            token_url: settings.token_url.clone(),
            profile_url: settings.profile_url.clone(),
            client_id: settings.client_id.clone(),
            client_secret: settings.client_secret.clone(),
        })
    }

    /// Trades an authorization code for a bearer access token.
    pub async fn exchange_code(&self, code: &str, redirect_uri: &str) -> Result<String, OAuthError> {
        const ENDPOINT: &str = "token";

        let params = [
            ("grant_type", "authorization_code"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("code", code),
            ("redirect_uri", redirect_uri),
        ];

        let response = self
            .http
            .post(&self.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|source| OAuthError::Transport { endpoint: ENDPOINT, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(OAuthError::Status { endpoint: ENDPOINT, status });
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|source| OAuthError::Decode { endpoint: ENDPOINT, source })?;

        body.get("access_token")
            .and_then(|t| t.as_str())
            .filter(|t| !t.is_empty())
            .map(str::to_owned)
            .ok_or(OAuthError::MissingAccessToken)
    }

    /// Fetches the basic profile of the access token's owner.
    pub async fn fetch_profile(&self, access_token: &str) -> Result<CmuBasicInfo, OAuthError> {
        const ENDPOINT: &str = "profile";

        let response = self
            .http
            .get(&self.profile_url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|source| OAuthError::Transport { endpoint: ENDPOINT, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(OAuthError::Status { endpoint: ENDPOINT, status });
        }

        response
            .json::<CmuBasicInfo>()
            .await
            .map_err(|source| OAuthError::Decode { endpoint: ENDPOINT, source })
    }
}
