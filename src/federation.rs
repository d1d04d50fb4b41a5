//! AWS sign-in federation endpoint: getSigninToken exchange and login URL assembly
//!
//! https://docs.aws.amazon.com/IAM/latest/UserGuide/id_roles_providers_enable-console-custom-url.html

pub const DEFAULT_ENDPOINT: &str = "https://signin.aws.amazon.com/federation";
pub const DEFAULT_ISSUER: &str = "YourApp";
pub const DEFAULT_DESTINATION: &str = "https://console.aws.amazon.com/";

/// Session document sent as the `Session` query parameter of getSigninToken
#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionDocument<'a> {
    session_id: &'a str,
    session_key: &'a str,
    session_token: &'a str,
}

/// Compact JSON (no whitespace) in `sessionId`, `sessionKey`, `sessionToken` order
pub fn session_json(
    credentials: &crate::client::TemporaryCredentials,
) -> Result<String, crate::error::Error> {
    serde_json::to_string(&SessionDocument {
        session_id: &credentials.access_key_id,
        session_key: credentials.secret_access_key.expose(),
        session_token: &credentials.session_token,
    })
    .map_err(|e| crate::error::Error::Unknown(format!("failed to encode session document: {e}")))
}

/// Short-lived token consumed right away to build the login URL
pub struct SigninToken(String);

impl SigninToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SigninToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "SigninToken([REDACTED]; len={})", self.0.len())
    }
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GetSigninTokenResponse {
    signin_token: String,
}

#[async_trait::async_trait]
pub trait Federation: Send + Sync {
    /// Fails with [`crate::error::Error::TokenExchangeError`]
    async fn get_signin_token(
        &self,
        credentials: &crate::client::TemporaryCredentials,
    ) -> Result<SigninToken, crate::error::Error>;
}

/// Values for the login URL besides the sign-in token
#[derive(Debug, Clone)]
pub struct LoginOptions {
    pub endpoint: url::Url,
    pub issuer: String,
    pub destination: String,
}

impl Default for LoginOptions {
    fn default() -> Self {
        Self {
            endpoint: url::Url::parse(DEFAULT_ENDPOINT).unwrap(),
            issuer: DEFAULT_ISSUER.to_owned(),
            destination: DEFAULT_DESTINATION.to_owned(),
        }
    }
}

/// `<endpoint>?Action=login&Issuer=..&Destination=..&SigninToken=..`, form-urlencoded in that order
pub fn login_url(options: &LoginOptions, token: &SigninToken) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("Action", "login")
        .append_pair("Issuer", &options.issuer)
        .append_pair("Destination", &options.destination)
        .append_pair("SigninToken", token.as_str())
        .finish();
    format!("{}?{}", options.endpoint, query)
}

pub struct Client {
    http_client: reqwest::Client,
    endpoint: url::Url,
}

impl Client {
    pub fn new(endpoint: url::Url) -> Result<Self, crate::error::Error> {
        let http_client = reqwest::ClientBuilder::new()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| crate::error::Error::ConfigError(format!("http client: {e}")))?;
        Ok(Self {
            http_client,
            endpoint,
        })
    }
}

#[async_trait::async_trait]
impl Federation for Client {
    async fn get_signin_token(
        &self,
        credentials: &crate::client::TemporaryCredentials,
    ) -> Result<SigninToken, crate::error::Error> {
        let session = session_json(credentials)?;

        let resp = self
            .http_client
            .get(self.endpoint.clone())
            .query(&[("Action", "getSigninToken"), ("Session", session.as_str())])
            .send()
            .await
            .map_err(|e| crate::error::Error::TokenExchangeError(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(crate::error::Error::TokenExchangeError(format!(
                "federation endpoint returned {status}: {body}"
            )));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| crate::error::Error::TokenExchangeError(e.to_string()))?;
        let parsed: GetSigninTokenResponse = serde_json::from_slice(&body).map_err(|e| {
            crate::error::Error::TokenExchangeError(format!(
                "malformed getSigninToken response: {e}"
            ))
        })?;

        tracing::debug!(message = "Received signin token", len = parsed.signin_token.len());
        Ok(SigninToken(parsed.signin_token))
    }
}
