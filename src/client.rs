//! Security token service seam (sts:AssumeRole, sts:GetCallerIdentity) and its AWS SDK implementation

const DEFAULT_REGION: &str = "us-east-1";
const PROVIDER_NAME: &str = "assume-role-console";

#[derive(Clone, serde::Deserialize)]
#[serde(transparent)]
pub struct AwsSecretAccessKey(secrecy::SecretString);

impl AwsSecretAccessKey {
    pub fn expose(&self) -> &str {
        use secrecy::ExposeSecret;
        self.0.expose_secret()
    }
}

impl std::fmt::Debug for AwsSecretAccessKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        f.write_str("AwsSecretAccessKey([REDACTED])")
    }
}

impl From<String> for AwsSecretAccessKey {
    fn from(v: String) -> Self {
        Self(secrecy::SecretString::new(v))
    }
}

impl From<&str> for AwsSecretAccessKey {
    fn from(v: &str) -> Self {
        Self::from(v.to_owned())
    }
}

/// Temporary credential triple. Only ever used as a whole.
#[derive(Debug, Clone)]
pub struct TemporaryCredentials {
    pub access_key_id: String,
    pub secret_access_key: AwsSecretAccessKey,
    pub session_token: String,
}

impl TemporaryCredentials {
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<AwsSecretAccessKey>,
        session_token: impl Into<String>,
    ) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token: session_token.into(),
        }
    }
}

/// https://docs.aws.amazon.com/STS/latest/APIReference/API_AssumeRole.html
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssumeRoleRequest {
    pub role_arn: String,
    pub role_session_name: String,
    /// Omitted from the API call when `None`
    pub external_id: Option<String>,
    /// Omitted from the API call when `None`
    pub policy: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallerIdentity {
    pub account: Option<String>,
    pub arn: Option<String>,
    pub user_id: Option<String>,
}

#[async_trait::async_trait]
pub trait SecurityTokenService: Send + Sync {
    /// Fails with [`crate::error::Error::RoleAssumptionError`]
    async fn assume_role(
        &self,
        request: &AssumeRoleRequest,
    ) -> Result<TemporaryCredentials, crate::error::Error>;

    /// Calls GetCallerIdentity authenticated with `credentials`.
    /// Fails with [`crate::error::Error::InvalidCredentialsError`]
    async fn get_caller_identity(
        &self,
        credentials: &TemporaryCredentials,
    ) -> Result<CallerIdentity, crate::error::Error>;
}

pub struct Client {
    sdk_config: aws_config::SdkConfig,
}

impl Client {
    /// Loads base credentials and region from the AWS SDK default chain. `region` takes precedence when given.
    pub async fn new(region: Option<&str>) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(r) = region {
            loader = loader.region(aws_config::Region::new(r.to_owned()));
        }
        let mut sdk_config = loader.load().await;
        if sdk_config.region().is_none() {
            tracing::debug!(message = "No region configured, falling back", region = DEFAULT_REGION);
            sdk_config = sdk_config
                .to_builder()
                .region(Some(aws_config::Region::new(DEFAULT_REGION)))
                .build();
        }
        Self { sdk_config }
    }

    pub fn region(&self) -> Option<&str> {
        self.sdk_config.region().map(|r| r.as_ref())
    }
}

#[async_trait::async_trait]
impl SecurityTokenService for Client {
    async fn assume_role(
        &self,
        request: &AssumeRoleRequest,
    ) -> Result<TemporaryCredentials, crate::error::Error> {
        let sts = aws_sdk_sts::Client::new(&self.sdk_config);

        let resp = sts
            .assume_role()
            .role_arn(&request.role_arn)
            .role_session_name(&request.role_session_name)
            .set_external_id(request.external_id.clone())
            .set_policy(request.policy.clone())
            .send()
            .await
            .map_err(|e| {
                crate::error::Error::RoleAssumptionError(describe_sdk_error("AssumeRole", e))
            })?;

        let creds = resp.credentials().ok_or_else(|| {
            crate::error::Error::RoleAssumptionError(
                "AWS STS AssumeRole returned empty credentials".to_string(),
            )
        })?;

        tracing::debug!(
            message = "AssumeRole succeeded",
            access_key_id = creds.access_key_id(),
            expiration = ?creds.expiration(),
            assumed_role_user_arn = ?resp.assumed_role_user().map(|u| u.arn()),
        );

        Ok(TemporaryCredentials::new(
            creds.access_key_id(),
            creds.secret_access_key(),
            creds.session_token(),
        ))
    }

    async fn get_caller_identity(
        &self,
        credentials: &TemporaryCredentials,
    ) -> Result<CallerIdentity, crate::error::Error> {
        let static_creds = aws_sdk_sts::config::Credentials::new(
            &credentials.access_key_id,
            credentials.secret_access_key.expose(),
            Some(credentials.session_token.clone()),
            None,
            PROVIDER_NAME,
        );
        let config = aws_sdk_sts::config::Builder::from(&self.sdk_config)
            .credentials_provider(static_creds)
            .build();
        let sts = aws_sdk_sts::Client::from_conf(config);

        let resp = sts.get_caller_identity().send().await.map_err(|e| {
            crate::error::Error::InvalidCredentialsError(describe_sdk_error(
                "GetCallerIdentity",
                e,
            ))
        })?;

        Ok(CallerIdentity {
            account: resp.account().map(ToOwned::to_owned),
            arn: resp.arn().map(ToOwned::to_owned),
            user_id: resp.user_id().map(ToOwned::to_owned),
        })
    }
}

/// Render an SDK error with its service error code when there is one
fn describe_sdk_error<E, R>(context: &str, err: aws_sdk_sts::error::SdkError<E, R>) -> String
where
    E: std::error::Error + aws_sdk_sts::error::ProvideErrorMetadata + 'static,
    R: std::fmt::Debug,
{
    use aws_sdk_sts::error::ProvideErrorMetadata;

    match (err.code(), err.message()) {
        (Some(code), Some(message)) => {
            format!("AWS STS says {code} for {context}: {message}")
        }
        (Some(code), None) => format!("AWS STS says {code} for {context}"),
        _ => format!(
            "AWS STS request for {context} failed: {}",
            aws_sdk_sts::error::DisplayErrorContext(&err)
        ),
    }
}
