//! Credential validation and console sign-in URL generation

/// Identity check with the candidate credentials; keeps the failure reason
pub async fn probe_credentials(
    sts: &dyn crate::client::SecurityTokenService,
    credentials: &crate::client::TemporaryCredentials,
) -> Result<crate::client::CallerIdentity, crate::error::Error> {
    let identity = sts.get_caller_identity(credentials).await.map_err(|e| match e {
        crate::error::Error::InvalidCredentialsError(_) => e,
        other => crate::error::Error::InvalidCredentialsError(other.to_string()),
    })?;
    tracing::debug!(message = "Credentials are valid", access_key_id = %credentials.access_key_id, arn = ?identity.arn, account = ?identity.account);
    Ok(identity)
}

/// `true` only when the identity check succeeds
pub async fn validate_credentials(
    sts: &dyn crate::client::SecurityTokenService,
    credentials: &crate::client::TemporaryCredentials,
) -> bool {
    match probe_credentials(sts, credentials).await {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!(message = "Credential validation failed", access_key_id = %credentials.access_key_id, error = %e);
            false
        }
    }
}

/// Validate, exchange for a sign-in token, and build the login URL. No step is retried.
pub async fn generate_console_url(
    sts: &dyn crate::client::SecurityTokenService,
    federation: &dyn crate::federation::Federation,
    credentials: &crate::client::TemporaryCredentials,
    options: &crate::federation::LoginOptions,
) -> Result<String, crate::error::Error> {
    let _identity = probe_credentials(sts, credentials).await?;

    let token = federation.get_signin_token(credentials).await?;
    tracing::info!(message = "Obtained signin token", access_key_id = %credentials.access_key_id, endpoint = %options.endpoint);

    Ok(crate::federation::login_url(options, &token))
}
