//! sts:AssumeRole with a suffixed session name

static ROLE_ARN_RE: once_cell::sync::Lazy<regex::Regex> = once_cell::sync::Lazy::new(|| {
    regex::Regex::new(r"\Aarn:aws[a-z-]*:iam::[0-9]{12}:role/[A-Za-z0-9_+=,.@/-]+\z").unwrap()
});

static EXTERNAL_ID_RE: once_cell::sync::Lazy<regex::Regex> =
    once_cell::sync::Lazy::new(|| regex::Regex::new(r"\A[A-Za-z0-9_+=,.@:/-]{2,1224}\z").unwrap());

pub fn validate_role_arn(role_arn: &str) -> Result<(), crate::error::Error> {
    if ROLE_ARN_RE.is_match(role_arn) {
        Ok(())
    } else {
        Err(crate::error::Error::InvalidArgument(format!(
            "{role_arn:?} is not an IAM role ARN (arn:aws:iam::ACCOUNT:role/NAME)"
        )))
    }
}

pub fn validate_external_id(external_id: &str) -> Result<(), crate::error::Error> {
    if EXTERNAL_ID_RE.is_match(external_id) {
        Ok(())
    } else {
        Err(crate::error::Error::InvalidArgument(
            "external id must be 2-1224 characters of alphanumerics and '+=,.@:/-_'".to_string(),
        ))
    }
}

/// Build the AssumeRole request. Empty optional values are treated as absent.
pub fn build_request(
    role_arn: &str,
    session_label: &str,
    external_id: Option<&str>,
    policy: Option<String>,
) -> Result<crate::client::AssumeRoleRequest, crate::error::Error> {
    validate_role_arn(role_arn)?;
    crate::session::validate_label(session_label)?;
    let external_id = external_id.filter(|v| !v.is_empty());
    if let Some(v) = external_id {
        validate_external_id(v)?;
    }

    Ok(crate::client::AssumeRoleRequest {
        role_arn: role_arn.to_owned(),
        role_session_name: crate::session::with_random_suffix(session_label),
        external_id: external_id.map(ToOwned::to_owned),
        policy: policy.filter(|v| !v.is_empty()),
    })
}

/// Calls AssumeRole once. `policy` is the already loaded session policy body.
pub async fn assume_role(
    sts: &dyn crate::client::SecurityTokenService,
    role_arn: &str,
    session_label: &str,
    external_id: Option<&str>,
    policy: Option<String>,
) -> Result<crate::client::TemporaryCredentials, crate::error::Error> {
    let request = build_request(role_arn, session_label, external_id, policy)?;

    tracing::info!(
        message = "Assuming role",
        role_arn = %request.role_arn,
        role_session_name = %request.role_session_name,
        external_id = request.external_id.is_some(),
        policy = request.policy.is_some()
    );

    let credentials = sts.assume_role(&request).await.map_err(|e| match e {
        crate::error::Error::RoleAssumptionError(_) => e,
        other => crate::error::Error::RoleAssumptionError(other.to_string()),
    })?;

    tracing::info!(message = "Assumed role", role_arn = %request.role_arn, access_key_id = %credentials.access_key_id);
    Ok(credentials)
}
