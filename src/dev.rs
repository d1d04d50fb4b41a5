//! Test doubles for the security token service and federation seams

#[derive(Default)]
pub struct FakeSts {
    assume_role_error: Option<String>,
    caller_identity_error: Option<String>,
    assume_role_requests: std::sync::Mutex<Vec<crate::client::AssumeRoleRequest>>,
    caller_identity_calls: std::sync::atomic::AtomicUsize,
}

impl FakeSts {
    /// Issues `(AK, SK, TOKEN)` and accepts any credentials
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reject_assume_role(mut self, code: &str) -> Self {
        self.assume_role_error = Some(code.to_owned());
        self
    }

    pub fn reject_caller_identity(mut self, code: &str) -> Self {
        self.caller_identity_error = Some(code.to_owned());
        self
    }

    pub fn assume_role_requests(&self) -> Vec<crate::client::AssumeRoleRequest> {
        self.assume_role_requests.lock().unwrap().clone()
    }

    pub fn caller_identity_calls(&self) -> usize {
        self.caller_identity_calls
            .load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl crate::client::SecurityTokenService for FakeSts {
    async fn assume_role(
        &self,
        request: &crate::client::AssumeRoleRequest,
    ) -> Result<crate::client::TemporaryCredentials, crate::error::Error> {
        self.assume_role_requests
            .lock()
            .unwrap()
            .push(request.clone());
        match self.assume_role_error {
            Some(ref code) => Err(crate::error::Error::RoleAssumptionError(format!(
                "AWS STS says {code} for AssumeRole"
            ))),
            None => Ok(crate::client::TemporaryCredentials::new(
                "AK", "SK", "TOKEN",
            )),
        }
    }

    async fn get_caller_identity(
        &self,
        credentials: &crate::client::TemporaryCredentials,
    ) -> Result<crate::client::CallerIdentity, crate::error::Error> {
        self.caller_identity_calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        match self.caller_identity_error {
            Some(ref code) => Err(crate::error::Error::InvalidCredentialsError(format!(
                "AWS STS says {code} for GetCallerIdentity"
            ))),
            None => Ok(crate::client::CallerIdentity {
                account: Some("123456789012".to_owned()),
                arn: Some(format!(
                    "arn:aws:sts::123456789012:assumed-role/Demo/{}",
                    credentials.access_key_id
                )),
                user_id: None,
            }),
        }
    }
}

pub struct FakeFederation {
    result: Result<String, String>,
    access_key_ids: std::sync::Mutex<Vec<String>>,
}

impl FakeFederation {
    pub fn returning(token: &str) -> Self {
        Self {
            result: Ok(token.to_owned()),
            access_key_ids: Default::default(),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_owned()),
            access_key_ids: Default::default(),
        }
    }

    pub fn calls(&self) -> usize {
        self.access_key_ids.lock().unwrap().len()
    }

    pub fn last_access_key_id(&self) -> Option<String> {
        self.access_key_ids.lock().unwrap().last().cloned()
    }
}

#[async_trait::async_trait]
impl crate::federation::Federation for FakeFederation {
    async fn get_signin_token(
        &self,
        credentials: &crate::client::TemporaryCredentials,
    ) -> Result<crate::federation::SigninToken, crate::error::Error> {
        self.access_key_ids
            .lock()
            .unwrap()
            .push(credentials.access_key_id.clone());
        match self.result {
            Ok(ref t) => Ok(crate::federation::SigninToken::new(t.as_str())),
            Err(ref m) => Err(crate::error::Error::TokenExchangeError(m.clone())),
        }
    }
}
