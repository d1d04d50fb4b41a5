#[derive(clap::Args, Debug)]
pub struct AssumeRoleArgs {
    /// ARN of the role to assume
    #[clap(value_parser)]
    role_arn: String,
    /// Name for the role session
    ///
    /// A random 6-character suffix is appended (`<name>-<suffix>`), so at most 57 characters.
    #[clap(value_parser)]
    role_session_name: String,
    /// External ID for role assumption; optional
    #[clap(long)]
    external_id: Option<String>,
    /// Path to JSON file containing session policy; sent as-is
    #[clap(long, value_parser, conflicts_with = "session-policy-json")]
    session_policy_file: Option<std::path::PathBuf>,
    /// Session policy as JSON string
    #[clap(long)]
    session_policy_json: Option<String>,

    #[clap(flatten)]
    config: crate::cmd::ConfigArgs,
}

impl AssumeRoleArgs {
    fn session_policy(&self) -> Option<crate::policy::SessionPolicy> {
        crate::policy::SessionPolicy::from_args(
            self.session_policy_file.as_deref(),
            self.session_policy_json.as_deref(),
        )
    }

    /// Reads the policy file, if any. Done before any client is constructed.
    pub async fn load_session_policy(&self) -> Result<Option<String>, crate::error::Error> {
        match self.session_policy() {
            Some(p) => Ok(Some(p.load().await?)),
            None => Ok(None),
        }
    }
}

#[tokio::main]
pub async fn run(args: &AssumeRoleArgs) -> Result<(), anyhow::Error> {
    let _span = tracing::info_span!("assume_role").entered();

    let result: Result<(), anyhow::Error> = async {
        let config = args.config.config()?;
        let policy = args.load_session_policy().await?;

        let sts = crate::client::Client::new(config.region.as_deref()).await;
        tracing::debug!(message = "Using STS", region = ?sts.region());
        let federation = crate::federation::Client::new(config.federation_endpoint())?;

        let mut stdout = std::io::stdout().lock();
        execute(&sts, &federation, &config, args, policy, &mut stdout).await
    }
    .await;

    if let Err(ref e) = result {
        crate::cmd::log_failure(e);
    }
    result
}

pub async fn execute(
    sts: &dyn crate::client::SecurityTokenService,
    federation: &dyn crate::federation::Federation,
    config: &crate::config::Config,
    args: &AssumeRoleArgs,
    policy: Option<String>,
    out: &mut dyn std::io::Write,
) -> Result<(), anyhow::Error> {
    let credentials = crate::role::assume_role(
        sts,
        &args.role_arn,
        &args.role_session_name,
        args.external_id.as_deref(),
        policy,
    )
    .await?;

    let url = crate::console::generate_console_url(
        sts,
        federation,
        &credentials,
        &config.login_options(),
    )
    .await?;

    crate::cmd::print_url(out, &url)?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[derive(clap::Parser)]
    struct TestCli {
        #[clap(flatten)]
        args: AssumeRoleArgs,
    }

    fn parse(argv: &[&str]) -> Result<AssumeRoleArgs, clap::Error> {
        use clap::Parser;
        TestCli::try_parse_from(std::iter::once("assume-role-console").chain(argv.iter().copied()))
            .map(|c| c.args)
    }

    const ROLE_ARN: &str = "arn:aws:iam::123456789012:role/Demo";

    #[test]
    fn test_parse_minimal() {
        let args = parse(&[ROLE_ARN, "demo"]).unwrap();
        assert_eq!(args.role_arn, ROLE_ARN);
        assert_eq!(args.role_session_name, "demo");
        assert!(args.external_id.is_none());
        assert!(args.session_policy().is_none());
    }

    #[test]
    fn test_parse_policy_json() {
        let args = parse(&[ROLE_ARN, "demo", "--session-policy-json", "{}"]).unwrap();
        assert_eq!(
            args.session_policy(),
            Some(crate::policy::SessionPolicy::Inline("{}".to_string()))
        );
    }

    #[test]
    fn test_parse_policy_both_rejected() {
        let r = parse(&[
            ROLE_ARN,
            "demo",
            "--session-policy-file",
            "p.json",
            "--session-policy-json",
            "{}",
        ]);
        assert_eq!(
            r.unwrap_err().kind(),
            clap::ErrorKind::ArgumentConflict
        );
    }

    #[test]
    fn test_parse_missing_positional() {
        assert!(parse(&[ROLE_ARN]).is_err());
    }

    #[tokio::test]
    async fn test_execute_end_to_end() {
        let args = parse(&[ROLE_ARN, "demo"]).unwrap();
        let config = args.config.config().unwrap();
        let sts = crate::dev::FakeSts::new();
        let federation = crate::dev::FakeFederation::returning("abc");
        let mut out = Vec::new();

        execute(&sts, &federation, &config, &args, None, &mut out)
            .await
            .unwrap();

        let out = String::from_utf8(out).unwrap();
        assert_eq!(
            out.lines().last().unwrap(),
            "https://signin.aws.amazon.com/federation?Action=login&Issuer=YourApp&Destination=https%3A%2F%2Fconsole.aws.amazon.com%2F&SigninToken=abc"
        );

        let reqs = sts.assume_role_requests();
        assert_eq!(reqs.len(), 1);
        assert_eq!(reqs[0].role_arn, ROLE_ARN);
        assert_eq!(reqs[0].external_id, None);
        assert_eq!(reqs[0].policy, None);
        assert_eq!(sts.caller_identity_calls(), 1);
        assert_eq!(federation.last_access_key_id().as_deref(), Some("AK"));
    }

    #[tokio::test]
    async fn test_execute_policy_file() {
        let dir = temp_dir::TempDir::with_prefix("assume-role-console-cmd").unwrap();
        let path = dir.path().join("policy.json");
        tokio::fs::write(&path, "{\"Version\": \"2012-10-17\"}\n")
            .await
            .unwrap();

        let args = parse(&[
            ROLE_ARN,
            "demo",
            "--external-id",
            "ext-123",
            "--session-policy-file",
            path.to_str().unwrap(),
        ])
        .unwrap();
        let config = args.config.config().unwrap();
        let policy = args.load_session_policy().await.unwrap();
        let sts = crate::dev::FakeSts::new();
        let federation = crate::dev::FakeFederation::returning("abc");

        execute(&sts, &federation, &config, &args, policy, &mut Vec::new())
            .await
            .unwrap();

        let reqs = sts.assume_role_requests();
        assert_eq!(reqs[0].external_id.as_deref(), Some("ext-123"));
        assert_eq!(
            reqs[0].policy.as_deref(),
            Some("{\"Version\": \"2012-10-17\"}\n")
        );
    }

    #[tokio::test]
    async fn test_execute_assume_role_failure_prints_nothing() {
        let args = parse(&[ROLE_ARN, "demo"]).unwrap();
        let config = args.config.config().unwrap();
        let sts = crate::dev::FakeSts::new().reject_assume_role("AccessDenied");
        let federation = crate::dev::FakeFederation::returning("abc");
        let mut out = Vec::new();

        let e = execute(&sts, &federation, &config, &args, None, &mut out)
            .await
            .unwrap_err();
        assert!(matches!(
            e.downcast_ref::<crate::error::Error>(),
            Some(crate::error::Error::RoleAssumptionError(_))
        ));
        assert!(out.is_empty());
        assert_eq!(sts.caller_identity_calls(), 0);
        assert_eq!(federation.calls(), 0);
    }

    #[test]
    fn test_run_missing_policy_file() {
        let dir = temp_dir::TempDir::with_prefix("assume-role-console-cmd").unwrap();
        let path = dir.path().join("missing.json");
        let args = parse(&[
            ROLE_ARN,
            "demo",
            "--session-policy-file",
            path.to_str().unwrap(),
        ])
        .unwrap();

        // fails while reading the file, before any AWS client exists
        let e = run(&args).unwrap_err();
        assert!(matches!(
            e.downcast_ref::<crate::error::Error>(),
            Some(crate::error::Error::PolicyFileReadError { .. })
        ));
    }
}
