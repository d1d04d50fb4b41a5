#[derive(clap::Args)]
pub struct ConsoleUrlArgs {
    /// AccessKeyId of temporary credentials
    #[clap(value_parser)]
    access_key_id: String,
    /// SecretAccessKey of temporary credentials
    #[clap(value_parser)]
    secret_access_key: String,
    /// SessionToken of temporary credentials
    #[clap(value_parser)]
    session_token: String,

    #[clap(flatten)]
    config: crate::cmd::ConfigArgs,
}

impl ConsoleUrlArgs {
    fn credentials(&self) -> crate::client::TemporaryCredentials {
        crate::client::TemporaryCredentials::new(
            self.access_key_id.as_str(),
            self.secret_access_key.as_str(),
            self.session_token.as_str(),
        )
    }
}

#[tokio::main]
pub async fn run(args: &ConsoleUrlArgs) -> Result<(), anyhow::Error> {
    let _span = tracing::info_span!("console_url").entered();

    let result: Result<(), anyhow::Error> = async {
        let config = args.config.config()?;
        let sts = crate::client::Client::new(config.region.as_deref()).await;
        let federation = crate::federation::Client::new(config.federation_endpoint())?;

        let mut stdout = std::io::stdout().lock();
        execute(&sts, &federation, &config, args, &mut stdout).await
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
    args: &ConsoleUrlArgs,
    out: &mut dyn std::io::Write,
) -> Result<(), anyhow::Error> {
    let url = crate::console::generate_console_url(
        sts,
        federation,
        &args.credentials(),
        &config.login_options(),
    )
    .await?;

    crate::cmd::print_url(out, &url)?;
    Ok(())
}
