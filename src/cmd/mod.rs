pub mod assume_role;
pub mod console_url;

/// Options shared by both commands
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// AWS region to use for STS; falls back to $AWS_DEFAULT_REGION, then the SDK default chain
    #[clap(long, env = "AWS_REGION")]
    region: Option<String>,
    /// Federation endpoint used for getSigninToken and login
    ///
    /// Default to https://signin.aws.amazon.com/federation
    #[clap(long)]
    federation_endpoint: Option<String>,
    /// Issuer parameter of the login URL; default to YourApp
    #[clap(long)]
    issuer: Option<String>,
    /// Console URL to land on after sign-in; default to https://console.aws.amazon.com/
    #[clap(long)]
    destination: Option<String>,
}

impl ConfigArgs {
    pub fn config(&self) -> Result<crate::config::Config, crate::error::Error> {
        crate::config::Config::new(crate::config::ConfigData {
            region: self.region.clone(),
            federation_endpoint: self.federation_endpoint.clone(),
            issuer: self.issuer.clone(),
            destination: self.destination.clone(),
        })
    }
}

/// Log to stderr; stdout carries the URL only. Filter via $RUST_LOG (default: warn)
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

pub(crate) fn print_url(out: &mut dyn std::io::Write, url: &str) -> Result<(), std::io::Error> {
    writeln!(out, "AWS Console Sign-in URL:")?;
    writeln!(out, "{url}")?;
    out.flush()
}

pub(crate) fn log_failure(e: &anyhow::Error) {
    let kind = e
        .downcast_ref::<crate::error::Error>()
        .map(|v| v.kind())
        .unwrap_or("other");
    tracing::error!(message = "Failed to generate console URL", error_kind = kind, error = %e);
}
