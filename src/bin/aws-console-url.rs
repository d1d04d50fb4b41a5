/// Generate AWS Console federated sign-in URL from temporary credentials
#[derive(clap::Parser)]
#[clap(name = "aws-console-url", version, about)]
struct Cli {
    #[clap(flatten)]
    args: assume_role_console::cmd::console_url::ConsoleUrlArgs,
}

fn main() -> Result<(), anyhow::Error> {
    use clap::Parser;
    assume_role_console::cmd::init_tracing();
    let cli = Cli::parse();
    assume_role_console::cmd::console_url::run(&cli.args)
}
