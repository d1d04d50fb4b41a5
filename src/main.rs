/// Assume AWS role and generate console sign-in URL
#[derive(clap::Parser)]
#[clap(name = "assume-role-console", version, about)]
struct Cli {
    #[clap(flatten)]
    args: assume_role_console::cmd::assume_role::AssumeRoleArgs,
}

fn main() -> Result<(), anyhow::Error> {
    use clap::Parser;
    assume_role_console::cmd::init_tracing();
    let cli = Cli::parse();
    assume_role_console::cmd::assume_role::run(&cli.args)
}
