use std::process::ExitCode;

mod cli;
mod config;
mod gateways;

fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    cli::run()
}
