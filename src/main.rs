//! `prfeedback` 바이너리 진입점.

use prfeedback::interface::cli::{AppComposition, Cli, CliAction};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let composition = AppComposition::default();

    match Cli::parse_action() {
        CliAction::InspectConfig => match composition.inspect_config_usecase().execute() {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("error: {err:#}");
                std::process::exit(1);
            }
        },
        CliAction::Publish(options) => {
            if let Err(err) = composition
                .comment_per_file_usecase()
                .execute(options)
                .await
            {
                eprintln!("error: {err:#}");
                std::process::exit(1);
            }
        }
    }
}
