use std::env;
use std::fmt::Display;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// Fatal errors go straight to stderr, outside the RUST_LOG filter.
fn report_fatal(err: impl Display) -> ExitCode {
    eprintln!("error: {err}");
    ExitCode::FAILURE
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let raw_args: Vec<String> = env::args().collect();
    if raw_args.get(1).map(|s| s.as_str()) == Some("serve") {
        let port = raw_args
            .get(2)
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(8080);
        return match cashcycle::api::run_http_server(port).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => report_fatal(format!("server error: {e}")),
        };
    }

    match cashcycle::api::run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report_fatal(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cashcycle::api::{CliError, InputError};

    #[test]
    fn server_and_cli_failures_share_the_fatal_exit_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::AddrInUse, "port taken");
        assert_eq!(
            report_fatal(format!("server error: {io_err}")),
            ExitCode::FAILURE
        );

        let cli_err = CliError::from(InputError::Roas(-1.0));
        assert_eq!(report_fatal(cli_err), ExitCode::FAILURE);
    }
}
