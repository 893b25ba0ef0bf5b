use std::time::Duration;

use clap::error::ErrorKind as ClapErrorKind;
use clap::Parser;

use svcctl::controller::{Controller, DEFAULT_POLL_INTERVAL};
use svcctl::dbus::SystemdControl;
use svcctl::{ControlError, Outcome, Request};

#[derive(Parser)]
#[command(name = "svcctl")]
#[command(version)]
#[command(about = "Start or stop a systemd service and wait for it to settle")]
#[command(
    long_about = "svcctl starts or stops one service and waits up to --timeout seconds \
    for it to reach the target state. It always prints exactly one JSON record \
    {\"success\", \"message\", \"exitCode\"} and exits with exitCode."
)]
struct Args {
    /// Action to perform: start or stop (case-insensitive)
    #[arg(short, long)]
    action: String,

    /// Service name or glob (e.g., "nginx", "nginx.service", "php*-fpm")
    #[arg(short, long)]
    service_name: String,

    /// Seconds to wait for the target state (at least 1)
    #[arg(short, long, allow_negative_numbers = true)]
    timeout: i64,

    /// Control the user service manager instead of the system one
    #[arg(long)]
    user: bool,

    /// Delay between status polls while waiting
    #[arg(long, default_value_t = DEFAULT_POLL_INTERVAL.as_millis() as u64)]
    poll_interval_ms: u64,

    /// Narrate progress on stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let outcome = match Args::try_parse() {
        Ok(args) => {
            init_logging(args.verbose);
            run(args).await
        }
        Err(e) if matches!(e.kind(), ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            init_logging(false);
            let message = usage_message(&e.render().to_string());
            log::error!("{}", e);
            Outcome::failure(&ControlError::Usage(message))
        }
    };

    println!("{}", outcome.to_json());
    std::process::exit(outcome.exit_code());
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

async fn run(args: Args) -> Outcome {
    // Nothing touches the bus until the request is valid
    let request = match Request::new(&args.action, &args.service_name, args.timeout) {
        Ok(request) => request,
        Err(e) => {
            log::error!("{}", e);
            return Outcome::failure(&e);
        }
    };

    let control = match SystemdControl::connect(args.user).await {
        Ok(control) => control,
        Err(e) => {
            log::error!("Failed to connect to the service manager: {}", e);
            return Outcome::failure(&e);
        }
    };

    Controller::new(control)
        .with_poll_interval(Duration::from_millis(args.poll_interval_ms))
        .run(&request)
        .await
}

/// Clap's error text up to the first blank line, on one line
fn usage_message(rendered: &str) -> String {
    let message = rendered
        .lines()
        .map(str::trim)
        .take_while(|line| !line.is_empty() && !line.starts_with("Usage:"))
        .collect::<Vec<_>>()
        .join(" ");
    message
        .strip_prefix("error: ")
        .unwrap_or(&message)
        .to_string()
}
