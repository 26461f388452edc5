use clap::error::ErrorKind;
use clap::Parser;
use weather_agent_tester::cli::{Cli, USAGE_EXAMPLE};
use weather_agent_tester::{telemetry, Console, Tester};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.print()?;
            return Ok(());
        }
        Err(e) => usage_error(e.render()),
    };

    telemetry::init_tracing(&cli.log_level);

    let config = match cli.into_config() {
        Ok(config) => config,
        Err(e) => usage_error(e),
    };

    let console = Console::stdout(config.color);
    let tester = Tester::new(&config, console)?;
    let summary = tester.run_all().await;

    std::process::exit(summary.exit_code());
}

/// Usage problems go to stdout and exit 1.
fn usage_error(message: impl std::fmt::Display) -> ! {
    let message = message.to_string();
    println!("{}", message.trim_end());
    println!("{USAGE_EXAMPLE}");
    std::process::exit(1);
}
