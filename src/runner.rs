use anyhow::Context;
use std::io::IsTerminal;
use std::sync::Arc;

use crate::cli::Cli;
use crtsh_hunter::{CrtShClient, DnsResolver, Pipeline, StartupError};

fn init_logging(cli: &Cli) {
    // Keep external crates quiet; stdout is reserved for results so everything goes to stderr.
    use tracing_subscriber::EnvFilter;
    let filter_str = if cli.silent {
        "off".to_string()
    } else {
        let crate_level = if cli.debug { "debug" } else if cli.verbose { "info" } else { "warn" };
        format!(
            "crtsh_hunter={crate},reqwest=warn,hyper=warn,hickory_proto=warn,hickory_resolver=warn",
            crate = crate_level
        )
    };
    let env_filter = EnvFilter::try_new(&filter_str).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

pub async fn run_from_cli(cli: Cli) -> anyhow::Result<()> {
    init_logging(&cli);

    // domains must arrive through a pipe or a redirected file
    if std::io::stdin().is_terminal() {
        return Err(StartupError::InteractiveStdin.into());
    }

    let config = cli.to_config();
    tracing::info!(runners = config.runners, wildcards = config.print_wildcards, online = config.online_only, "configuration loaded");

    let source = CrtShClient::from_config(&config).context("failed to build http client")?;
    let mut pipeline = Pipeline::new(config.clone(), Arc::new(source));
    if config.online_only {
        pipeline = pipeline.with_resolver(Arc::new(DnsResolver::new(config.dns_timeout)));
    }

    let input = tokio::io::BufReader::new(tokio::io::stdin());
    let (summary, _stdout) = pipeline.run(input, tokio::io::stdout()).await?;

    tracing::info!(
        domains = summary.domains_queued,
        fetch_failures = summary.fetch_failures,
        received = summary.names_received,
        duplicates = summary.duplicates,
        wildcards = summary.wildcards_suppressed,
        offline = summary.offline,
        resolve_failures = summary.resolve_failures,
        printed = summary.printed,
        "run complete"
    );
    Ok(())
}
