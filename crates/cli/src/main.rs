use std::io::Write;

use anyhow::Context;

fn main() -> anyhow::Result<()> {
    stockplan_observability::init();

    let source = std::env::args().nth(1).unwrap_or_else(|| {
        tracing::warn!("no request path given; reading request from stdin");
        "-".to_string()
    });

    let config = stockplan_cli::HostConfig::from_env()?;
    let report = stockplan_cli::run(&source, &config)?;

    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &report).context("failed to write report")?;
    writeln!(stdout).context("failed to write report")?;
    Ok(())
}
