use anyhow::{Context, Result};
use clap::Parser;
use slowpoke::config::ReportConfig;
use slowpoke::filter::TestFilter;
use slowpoke::report::{Report, ReportStyles};
use slowpoke::{cli::Cli, input, reconstruct, stats};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Load the config file if given, then apply CLI overrides
fn load_config(args: &Cli) -> Result<ReportConfig> {
    let mut config = match &args.config {
        Some(path) => ReportConfig::from_file(path)?,
        None => ReportConfig::default(),
    };
    args.apply_to(&mut config);
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    let config = load_config(&args)?;

    let filter = match &args.filter {
        Some(pattern) => TestFilter::from_pattern(pattern)?,
        None => TestFilter::all(),
    };

    let lines = input::load_lines(&args.log)?;
    let mut durations = reconstruct::reconstruct(&lines);
    filter.apply(&mut durations);

    if durations.is_empty() {
        anyhow::bail!("No test data found in {}", args.log.display());
    }

    let statistics = stats::summarize(&durations)
        .with_context(|| format!("Failed to summarize {}", args.log.display()))?;
    let ranked = stats::rank_durations(&durations);

    let styles = ReportStyles::for_config(&config);
    let report = Report::new(&ranked, &statistics, &config);
    print!("{}", report.render(args.format, &styles)?);

    Ok(())
}
