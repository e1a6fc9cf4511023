mod bootstrap;

use std::process::ExitCode;

use analyzer_core::settings::Settings;
use analyzer_runtime::{AnalysisOutcome, CallLogAnalyzer};
use anyhow::Result;
use clap::Parser;

fn main() -> ExitCode {
    let settings = Settings::parse();

    bootstrap::setup_logging(settings.log_level());

    tracing::debug!("Call Log Analyzer v{} starting", env!("CARGO_PKG_VERSION"));

    match run(settings) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            println!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

fn run(settings: Settings) -> Result<AnalysisOutcome> {
    let config = settings.load_config()?;
    tracing::debug!(
        "Threshold: {}s, Timezone: {}, PBX pattern: {}",
        config.active_call_seconds_threshold,
        config.timezone_name,
        config.pbx_id_pattern.as_str()
    );

    let analyzer = CallLogAnalyzer::new(settings.user, settings.csv_files, settings.output, config);
    Ok(analyzer.analyze()?)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
