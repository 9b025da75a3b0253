use clap::Parser;
use hospital_registry::utils::error::ErrorSeverity;
use hospital_registry::utils::{logger, validation::Validate};
use hospital_registry::{
    load_roster, render, CliConfig, DuplicatePolicy, FanoutSink, FileLogSink, HospitalError,
    RosterConfig, TracingSink,
};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting hospital-registry CLI");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(&config) {
        tracing::error!(
            "❌ Hospital registry failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }

    Ok(())
}

fn run(config: &CliConfig) -> Result<(), HospitalError> {
    config.validate()?;

    let mut roster = match &config.roster {
        Some(path) => {
            tracing::info!("📁 Loading roster from: {}", path);
            RosterConfig::from_file(path)?
        }
        None => {
            tracing::info!("No roster given, using the built-in demo roster");
            RosterConfig::demo()
        }
    };
    if config.lenient {
        roster.hospital.duplicate_policy = DuplicatePolicy::Ignore;
        tracing::info!("🔧 Duplicate IDs will be skipped");
    }
    roster.validate()?;

    let mut sink = FanoutSink::new().with(TracingSink);
    if let Some(path) = &config.log_file {
        sink = sink.with(FileLogSink::open(path)?);
        tracing::info!("📝 Appending registry events to: {}", path);
    }

    let (hospital, summary) = load_roster(&roster, sink)?;
    tracing::info!(
        "✅ Roster loaded: {} registered, {} skipped",
        summary.added,
        summary.ignored
    );

    println!("{}", render(&hospital, config.format)?);
    Ok(())
}
