use clap::Parser;
use liturgist::utils::error::ErrorSeverity;
use liturgist::utils::{logger, validation::Validate};
use liturgist::{BulletinEngine, BulletinPipeline, CliConfig, LiturgistError, LocalStorage, Settings};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting liturgist");
    tracing::debug!("CLI config: {:?}", cli);

    let settings = match Settings::from_cli(&cli).and_then(|settings| settings.validate().map(|_| settings)) {
        Ok(settings) => settings,
        Err(e) => exit_with(e),
    };

    tracing::info!("Preparing bulletin for {}", settings.date);

    let pipeline = BulletinPipeline::new(LocalStorage::default(), settings);
    let engine = BulletinEngine::new(pipeline);

    match engine.run().await {
        Ok(Some(output_path)) => eprintln!("{} generated successfully", output_path),
        Ok(None) => {}
        Err(e) => exit_with(e),
    }
}

fn exit_with(e: LiturgistError) -> ! {
    tracing::error!(
        "liturgist failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::debug!("Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("{}", e.user_friendly_message());

    let exit_code = match e.severity() {
        ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
