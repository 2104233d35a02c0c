use clap::Parser;
use outreach::adapters::{dns::DnsMxResolver, sheet, smtp::SmtpMailer};
use outreach::core::deliver::DeliverabilityChecker;
use outreach::utils::{logger, validation::Validate};
use outreach::{CliConfig, Dispatcher, OutreachEngine, SmtpConfig};
use std::path::Path;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting outreach CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }

    let smtp = match SmtpConfig::from_env() {
        Ok(smtp) => smtp,
        Err(e) => {
            tracing::error!("SMTP configuration failed: {}", e);
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    // The only startup-fatal data operation: the sheet must be readable.
    let rows = sheet::load_rows(Path::new(&config.input))?;
    tracing::info!("Read {} rows from {}", rows.len(), config.input);

    let mailer = SmtpMailer::new(&smtp, Path::new(&config.resume))?;
    let checker = DeliverabilityChecker::new(DnsMxResolver::from_system());
    let dispatcher = Dispatcher::new(mailer, checker, config.concurrency);
    let engine = OutreachEngine::new(dispatcher);

    let summary = engine.run(rows).await;

    println!("\n{}", summary.report());
    Ok(())
}
