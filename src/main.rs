use anagram_etl::config::CliConfig;
use anagram_etl::core::pipeline::file_pipeline;
use anagram_etl::utils::{logger, validation::Validate};
use anagram_etl::EtlEngine;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting anagram-etl CLI");

    // 補上預設路徑與 source=/result= 參數
    let config = config.resolve();
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.severity().exit_code().max(1));
    }

    for source in &config.sources {
        tracing::info!("📄 Source file: {}", source);
    }

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let engine = EtlEngine::new_with_monitoring(file_pipeline(config), monitor_enabled);

    match engine.run().await {
        Ok(summary) => {
            tracing::info!("✅ Anagram grouping completed successfully!");
            println!(
                "✅ {} anagram lines from {} words",
                summary.lines_written, summary.words_read
            );
            println!("📁 Result file: {}", summary.destination);
        }
        Err(e) => {
            tracing::error!(
                "❌ Anagram grouping failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            let exit_code = e.severity().exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
