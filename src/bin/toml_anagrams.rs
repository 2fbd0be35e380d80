use anagram_etl::config::toml_config::TomlConfig;
use anagram_etl::core::pipeline::file_pipeline;
use anagram_etl::core::{ConfigProvider, OverwritePolicy};
use anagram_etl::utils::{logger, validation::Validate};
use anagram_etl::EtlEngine;
use anyhow::Context;
use clap::Parser;
use std::path::Path;

#[derive(Parser)]
#[command(name = "toml-anagrams")]
#[command(about = "Anagram grouping driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "anagrams.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Override the result file from config
    #[arg(long)]
    result: Option<String>,

    /// Dry run - show what would be processed without executing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 載入 TOML 配置
    let mut config = TomlConfig::from_file(&args.config)
        .with_context(|| format!("Failed to load config file '{}'", args.config))?;

    // 初始化日誌：--verbose 優先，其次是設定檔的 log_level
    match (args.verbose, config.log_level()) {
        (true, _) => logger::init_cli_logger(true),
        (false, Some(level)) => logger::init_logger_with_level(level),
        (false, None) => logger::init_cli_logger(false),
    }

    tracing::info!("🚀 Starting TOML-based anagram tool");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 應用命令列覆蓋設定
    if let Some(result) = &args.result {
        config.output.result_path = result.clone();
        tracing::info!("🔧 Result file overridden to: {}", result);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.severity().exit_code().max(1));
    }

    tracing::info!("✅ Configuration loaded and validated successfully");
    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No actual processing will occur");
        perform_dry_run(&config)?;
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let engine = EtlEngine::new_with_monitoring(file_pipeline(config), monitor_enabled);

    match engine.run().await {
        Ok(summary) => {
            tracing::info!("✅ Anagram grouping completed successfully!");
            println!(
                "✅ {} anagram lines from {} words in {} sources",
                summary.lines_written, summary.words_read, summary.sources_read
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

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  Sources: {}", config.sources().len());
    println!("  Result: {}", config.result_path());
    println!(
        "  Overwrite: {}",
        match config.overwrite_policy() {
            OverwritePolicy::Replace => "replace existing file",
            OverwritePolicy::Refuse => "refuse if file exists",
        }
    );
    println!("  Concurrency: {}", config.concurrent_sources());

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn perform_dry_run(config: &TomlConfig) -> anyhow::Result<()> {
    println!("🔍 Dry Run Analysis:");
    println!();

    println!("📄 Sources:");
    for source in config.sources() {
        let size = std::fs::metadata(source)
            .with_context(|| format!("Cannot inspect source '{}'", source))?
            .len();
        println!("  {} ({} bytes)", source, size);
    }

    println!();
    println!("💾 Result:");
    let result = Path::new(config.result_path());
    if result.exists() {
        match config.overwrite_policy() {
            OverwritePolicy::Replace => println!("  ⚠️ {} exists and will be replaced", result.display()),
            OverwritePolicy::Refuse => println!("  ❌ {} exists; the run would fail", result.display()),
        }
    } else {
        println!("  {} will be created", result.display());
    }

    println!();
    println!("⚙️ Effective configuration:");
    println!("{}", serde_json::to_string_pretty(config)?);

    println!();
    println!("✅ Dry run analysis complete. Use --verbose for more details during actual run.");

    Ok(())
}
