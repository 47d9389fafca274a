use lang_reduce::utils::error::EtlError;
use lang_reduce::utils::{logger, validation::Validate};
use lang_reduce::{CliConfig, EtlEngine, LanguagePipeline, LocalStorage, ReduceConfig};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse_normalized();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting lang-reduce");
    tracing::debug!("CLI config: {:?}", cli);

    // 合併設定並驗證
    let config = match cli.resolve().and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            exit_with(e)
        }
    };

    display_config_summary(&config, &cli);

    if cli.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(config.input_dir());
    let pipeline = LanguagePipeline::new(storage, config.clone());
    let engine = EtlEngine::new_with_monitoring(pipeline, cli.monitor);

    if cli.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no output will be written");
        match engine.dry_run().await {
            Ok(result) => {
                println!("🔍 Dry run complete:");
                println!("  Repositories: {}", result.total());
                println!("  Would be reduced: {}", result.reduced_count);
                if result.negative_other_count > 0 {
                    println!("  ⚠️ Negative \"Other\": {}", result.negative_other_count);
                }
                println!(
                    "  Output would be: {}",
                    std::path::Path::new(&config.input_path)
                        .with_file_name(&config.output_file_name)
                        .display()
                );
            }
            Err(e) => exit_with(e),
        }
        return;
    }

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Language lists reduced successfully!");
            println!("✅ Language lists reduced successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => exit_with(e),
    }
}

fn display_config_summary(config: &ReduceConfig, cli: &CliConfig) {
    tracing::debug!("📋 Configuration Summary:");
    tracing::debug!("  Input: {}", config.input_path);
    tracing::debug!("  Output name: {}", config.output_file_name);
    tracing::debug!("  Max items: {}", config.max_items);
    tracing::debug!("  Pretty: {}", config.pretty);
    if let Some(path) = &cli.config {
        tracing::debug!("  Config file: {}", path);
    }
}

fn exit_with(e: EtlError) -> ! {
    // 記錄詳細錯誤信息
    tracing::error!(
        "❌ Reduction failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    // 輸出用戶友好的錯誤信息
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    std::process::exit(e.severity().exit_code())
}
