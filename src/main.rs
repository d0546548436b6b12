use clap::Parser;
use registrar::app::commands;
use registrar::utils::{logger, validation::Validate};
use registrar::{Cli, JsonFileStorage, RegistrarConfig, RegistrarError, Session};

fn main() {
    let cli = Cli::parse();

    // 載入配置
    let mut config = match RegistrarConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => fail(&e),
    };
    config.apply_cli_overrides(&cli);

    // 初始化日誌
    let level = config.logging.level.as_deref();
    if config.uses_json_logs() {
        logger::init_json_logger(cli.verbose, level);
    } else {
        logger::init_cli_logger(cli.verbose, level);
    }

    if cli.verbose {
        tracing::debug!("Config: {:?}", config);
    }

    // 驗證配置與參數
    if let Err(e) = config.validate().and_then(|_| cli.validate()) {
        tracing::error!("❌ Validation failed: {}", e);
        fail(&e);
    }

    let storage = JsonFileStorage::new(&config.database.path)
        .with_corrupt_policy(config.database.on_corrupt);
    let default_format = config.display.format;

    match Session::run(storage, |document| {
        commands::execute(&cli.command, document, default_format)
    }) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            tracing::debug!(
                "Command failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());

            let exit_code = e.exit_code();
            if exit_code > 0 {
                eprintln!("💡 建議: {}", e.recovery_suggestion());
                std::process::exit(exit_code);
            }
        }
    }
}

fn fail(e: &RegistrarError) -> ! {
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());
    std::process::exit(e.exit_code().max(1));
}
