use anyhow::Context;
use clap::Parser;
use connect_devkit::core::signal;
use connect_devkit::utils::{logger, validation::Validate};
use connect_devkit::{DevLauncher, LaunchOutcome, LauncherArgs, LauncherConfig, TokioSpawner};

fn print_banner(config: &LauncherConfig) {
    println!(
        r#"
🌟 Connect Development Server
=============================

Starting both:
- Agent API (LangGraph): {}
- React Frontend: {}

Press Ctrl+C to stop both servers.
"#,
        config.api_url(),
        config.frontend_url()
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = LauncherArgs::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    let config = args.resolve().context("failed to load launcher settings")?;
    tracing::debug!("Launcher config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    // 先註冊訊號處理，再啟動任何子程序
    let interrupts = signal::Interrupts::install();

    print_banner(&config);

    let launcher = DevLauncher::new(TokioSpawner, config.launch_plan());
    let report = launcher.run(interrupts.recv()).await;

    match report.outcome {
        LaunchOutcome::BothExited | LaunchOutcome::Interrupted => Ok(()),
        LaunchOutcome::Errored(e) => {
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = e.exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
            Ok(())
        }
    }
}
