use clap::Parser;
use course_enrollment::utils::error::ErrorSeverity;
use course_enrollment::utils::{logger, validation::Validate};
use course_enrollment::{CliConfig, Command, Console, EnrollError, LocalStorage, Session};
use std::io::{self, Write};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting course-enrollment");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 載入並驗證配置
    let config = match cli.resolve().and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };

    let storage = LocalStorage::new(config.storage.data_dir.clone());
    let (mut session, summary) = Session::open(storage, &config);
    tracing::debug!("Load summary: {:?}", summary);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        None => {
            let stdin = io::stdin();
            Console::new(&mut session, stdin.lock(), &mut out).run()?;
        }
        Some(Command::Show { course }) => match session.course_details(*course) {
            Some(details) => write!(out, "{}", details)?,
            None => {
                eprintln!("❌ No course number {}", course);
                std::process::exit(1);
            }
        },
        Some(Command::Free) => write!(out, "{}", session.free_places())?,
        Some(Command::Enrollments) => write!(out, "{}", session.enrollments())?,
        Some(Command::Report) => write!(out, "{}", session.cancellation_report())?,
        Some(command @ Command::Register { .. }) => {
            let Some(request) = command.registration_request() else {
                return Ok(());
            };
            match session.register(&request) {
                Ok(enrollment) => {
                    writeln!(out, "✅ Successfully registered for {}.", enrollment.course)?;
                    if !enrollment.persisted {
                        eprintln!("⚠️  Registration kept in memory only; saving failed");
                        std::process::exit(2);
                    }
                }
                Err(e) => {
                    eprintln!("❌ Registration Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

fn exit_with(e: &EnrollError) -> ! {
    tracing::error!(
        "❌ Startup failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
