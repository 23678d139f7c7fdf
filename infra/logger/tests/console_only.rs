use atria_logger::{ConsoleFormat, LevelFilter, Logger};

#[test]
fn console_only_logger_has_no_file_guard() {
    let logger = Logger::builder()
        .name("studio-console-only")
        .console(Some(ConsoleFormat::Json))
        .level(LevelFilter::DEBUG)
        .init()
        .expect("logger should initialize");

    tracing::debug!(types = 4, "registry built");
    assert!(logger.guard().is_none(), "console-only logger should not create a file guard");
}
