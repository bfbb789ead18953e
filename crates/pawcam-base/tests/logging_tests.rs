use log::{LevelFilter, Log};
use pawcam_base::logging::{
    FileLogger, StdoutLogger, init_file_logger, init_stdout_logger, resolve_max_level,
};
use std::fs;

fn record_args() -> log::MetadataBuilder<'static> {
    let mut builder = log::MetadataBuilder::new();
    builder.level(log::Level::Info).target("test");
    builder
}

#[test]
fn test_stdout_logger_implements_log_trait() {
    let logger = StdoutLogger;
    assert!(logger.enabled(&record_args().build()));

    let record = log::RecordBuilder::new()
        .level(log::Level::Info)
        .target("test")
        .file(Some("test.rs"))
        .line(Some(42))
        .args(format_args!("test message"))
        .build();
    logger.log(&record);
    logger.flush();
}

#[test]
fn test_file_logger_writes_to_file() {
    let test_dir =
        std::env::temp_dir().join(format!("pawcam-log-test-{}-write", std::process::id()));
    let _ = fs::remove_dir_all(&test_dir);

    let logger = FileLogger::new(&test_dir).expect("Failed to create FileLogger");
    assert!(test_dir.is_dir());

    let record = log::RecordBuilder::new()
        .level(log::Level::Error)
        .target("test")
        .file(Some("pipeline.rs"))
        .line(Some(100))
        .args(format_args!("inference failed"))
        .build();
    logger.log(&record);
    logger.flush();

    let entries: Vec<_> = fs::read_dir(&test_dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .collect();
    assert_eq!(entries.len(), 1, "Should have exactly one log file");

    let content = fs::read_to_string(entries[0].path()).unwrap();
    assert!(content.contains("[ERROR]"));
    assert!(content.contains("thread:"));
    assert!(content.contains("pipeline.rs:100"));
    assert!(content.contains("inference failed"));

    fs::remove_dir_all(&test_dir).ok();
}

#[test]
fn test_resolve_max_level_override() {
    assert_eq!(resolve_max_level(Some("warn")), LevelFilter::Warn);
    assert_eq!(resolve_max_level(Some(" TRACE ")), LevelFilter::Trace);
    assert_eq!(resolve_max_level(Some("off")), LevelFilter::Off);
}

#[test]
fn test_resolve_max_level_falls_back_to_build_default() {
    let default = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    assert_eq!(resolve_max_level(None), default);
    assert_eq!(resolve_max_level(Some("loud")), default);
}

#[test]
fn test_init_stdout_logger_sets_global_logger() {
    // set_logger only succeeds once per process; later calls are no-ops
    init_stdout_logger();
    assert!(log::logger().enabled(&record_args().build()));
    log::info!("Test message from global logger");
}

#[test]
fn test_init_file_logger_invalid_dir_returns_error() {
    let result = init_file_logger("/proc/nonexistent/path");
    assert!(result.is_err());
}
