use super::*;
use config_manager::ConfigurationError;
use std::io;

#[test]
fn test_config_error_display() {
    let error: Error = ConfigurationError::MissingToken {
        key: "GITHUB_TOKEN".to_string(),
    }
    .into();
    assert_eq!(
        error.to_string(),
        "Configuration error: GitHub token is required. Please set the GITHUB_TOKEN environment variable."
    );
}

#[test]
fn test_core_error_is_transparent() {
    let error: Error = team_roller_core::Error::InvalidArguments("no names".to_string()).into();
    assert_eq!(error.to_string(), "Invalid arguments: no names");
}

#[test]
fn test_error_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Error>();
}

#[test]
fn test_invalid_arguments_error_display() {
    let error = Error::InvalidArguments("--repos is required".to_string());
    assert_eq!(error.to_string(), "Invalid arguments: --repos is required");
}

#[test]
fn test_write_file_error_display() {
    let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
    let error = Error::WriteFile(io_error);
    assert_eq!(error.to_string(), "Failed to write file.");
}

#[test]
fn test_stdout_flush_failed_error_display() {
    let error = Error::StdOutFlushFailed;
    assert_eq!(error.to_string(), "Failed to flush the std out buffer.");
}
