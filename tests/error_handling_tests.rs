use std::error::Error;
use termbridge::domain::config::ConsoleDefaults;
use termbridge::{
    SerialChannel, SessionConfig, SessionController, TermBridgeError, TermBridgeResult,
};

/// Error handling tests
#[cfg(test)]
mod error_handling_tests {
    use super::*;

    #[test]
    fn test_error_types() {
        let errors = vec![
            TermBridgeError::Closed { stream: "serial port" },
            TermBridgeError::Config { message: "Config error".to_string() },
            TermBridgeError::SerialRead(std::io::Error::new(std::io::ErrorKind::Other, "read")),
            TermBridgeError::SerialWrite(std::io::Error::new(std::io::ErrorKind::Other, "write")),
            TermBridgeError::LocalRead(std::io::Error::new(std::io::ErrorKind::Other, "stdin")),
            TermBridgeError::LocalWrite(std::io::Error::new(std::io::ErrorKind::Other, "stdout")),
            TermBridgeError::Output("Output error".to_string()),
        ];

        for error in errors {
            assert!(!error.to_string().is_empty(), "Error display should not be empty");
        }

        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TermBridgeError>();
    }

    #[test]
    fn test_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let error: TermBridgeError = io_error.into();
        assert!(matches!(error, TermBridgeError::Io(_)));
    }

    #[test]
    fn test_transport_faults_keep_their_cause() {
        let error = TermBridgeError::SerialRead(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "device unplugged",
        ));

        let source = error.source().expect("fault should carry its cause");
        assert_eq!(source.to_string(), "device unplugged");
    }

    #[test]
    fn test_result_type() {
        fn error_function() -> TermBridgeResult<String> {
            Err(TermBridgeError::Config { message: "Test error".to_string() })
        }

        let error = error_function();
        assert!(error.unwrap_err().to_string().contains("Configuration"));
    }

    #[test]
    fn test_open_error_names_the_port() {
        let config = SessionConfig::from_defaults("/dev/ttyNOPE42", &ConsoleDefaults::default());
        let error = SerialChannel::open(&config).err().expect("port should not open");

        assert!(error.to_string().contains("/dev/ttyNOPE42"));
        assert!(error.source().is_some());
    }

    #[tokio::test]
    async fn test_session_propagates_open_error() {
        let config = SessionConfig::from_defaults("/dev/ttyNOPE43", &ConsoleDefaults::default());
        let result = SessionController::new(config).run().await;

        match result {
            Err(TermBridgeError::Open { port, .. }) => assert_eq!(port, "/dev/ttyNOPE43"),
            other => panic!("expected open error, got {:?}", other),
        }
    }
}
