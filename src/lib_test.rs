use super::*;

#[test]
fn logger_init_failed_message_includes_cause() {
    assert_eq!(
        logger_init_failed_message(&"logger already set"),
        "console logger init failed, continuing without logs: logger already set"
    );
}
