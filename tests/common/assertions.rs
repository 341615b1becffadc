//! Assertion macros with descriptive failure messages.

/// Assert that a command succeeded, printing its output otherwise.
#[macro_export]
macro_rules! assert_success {
    ($result:expr) => {
        assert!(
            $result.success,
            "Command failed with exit code {}.\nstdout:\n{}\nstderr:\n{}",
            $result.exit_code,
            $result.stdout,
            $result.stderr
        );
    };
}

/// Assert that a command failed.
#[macro_export]
macro_rules! assert_failure {
    ($result:expr) => {
        assert!(
            !$result.success,
            "Expected failure but command succeeded.\nstdout:\n{}",
            $result.stdout
        );
    };
}

/// Assert that stdout or stderr contains a substring.
#[macro_export]
macro_rules! assert_output_contains {
    ($result:expr, $needle:expr) => {
        let combined = $result.combined_output();
        assert!(
            combined.contains($needle),
            "Expected output to contain '{}'.\nOutput:\n{}",
            $needle,
            combined
        );
    };
}
