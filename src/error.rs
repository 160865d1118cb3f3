//! Application error type.
//!
//! Every failure in `regfit` is terminal: the error travels up with `?` to
//! `main`, which prints the message and exits with the attached code.
//!
//! Exit codes:
//! - `2`: bad input (unreadable/malformed files, invalid parameters, length or
//!   column mismatches)
//! - `3`: not enough data left to work with
//! - `4`: numerical failure (rank-deficient systems, zero-variance features,
//!   non-finite results)

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub const INPUT: u8 = 2;
    pub const INSUFFICIENT_DATA: u8 = 3;
    pub const NUMERICAL: u8 = 4;

    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn input(message: impl Into<String>) -> Self {
        Self::new(Self::INPUT, message)
    }

    pub fn insufficient_data(message: impl Into<String>) -> Self {
        Self::new(Self::INSUFFICIENT_DATA, message)
    }

    pub fn numerical(message: impl Into<String>) -> Self {
        Self::new(Self::NUMERICAL, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
