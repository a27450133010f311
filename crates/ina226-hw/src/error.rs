//! Error types for the INA226 hardware library.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when interacting with the hardware.
#[derive(Error, Debug)]
pub enum Error {
    /// The numbered kernel I2C bus could not be opened.
    #[error("I2C bus {bus} unavailable: {source}")]
    BusUnavailable {
        bus: u8,
        #[source]
        source: rppal::i2c::Error,
    },

    /// I2C communication error.
    #[error("I2C error: {0}")]
    I2c(#[from] rppal::i2c::Error),

    /// The bus returned fewer bytes than requested.
    #[error("short I2C read: expected {expected} bytes, got {actual}")]
    ShortRead { expected: usize, actual: usize },
}
