//! Error types shared by synthesis, upload and export

/// Errors returned by waveform synthesis and custom train upload.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A synthesis input, slot id or channel index is out of range.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// The waveform does not fit into the device's custom train memory.
    #[error("waveform has {len} samples, device custom train memory holds at most {max}")]
    CapacityExceeded { len: usize, max: usize },

    /// The device implementation failed to transfer or program a value.
    #[error("device error: {0}")]
    Device(#[from] anyhow::Error),

    #[cfg(feature = "bounce")]
    #[error("wav export failed: {0}")]
    Wav(#[from] hound::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Wrap a device error, recovering a typed [`Error`] the device raised
    /// itself (for example its own capacity check).
    pub(crate) fn from_device(err: anyhow::Error) -> Self {
        match err.downcast::<Error>() {
            Ok(typed) => typed,
            Err(other) => Error::Device(other),
        }
    }

    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Error::InvalidParameter { .. })
    }

    pub fn is_capacity_exceeded(&self) -> bool {
        matches!(self, Error::CapacityExceeded { .. })
    }
}

/// Reject non-finite values and values not strictly greater than zero.
pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::invalid(name, format!("must be finite, got {}", value)));
    }
    if value <= 0.0 {
        return Err(Error::invalid(name, format!("must be greater than 0, got {}", value)));
    }
    Ok(())
}

/// Reject non-finite and negative values; zero is allowed.
pub(crate) fn require_non_negative(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::invalid(name, format!("must be finite, got {}", value)));
    }
    if value < 0.0 {
        return Err(Error::invalid(name, format!("must not be negative, got {}", value)));
    }
    Ok(())
}

pub(crate) fn require_finite(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::invalid(name, format!("must be finite, got {}", value)));
    }
    Ok(())
}
