//! Error types for shift-stepper.
//!
//! Provides unified error handling across configuration, register output,
//! motor execution, and target geometry.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all shift-stepper operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Shift register or register image error
    Register(RegisterError),
    /// Motor worker or rotation error
    Motor(MotorError),
    /// Target geometry could not be resolved
    Geometry(GeometryError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Motor name not found in configuration
    MotorNotFound(heapless::String<32>),
    /// Register width must be a multiple of 8 in 8..=64
    InvalidBitWidth(u32),
    /// More motors configured than the register has windows for
    TooManyMotors {
        /// Number of configured motors
        motors: usize,
        /// Number of 4-bit windows in the register
        capacity: usize,
    },
    /// Steps per revolution must be > 0
    InvalidStepsPerRevolution(u32),
    /// Inter-step delay must be > 0
    InvalidStepDelay(u32),
    /// Cylinder radius must be positive and finite
    InvalidRadius(f64),
    /// A required builder field was not provided
    MissingField(&'static str),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Register output errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterError {
    /// A data, clock, or latch pin operation failed
    PinError,
    /// Every 4-bit window of the register is already assigned
    WindowsExhausted {
        /// Number of windows the register provides
        capacity: u32,
    },
    /// The register image lock was poisoned by a panicking thread
    Poisoned,
}

/// Motor worker and rotation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum MotorError {
    /// The motor's worker thread could not be started
    SpawnFailed,
    /// The motor's worker thread is no longer running
    WorkerUnavailable,
    /// The angle guard was poisoned by a panicking thread
    Poisoned,
    /// The requested delta is not finite or needs more than `u32::MAX` steps
    OutOfRange {
        /// Requested delta in degrees
        delta: f64,
    },
    /// A rotation stopped partway because the register could not be driven
    Aborted {
        /// Steps already applied (reflected in the motor angle)
        completed: u32,
        /// Steps the rotation was planned to take
        planned: u32,
        /// Underlying register failure
        cause: RegisterError,
    },
}

/// Target geometry errors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeometryError {
    /// Target and self coincide on the cylinder, so elevation is undefined
    DegenerateChord {
        /// Computed chord length
        chord: f64,
    },
    /// An input or intermediate value was NaN or infinite
    NonFinite,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Register(e) => write!(f, "Register error: {}", e),
            Error::Motor(e) => write!(f, "Motor error: {}", e),
            Error::Geometry(e) => write!(f, "Geometry error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::MotorNotFound(name) => write!(f, "Motor '{}' not found", name),
            ConfigError::InvalidBitWidth(v) => {
                write!(
                    f,
                    "Invalid register width: {}. Must be a multiple of 8 in 8..=64",
                    v
                )
            }
            ConfigError::TooManyMotors { motors, capacity } => {
                write!(
                    f,
                    "{} motors configured but the register only has {} windows",
                    motors, capacity
                )
            }
            ConfigError::InvalidStepsPerRevolution(v) => {
                write!(f, "Invalid steps per revolution: {}. Must be > 0", v)
            }
            ConfigError::InvalidStepDelay(v) => {
                write!(f, "Invalid step delay: {} us. Must be > 0", v)
            }
            ConfigError::InvalidRadius(v) => {
                write!(f, "Invalid cylinder radius: {}. Must be > 0", v)
            }
            ConfigError::MissingField(field) => write!(f, "{} is required", field),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for RegisterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegisterError::PinError => write!(f, "Shift register pin operation failed"),
            RegisterError::WindowsExhausted { capacity } => {
                write!(f, "All {} register windows are assigned", capacity)
            }
            RegisterError::Poisoned => write!(f, "Register image lock poisoned"),
        }
    }
}

impl fmt::Display for MotorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorError::SpawnFailed => write!(f, "Failed to start motor worker"),
            MotorError::WorkerUnavailable => write!(f, "Motor worker is not running"),
            MotorError::Poisoned => write!(f, "Motor angle lock poisoned"),
            MotorError::OutOfRange { delta } => {
                write!(
                    f,
                    "Rotation of {} degrees is outside the steppable range",
                    delta
                )
            }
            MotorError::Aborted {
                completed,
                planned,
                cause,
            } => {
                write!(
                    f,
                    "Rotation aborted after {} of {} steps: {}",
                    completed, planned, cause
                )
            }
        }
    }
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::DegenerateChord { chord } => {
                write!(
                    f,
                    "Chord length {} too small to resolve an elevation",
                    chord
                )
            }
            GeometryError::NonFinite => write!(f, "Non-finite value in angle computation"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<RegisterError> for Error {
    fn from(e: RegisterError) -> Self {
        Error::Register(e)
    }
}

impl From<MotorError> for Error {
    fn from(e: MotorError) -> Self {
        Error::Motor(e)
    }
}

impl From<GeometryError> for Error {
    fn from(e: GeometryError) -> Self {
        Error::Geometry(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for RegisterError {}

#[cfg(feature = "std")]
impl std::error::Error for MotorError {}

#[cfg(feature = "std")]
impl std::error::Error for GeometryError {}
