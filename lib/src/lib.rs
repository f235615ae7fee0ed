// SPDX-FileCopyrightText: 2021 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A library for accessing GPIO lines on Linux platforms
//! using the sysfs GPIO interface.
//!
//! A line is exported, configured and opened as a [`Pin`], which can then
//! be read, if an input, or driven, if an output.
//!
//! To open and read an input pin:
//! ```no_run
//! # use gpiosysfs::Result;
//! use gpiosysfs::Pin;
//!
//! # fn main() -> Result<()> {
//! let mut pin = Pin::input(17)?;
//! let value = pin.read()?;
//! # Ok(())
//! # }
//! ```
//!
//! Exporting a line is asynchronous on the kernel side, so the control files
//! may not be available immediately.  A [`Retry`] policy can be provided to
//! wait them out:
//! ```no_run
//! # use gpiosysfs::Result;
//! use gpiosysfs::{line::Value, Pin, Retry};
//! use std::time::Duration;
//!
//! # fn main() -> Result<()> {
//! let retry = Retry::new(5, Duration::from_millis(50));
//! let mut led = Pin::output_with_retry(22, Value::Inactive, retry)?;
//! led.high()?;
//! led.cleanup()?;
//! # Ok(())
//! # }
//! ```
//!
//! All filesystem access goes through the [`Kernel`] trait, with [`Sysfs`]
//! being the implementation for the real `/sys/class/gpio` tree.
//!
//! [`Kernel`]: kernel::Kernel
//! [`Sysfs`]: kernel::Sysfs

use std::fmt;
use std::io;

/// The capability used to access the kernel's GPIO control files.
pub mod kernel;

/// Types specific to lines.
pub mod line;

mod pin;
pub use pin::{Pin, SETTLE_DELAY};

mod retry;
pub use retry::Retry;

/// Single shot operations on the sysfs GPIO control files.
///
/// These neither retry nor sleep, and hold no state beyond the
/// value file handle passed to them.
/// Most applications should use a [`Pin`] instead.
pub mod sysfs;

pub use kernel::Sysfs;

/// Errors returned by [`gpiosysfs`] functions.
///
/// [`gpiosysfs`]: crate
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An error returned when there is a problem with an argument.
    #[error("{0}")]
    InvalidArgument(String),

    /// The operation does not apply to the pin in its current state.
    #[error("{0}")]
    InvalidState(String),

    /// An error returned from accessing a sysfs control file.
    #[error("sysfs {0} for GPIO {1} returned: {2}")]
    KernelInterface(SysfsCall, line::PinNumber, #[source] io::Error),

    /// The value file contained something other than '0' or '1'.
    #[error("read unexpected value {0:#04x} from value file")]
    ProtocolViolation(u8),
}

/// Identifiers for the underlying sysfs operations.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SysfsCall {
    Export,
    OpenValue,
    ReadValue,
    SetDirection,
    SetEdgeTrigger,
    SetLogicLevel,
    Unexport,
    WriteValue,
}

impl fmt::Display for SysfsCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SysfsCall::Export => "export",
            SysfsCall::OpenValue => "open_value",
            SysfsCall::ReadValue => "read_value",
            SysfsCall::SetDirection => "set_direction",
            SysfsCall::SetEdgeTrigger => "set_edge_trigger",
            SysfsCall::SetLogicLevel => "set_logic_level",
            SysfsCall::Unexport => "unexport",
            SysfsCall::WriteValue => "write_value",
        };
        write!(f, "{}", name)
    }
}

/// The result for [`gpiosysfs`] functions.
///
/// [`gpiosysfs`]: crate
pub type Result<T> = std::result::Result<T, Error>;
