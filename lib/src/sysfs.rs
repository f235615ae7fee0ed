// SPDX-FileCopyrightText: 2021 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::kernel::Kernel;
use crate::line::{Direction, Edge, LogicLevel, PinNumber, Value};
use crate::{Error, Result, SysfsCall};
use log::debug;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::PathBuf;

/// The path to the directory the kernel creates for an exported pin.
pub fn pin_dir<K: Kernel>(kernel: &K, pin: PinNumber) -> PathBuf {
    kernel.root().join(format!("gpio{}", pin))
}

/// Export a pin from the kernel to userspace.
///
/// Does nothing if the pin is already exported.
///
/// The kernel populates the pin directory asynchronously, so the pin control
/// files may not be accessible immediately after this returns.
pub fn export<K: Kernel>(kernel: &K, pin: PinNumber) -> Result<()> {
    if kernel.exists(&pin_dir(kernel, pin)) {
        debug!("GPIO {} already exported", pin);
        return Ok(());
    }
    let path = kernel.root().join("export");
    write_attr(kernel, SysfsCall::Export, pin, path, pin.to_string())
}

/// Return an exported pin to the kernel.
pub fn unexport<K: Kernel>(kernel: &K, pin: PinNumber) -> Result<()> {
    let path = kernel.root().join("unexport");
    write_attr(kernel, SysfsCall::Unexport, pin, path, pin.to_string())
}

/// Set the direction of a pin.
///
/// For outputs the `initial` value, 0 or 1, is applied atomically with the
/// direction change.  It is ignored for inputs.
pub fn set_direction<K: Kernel>(
    kernel: &K,
    pin: PinNumber,
    direction: Direction,
    initial: u8,
) -> Result<()> {
    let token = match (direction, initial) {
        (Direction::Input, _) => "in",
        (Direction::Output, 0) => "low",
        (Direction::Output, 1) => "high",
        (Direction::Output, v) => {
            return Err(Error::InvalidArgument(format!(
                "invalid initial output value {}",
                v
            )))
        }
    };
    let path = pin_dir(kernel, pin).join("direction");
    write_attr(kernel, SysfsCall::SetDirection, pin, path, token)
}

/// Set the edges that generate interrupts for a pin.
pub fn set_edge_trigger<K: Kernel>(kernel: &K, pin: PinNumber, edge: Edge) -> Result<()> {
    let path = pin_dir(kernel, pin).join("edge");
    write_attr(kernel, SysfsCall::SetEdgeTrigger, pin, path, edge.as_str())
}

/// Set the polarity of a pin.
pub fn set_logic_level<K: Kernel>(kernel: &K, pin: PinNumber, level: LogicLevel) -> Result<()> {
    let token = match level {
        LogicLevel::ActiveHigh => "0",
        LogicLevel::ActiveLow => "1",
    };
    let path = pin_dir(kernel, pin).join("active_low");
    write_attr(kernel, SysfsCall::SetLogicLevel, pin, path, token)
}

/// Open the value file of a pin.
///
/// The file is opened read-only unless `writable`.
pub fn open_value<K: Kernel>(kernel: &K, pin: PinNumber, writable: bool) -> Result<K::Handle> {
    let path = pin_dir(kernel, pin).join("value");
    kernel
        .open(&path, writable)
        .map_err(|e| Error::KernelInterface(SysfsCall::OpenValue, pin, e))
}

/// Read the value of a pin from its open value file.
pub fn read_raw<H: Read + Seek>(pin: PinNumber, handle: &mut H) -> Result<Value> {
    let mut buf = [0; 1];
    handle
        .seek(SeekFrom::Start(0))
        .and_then(|_| handle.read_exact(&mut buf))
        .map_err(|e| Error::KernelInterface(SysfsCall::ReadValue, pin, e))?;
    match buf[0] {
        b'0' => Ok(Value::Inactive),
        b'1' => Ok(Value::Active),
        c => Err(Error::ProtocolViolation(c)),
    }
}

/// Write a value, 0 or 1, to the open value file of a pin.
///
/// Each write replaces the value, so the file is not rewound.
pub fn write_raw<H: Write>(pin: PinNumber, handle: &mut H, bit: u8) -> Result<()> {
    let buf = match bit {
        0 => b"0",
        1 => b"1",
        _ => {
            return Err(Error::InvalidArgument(format!(
                "invalid output value {}",
                bit
            )))
        }
    };
    handle
        .write_all(buf)
        .map_err(|e| Error::KernelInterface(SysfsCall::WriteValue, pin, e))
}

// Helper to write to pin control files.
fn write_attr<K: Kernel, D: AsRef<[u8]>>(
    kernel: &K,
    call: SysfsCall,
    pin: PinNumber,
    path: PathBuf,
    data: D,
) -> Result<()> {
    kernel
        .write(&path, data.as_ref())
        .map_err(|e| Error::KernelInterface(call, pin, e))
}
