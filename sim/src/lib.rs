// SPDX-FileCopyrightText: 2022 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A library for creating simulated sysfs GPIO trees.
//!
//! A simulator is a directory laid out like `/sys/class/gpio`, containing
//! the `export` and `unexport` control files and a `gpioN` directory for
//! each exported line.  It lives in a temporary directory that is removed
//! when the [`Sim`] is dropped, so no special permissions are required.
//!
//! Simulators can be built using the [`Builder`].
//!
//! The simulator is passive, playing the part of the kernel only when told
//! to.  Writes to `export` are recorded but do not create the line
//! directory until [`Sim::export`] is called, and writes to `direction`
//! do not alter the `value` file.
//!
//! [`Builder`]: fn.builder.html

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// The number of a simulated line.
pub type PinNumber = u32;

/// A live simulated sysfs GPIO tree.
#[derive(Debug)]
pub struct Sim {
    dir: TempDir,
}

impl Sim {
    /// The directory standing in for `/sys/class/gpio`.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// The directory for a line.
    pub fn line_dir(&self, pin: PinNumber) -> PathBuf {
        self.root().join(format!("gpio{}", pin))
    }

    /// Create the directory and control files for a line, as the kernel
    /// does when a line is exported.
    ///
    /// The directory appears with all its control files in place.
    /// Does nothing if the line is already exported.
    pub fn export(&self, pin: PinNumber) -> Result<()> {
        let dir = self.line_dir(pin);
        if dir.exists() {
            return Ok(());
        }
        let staging = self.root().join(format!(".gpio{}", pin));
        fs::create_dir(&staging)?;
        write_attr(&staging, "direction", "in\n")?;
        write_attr(&staging, "edge", "none\n")?;
        write_attr(&staging, "active_low", "0\n")?;
        write_attr(&staging, "value", "0\n")?;
        fs::rename(staging, dir).map_err(Error::IoError)
    }

    /// Remove the directory for a line, as the kernel does when a line is
    /// unexported.
    pub fn unexport(&self, pin: PinNumber) -> Result<()> {
        let dir = self.line_dir(pin);
        if !dir.exists() {
            return Ok(());
        }
        fs::remove_dir_all(dir).map_err(Error::IoError)
    }

    /// Return true if the directory for a line exists.
    pub fn is_exported(&self, pin: PinNumber) -> bool {
        self.line_dir(pin).exists()
    }

    /// The line most recently written to the `export` file, if any.
    pub fn last_export(&self) -> Result<Option<PinNumber>> {
        self.last_request("export")
    }

    /// The line most recently written to the `unexport` file, if any.
    pub fn last_unexport(&self) -> Result<Option<PinNumber>> {
        self.last_request("unexport")
    }

    fn last_request(&self, file: &str) -> Result<Option<PinNumber>> {
        let req = read_attr(self.root(), file)?;
        if req.is_empty() {
            return Ok(None);
        }
        req.parse::<PinNumber>()
            .map(Some)
            .map_err(|_| Error::UnexpectedValue(req))
    }

    /// The contents of the `direction` file of a line.
    pub fn direction(&self, pin: PinNumber) -> Result<String> {
        read_attr(&self.line_dir(pin), "direction")
    }

    /// The contents of the `edge` file of a line.
    pub fn edge(&self, pin: PinNumber) -> Result<String> {
        read_attr(&self.line_dir(pin), "edge")
    }

    /// The state of the `active_low` file of a line.
    pub fn active_low(&self, pin: PinNumber) -> Result<bool> {
        let val = read_attr(&self.line_dir(pin), "active_low")?;
        match val.as_str() {
            "0" => Ok(false),
            "1" => Ok(true),
            _ => Err(Error::UnexpectedValue(val)),
        }
    }

    /// Pull a line to simulate the line being externally driven.
    pub fn set_pull(&self, pin: PinNumber, pull: Level) -> Result<()> {
        let value = match pull {
            Level::Low => "0\n",
            Level::High => "1\n",
        };
        write_attr(&self.line_dir(pin), "value", value)
    }

    /// Pull a line up to simulate the line being externally driven high.
    pub fn pullup(&self, pin: PinNumber) -> Result<()> {
        self.set_pull(pin, Level::High)
    }

    /// Pull a line down to simulate the line being externally driven low.
    pub fn pulldown(&self, pin: PinNumber) -> Result<()> {
        self.set_pull(pin, Level::Low)
    }

    /// Replace the contents of the `value` file of a line.
    pub fn set_raw_value<D: AsRef<[u8]>>(&self, pin: PinNumber, data: D) -> Result<()> {
        write_attr(&self.line_dir(pin), "value", data)
    }

    /// Get the level most recently written to the `value` file of a line.
    ///
    /// Unlike the kernel, a regular file retains everything written to it,
    /// and an open value file is never rewound between writes, so the last
    /// byte written holds the current level.
    pub fn get_level(&self, pin: PinNumber) -> Result<Level> {
        let val = read_attr(&self.line_dir(pin), "value")?;
        match val.chars().last() {
            Some('0') => Ok(Level::Low),
            Some('1') => Ok(Level::High),
            _ => Err(Error::UnexpectedValue(val)),
        }
    }
}

/// Start building a sysfs GPIO simulator.
pub fn builder() -> Builder {
    Builder::default()
}

/// A builder of simulators.
///
/// Collects the configuration for the simulator, and then creates
/// the simulator when taken live.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Builder {
    /// Lines that are exported when the simulator goes live.
    pub exported: Vec<PinNumber>,
}

impl Builder {
    /// A convenience function to add an exported line to the configuration.
    pub fn with_exported(&mut self, pin: PinNumber) -> &mut Self {
        if !self.exported.contains(&pin) {
            self.exported.push(pin);
        }
        self
    }

    /// Take the builder config live and return the created simulator.
    pub fn live(&self) -> Result<Sim> {
        let dir = tempfile::Builder::new().prefix("gpiosysfs-sim").tempdir()?;
        let sim = Sim { dir };
        write_attr(sim.root(), "export", "")?;
        write_attr(sim.root(), "unexport", "")?;
        for pin in &self.exported {
            sim.export(*pin)?;
        }
        Ok(sim)
    }
}

/// The physical value of a line.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Level {
    /// The line is physically high.
    High,

    /// The line is physically low.
    Low,
}

// Helper to write to simulator attribute files.
fn write_attr<D: AsRef<[u8]>>(p: &Path, file: &str, data: D) -> Result<()> {
    let path = p.join(file);
    fs::write(path, data).map_err(Error::IoError)
}

// Helper to read from simulator attribute files.
fn read_attr(p: &Path, file: &str) -> Result<String> {
    let path = p.join(file);
    fs::read_to_string(path)
        .map(|s| s.trim().to_string())
        .map_err(Error::IoError)
}

/// The result for [`gpiosysfs_sim`] functions.
///
/// [`gpiosysfs_sim`]: crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by [`gpiosysfs_sim`] functions.
///
/// [`gpiosysfs_sim`]: crate
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An unexpected value was read from a simulator attribute file.
    #[error("Read unexpected attr value {0:?}")]
    UnexpectedValue(String),

    /// An IO error detected while accessing a simulator attribute file.
    #[error(transparent)]
    IoError(#[from] io::Error),
}
