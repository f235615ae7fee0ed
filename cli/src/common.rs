// SPDX-FileCopyrightText: 2021 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use anyhow::Context;
use clap::Parser;
use gpiosysfs::kernel::SYSFS_GPIO_ROOT;
use gpiosysfs::line::PinNumber;
use gpiosysfs::{Pin, Retry, Sysfs};
use std::path::PathBuf;
use std::time::Duration;

// common helper functions

pub fn init_logger(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::init_from_env(env_logger::Env::default().default_filter_or(level));
}

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum ParseDurationError {
    #[error("'{0}' unknown units - use 's', 'ms' or 'us'.")]
    Units(String),
    #[error("'{0}' must start with a digit")]
    NoDigits(String),
    #[error("'{0}' {1}")]
    ParseDigits(String, std::num::ParseIntError),
    #[error("'{0}' is too large")]
    Overflow(String),
}

pub fn parse_duration(s: &str) -> std::result::Result<Duration, ParseDurationError> {
    if s == "0" {
        return Ok(Duration::ZERO);
    }
    let t = match s.find(|c: char| !c.is_ascii_digit()) {
        Some(0) => return Err(ParseDurationError::NoDigits(s.into())),
        Some(n) => {
            let (num, units) = s.split_at(n);
            let t = num
                .parse::<u64>()
                .map_err(|e| ParseDurationError::ParseDigits(num.into(), e))?;
            let scale = match units {
                "us" => 1000,
                "ms" => 1000000,
                "s" => 1000000000,
                _ => return Err(ParseDurationError::Units(s.into())),
            };
            t.checked_mul(scale)
        }
        None => s
            .parse::<u64>()
            .map_err(|e| ParseDurationError::ParseDigits(s.into(), e))?
            .checked_mul(1000000),
    };
    t.map(Duration::from_nanos)
        .ok_or_else(|| ParseDurationError::Overflow(s.into()))
}

// common command line parser options

#[derive(Debug, Parser)]
/// Options controlling how pins are reached and provisioned.
pub struct KernelOpts {
    /// The number of attempts made at each step of provisioning a pin
    ///
    /// The kernel creates the pin control files asynchronously after an
    /// export, so early accesses may fail until the files are ready.
    #[arg(
        short = 'r',
        long,
        value_name = "attempts",
        env = "GPIOSYSFS_RETRIES",
        default_value_t = 1
    )]
    pub retries: u32,

    /// The period to wait between attempts
    ///
    /// The period is taken as milliseconds unless otherwise specified.
    #[arg(
        short = 'd',
        long,
        value_name = "period",
        env = "GPIOSYSFS_RETRY_DELAY",
        default_value = "0",
        value_parser = parse_duration
    )]
    pub retry_delay: Duration,

    /// The directory containing the sysfs GPIO control files
    #[arg(
        long,
        value_name = "path",
        env = "GPIOSYSFS_ROOT",
        default_value = SYSFS_GPIO_ROOT
    )]
    pub sysfs_root: PathBuf,
}

impl KernelOpts {
    pub fn kernel(&self) -> Sysfs {
        Sysfs::with_root(self.sysfs_root.clone())
    }

    pub fn retry(&self) -> Retry {
        Retry::new(self.retries, self.retry_delay)
    }
}

#[derive(Clone, Copy, Debug, Default, Parser)]
pub struct EmitOpts {
    #[arg(from_global)]
    pub verbose: bool,

    /// Emit output in JSON format
    #[cfg(feature = "json")]
    #[arg(long, group = "emit")]
    pub json: bool,
}

impl EmitOpts {
    #[cfg(feature = "json")]
    fn json(&self) -> bool {
        self.json
    }

    #[cfg(not(feature = "json"))]
    fn json(&self) -> bool {
        false
    }
}

pub fn emit_error(opts: &EmitOpts, e: &anyhow::Error) {
    let e_str = format_error(opts, e);
    if opts.json() {
        println!("{{\"error\":\"{e_str}\"}}");
        return;
    }
    eprintln!("{e_str}");
}

pub fn format_error(opts: &EmitOpts, e: &anyhow::Error) -> String {
    if opts.verbose {
        format!("{e:#}")
    } else {
        format!("{e}")
    }
}

/// Close the pin, unexporting it if `cleanup` is set.
pub fn release(pin: Pin, cleanup: bool) -> anyhow::Result<()> {
    if cleanup {
        let num: PinNumber = pin.number();
        pin.cleanup()
            .with_context(|| format!("failed to unexport GPIO {num}"))?;
    }
    Ok(())
}
