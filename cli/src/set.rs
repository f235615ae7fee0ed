// SPDX-FileCopyrightText: 2021 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::common::{self, emit_error};
use anyhow::{Context, Result};
use clap::Parser;
use gpiosysfs::line::{LogicLevel, PinNumber, Value};
use gpiosysfs::Pin;
use log::debug;
use std::thread;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(alias("s"))]
pub struct Opts {
    /// The pin to set
    #[arg(value_name = "pin")]
    pin: PinNumber,

    /// The value to set
    ///
    /// May be 0|inactive|off|false or 1|active|on|true.
    #[arg(value_name = "value")]
    value: Value,

    /// Treat the pin as active-low when setting its value
    ///
    /// If not specified then the pin is set active-high.
    #[arg(short = 'l', long)]
    active_low: bool,

    /// The minimum time to hold the value before exiting
    ///
    /// The period is taken as milliseconds unless otherwise specified.
    #[arg(short = 'p', long, value_name = "period", value_parser = common::parse_duration)]
    hold_period: Option<Duration>,

    /// Unexport the pin before exiting
    ///
    /// The pin reverts to the kernel's control, so the value may not persist.
    #[arg(long)]
    cleanup: bool,

    #[command(flatten)]
    kernel_opts: common::KernelOpts,

    #[command(flatten)]
    emit: common::EmitOpts,
}

pub fn cmd(opts: &Opts) -> bool {
    match do_cmd(opts) {
        Ok(()) => true,
        Err(e) => {
            emit_error(&opts.emit, &e);
            false
        }
    }
}

fn do_cmd(opts: &Opts) -> Result<()> {
    let num = opts.pin;
    // the direction tokens set the physical level
    let initial = if opts.active_low {
        opts.value.not()
    } else {
        opts.value
    };
    let mut pin = Pin::open_output(
        opts.kernel_opts.kernel(),
        num,
        initial,
        opts.kernel_opts.retry(),
    )
    .with_context(|| format!("failed to open GPIO {num} as an output"))?;
    let level = LogicLevel::from(opts.active_low);
    pin.set_logic_level(level)
        .with_context(|| format!("failed to set GPIO {num} {level}"))?;
    if opts.active_low {
        pin.set_value(opts.value)
            .with_context(|| format!("failed to set value of GPIO {num}"))?;
    }
    if let Some(period) = opts.hold_period {
        debug!("holding GPIO {num} at {} for {period:?}", opts.value);
        thread::sleep(period);
    }
    common::release(pin, opts.cleanup)
}
