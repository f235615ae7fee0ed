// SPDX-FileCopyrightText: 2021 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::common::{self, emit_error};
use anyhow::{Context, Result};
use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser};
use gpiosysfs::line::{LogicLevel, PinNumber};
use gpiosysfs::sysfs;

#[derive(Debug, Parser)]
pub struct Opts {
    /// The pin to configure
    #[arg(value_name = "pin")]
    pin: PinNumber,

    /// Whether the pin is active-low
    ///
    /// May be true|false, yes|no, on|off or 1|0.
    #[arg(value_name = "active_low", action = ArgAction::Set, value_parser = BoolishValueParser::new())]
    active_low: bool,

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

// The pin is exported but not opened, so its direction is left as-is.
fn do_cmd(opts: &Opts) -> Result<()> {
    let num = opts.pin;
    let kernel = opts.kernel_opts.kernel();
    let retry = opts.kernel_opts.retry();
    let level = LogicLevel::from(opts.active_low);
    retry
        .run(|| sysfs::export(&kernel, num))
        .with_context(|| format!("failed to export GPIO {num}"))?;
    retry
        .run(|| sysfs::set_logic_level(&kernel, num, level))
        .with_context(|| format!("failed to set GPIO {num} {level}"))
}
