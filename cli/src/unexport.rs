// SPDX-FileCopyrightText: 2021 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::common::{self, emit_error};
use anyhow::Context;
use clap::Parser;
use gpiosysfs::line::PinNumber;
use gpiosysfs::sysfs;
use log::debug;

#[derive(Debug, Parser)]
#[command(alias("u"))]
pub struct Opts {
    /// The pins to unexport
    #[arg(value_name = "pin", required = true)]
    pin: Vec<PinNumber>,

    #[command(flatten)]
    kernel_opts: common::KernelOpts,

    #[command(flatten)]
    emit: common::EmitOpts,
}

pub fn cmd(opts: &Opts) -> bool {
    let kernel = opts.kernel_opts.kernel();
    let mut ok = true;
    for &num in &opts.pin {
        match sysfs::unexport(&kernel, num)
            .with_context(|| format!("failed to unexport GPIO {num}"))
        {
            Ok(()) => debug!("GPIO {num} unexported"),
            Err(e) => {
                emit_error(&opts.emit, &e);
                ok = false;
            }
        }
    }
    ok
}
