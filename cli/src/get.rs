// SPDX-FileCopyrightText: 2021 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::common::{self, format_error, EmitOpts};
use anyhow::{Context, Result};
use clap::Parser;
use gpiosysfs::line::{LogicLevel, PinNumber, Value};
use gpiosysfs::Pin;
#[cfg(feature = "serde")]
use serde_derive::Serialize;

#[derive(Debug, Parser)]
#[command(alias("g"))]
pub struct Opts {
    /// The pins to get
    #[arg(value_name = "pin", required = true)]
    pin: Vec<PinNumber>,

    /// Treat the pins as active-low when determining value
    ///
    /// If not specified then the pins are set active-high.
    #[arg(short = 'l', long)]
    active_low: bool,

    /// Display pin values as '0' (inactive) or '1' (active)
    #[arg(long, group = "emit")]
    pub numeric: bool,

    /// Unexport the pins after reading them
    #[arg(long)]
    cleanup: bool,

    #[command(flatten)]
    kernel_opts: common::KernelOpts,

    #[command(flatten)]
    emit: common::EmitOpts,
}

pub fn cmd(opts: &Opts) -> bool {
    let res = do_cmd(opts);
    res.emit(opts);
    res.errors.is_empty()
}

fn do_cmd(opts: &Opts) -> CmdResult {
    let mut res = CmdResult::default();
    for &num in &opts.pin {
        if res.values.iter().any(|pv| pv.pin == num) {
            continue;
        }
        match get_value(opts, num) {
            Ok(value) => res.values.push(PinValue { pin: num, value }),
            Err(e) => res.push_error(&opts.emit, &e),
        }
    }
    res
}

fn get_value(opts: &Opts, num: PinNumber) -> Result<Value> {
    let mut pin = Pin::open_input(opts.kernel_opts.kernel(), num, opts.kernel_opts.retry())
        .with_context(|| format!("failed to open GPIO {num} as an input"))?;
    let level = LogicLevel::from(opts.active_low);
    pin.set_logic_level(level)
        .with_context(|| format!("failed to set GPIO {num} {level}"))?;
    let value = pin
        .read()
        .with_context(|| format!("failed to read value of GPIO {num}"))?;
    common::release(pin, opts.cleanup)?;
    Ok(value)
}

#[derive(Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
struct CmdResult {
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    values: Vec<PinValue>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    errors: Vec<String>,
}

impl CmdResult {
    fn emit(&self, opts: &Opts) {
        #[cfg(feature = "json")]
        if opts.emit.json {
            match serde_json::to_string(self) {
                Ok(s) => println!("{s}"),
                Err(e) => eprintln!("{e}"),
            }
            return;
        }
        self.print(opts);
    }

    fn push_error(&mut self, opts: &EmitOpts, e: &anyhow::Error) {
        self.errors.push(format_error(opts, e))
    }

    fn print(&self, opts: &Opts) {
        let print_values: Vec<String> = self
            .values
            .iter()
            .map(|pv| {
                if opts.numeric {
                    let v: u8 = pv.value.into();
                    format!("{}", v)
                } else {
                    format!("{}={}", pv.pin, pv.value)
                }
            })
            .collect();
        if !print_values.is_empty() {
            println!("{}", print_values.join(" "));
        }
        for e in &self.errors {
            eprintln!("{}", e);
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize))]
struct PinValue {
    pin: PinNumber,
    value: Value,
}
