// SPDX-FileCopyrightText: 2021 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A command line tool for accessing GPIO pins via sysfs.

use clap::Parser;
use std::process::ExitCode;

mod active_low;
mod common;
mod edge;
mod get;
mod set;
mod unexport;

fn main() -> ExitCode {
    match Opts::try_parse() {
        Ok(opt) => {
            common::init_logger(opt.verbose);
            let res = match opt.cmd {
                Command::ActiveLow(cfg) => active_low::cmd(&cfg),
                Command::Edge(cfg) => edge::cmd(&cfg),
                Command::Get(cfg) => get::cmd(&cfg),
                Command::Set(cfg) => set::cmd(&cfg),
                Command::Unexport(cfg) => unexport::cmd(&cfg),
            };
            return if res {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            };
        }
        Err(e) => eprintln!("{e}"),
    }
    ExitCode::FAILURE
}

#[derive(Parser)]
#[command(
    name = "gpiosysfs",
    about = "A utility to control GPIO pins on Linux using the sysfs GPIO interface.",
    version,
    propagate_version = true
)]
struct Opts {
    /// Provide more detailed error messages and log provisioning steps.
    #[arg(short = 'v', long, global = true, display_order = 800)]
    pub verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Parser)]
enum Command {
    /// Set the polarity of a GPIO pin.
    ActiveLow(active_low::Opts),

    /// Set the edges of a GPIO pin that generate interrupts.
    Edge(edge::Opts),

    /// Read the values of GPIO pins.
    Get(get::Opts),

    /// Set the value of a GPIO pin.
    Set(set::Opts),

    /// Return GPIO pins to the kernel.
    Unexport(unexport::Opts),
}
