// SPDX-FileCopyrightText: 2021 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::common::{self, emit_error};
use anyhow::{Context, Result};
use clap::Parser;
use gpiosysfs::line::{Edge, PinNumber};
use gpiosysfs::Pin;

#[derive(Debug, Parser)]
#[command(alias("e"))]
pub struct Opts {
    /// The pin to configure
    #[arg(value_name = "pin")]
    pin: PinNumber,

    /// The edges that generate interrupts: none, rising, falling or both
    #[arg(value_name = "edge")]
    edge: Edge,

    /// Unexport the pin before exiting
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
    let pin = Pin::open_input(opts.kernel_opts.kernel(), num, opts.kernel_opts.retry())
        .with_context(|| format!("failed to open GPIO {num} as an input"))?;
    pin.set_edge_trigger(opts.edge)
        .with_context(|| format!("failed to set GPIO {num} edge to {}", opts.edge))?;
    common::release(pin, opts.cleanup)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gpiosysfs_sim::Sim;

    fn opts(s: &Sim, args: &[&str]) -> Opts {
        match common::tests::parse(s, "edge", args) {
            crate::Command::Edge(opts) => opts,
            _ => unreachable!(),
        }
    }

    #[test]
    fn edges() {
        let s = gpiosysfs_sim::builder().with_exported(6).live().unwrap();
        for edge in ["rising", "falling", "both", "none"] {
            do_cmd(&opts(&s, &["6", edge])).unwrap();
            assert_eq!(s.edge(6).unwrap(), edge);
            assert_eq!(s.direction(6).unwrap(), "in");
        }
    }

    #[test]
    fn unexported() {
        let s = gpiosysfs_sim::builder().live().unwrap();
        let res = do_cmd(&opts(&s, &["6", "both"]));
        assert!(res.is_err());
        assert_eq!(s.last_export().unwrap(), Some(6));
    }
}
