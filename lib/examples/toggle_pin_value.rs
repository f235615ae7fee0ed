// SPDX-FileCopyrightText: 2022 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

// Basic example of toggling a single pin.

use anyhow::Context;
use gpiosysfs::line::Value;
use gpiosysfs::{Pin, Retry};
use std::result::Result;
use std::thread;
use std::time::Duration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let number = 22;
    let mut value = Value::Active;

    let mut pin = Pin::output_with_retry(number, value, Retry::new(5, Duration::from_millis(50)))
        .context("Failed to open pin")?;

    loop {
        println!("{}={:?}", number, value);
        thread::sleep(Duration::from_millis(500));
        value = value.not();
        pin.set_value(value).context("Failed to set value")?;
    }
}
