// SPDX-FileCopyrightText: 2022 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

// Basic example of reading a single pin.

use gpiosysfs::line::LogicLevel;
use gpiosysfs::Pin;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let number = 22;
    // open the pin as an input
    let mut pin = Pin::input(number)?;
    // optionally invert the polarity
    pin.set_logic_level(LogicLevel::ActiveLow)?;

    let value = pin.read()?;
    println!("{number}={value}");

    // return the pin to the kernel
    pin.cleanup()?;

    Ok(())
}
