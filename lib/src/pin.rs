// SPDX-FileCopyrightText: 2021 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::kernel::{Kernel, Sysfs};
use crate::line::{Direction, Edge, LogicLevel, PinNumber, Value};
use crate::{sysfs, Error, Result, Retry};
use log::{debug, warn};
use std::thread::sleep;
use std::time::Duration;

/// The time allowed for the kernel to populate the pin directory after export.
pub const SETTLE_DELAY: Duration = Duration::from_millis(10);

/// An exported pin, configured as an input or output, with its value file open.
///
/// Holding the [`Pin`] grants exclusive access to the value file.
/// An input pin can only be read, and an output pin can only be driven.
///
/// Dropping the pin closes the value file but leaves the pin exported.
/// Use [`cleanup`] to also unexport it.
///
/// [`cleanup`]: Pin::cleanup
#[derive(Debug)]
pub struct Pin<K: Kernel = Sysfs> {
    kernel: K,
    number: PinNumber,
    direction: Direction,
    value: Option<K::Handle>,
}

impl Pin<Sysfs> {
    /// Open a pin as an input.
    ///
    /// ```no_run
    /// # fn example() -> gpiosysfs::Result<()> {
    /// use gpiosysfs::{line::Value, Pin};
    ///
    /// let mut button = Pin::input(4)?;
    /// if button.read()? == Value::Active {
    ///     println!("Button pressed.");
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn input(number: PinNumber) -> Result<Self> {
        Self::input_with_retry(number, Retry::none())
    }

    /// Open a pin as an input, retrying the steps that may race the kernel.
    pub fn input_with_retry(number: PinNumber, retry: Retry) -> Result<Self> {
        Self::open_input(Sysfs::default(), number, retry)
    }

    /// Open a pin as an output, initially driven to `initial`.
    pub fn output(number: PinNumber, initial: Value) -> Result<Self> {
        Self::output_with_retry(number, initial, Retry::none())
    }

    /// Open a pin as an output, initially driven to `initial`, retrying the
    /// steps that may race the kernel.
    pub fn output_with_retry(number: PinNumber, initial: Value, retry: Retry) -> Result<Self> {
        Self::open_output(Sysfs::default(), number, initial, retry)
    }
}

impl<K: Kernel> Pin<K> {
    /// Export a pin and open it as an input using the given kernel interface.
    ///
    /// On error the pin may be left exported.
    pub fn open_input(kernel: K, number: PinNumber, retry: Retry) -> Result<Self> {
        retry.run(|| sysfs::export(&kernel, number))?;
        sleep(SETTLE_DELAY);
        let direction = Direction::Input;
        let value = retry.run(|| {
            sysfs::set_direction(&kernel, number, direction, 0)?;
            sysfs::open_value(&kernel, number, false)
        })?;
        debug!("GPIO {} opened as {}", number, direction);
        Ok(Pin {
            kernel,
            number,
            direction,
            value: Some(value),
        })
    }

    /// Export a pin and open it as an output using the given kernel interface.
    ///
    /// The `initial` value is applied as part of setting the direction, so the
    /// line is never driven to any other value.
    ///
    /// On error the pin may be left exported.
    pub fn open_output(kernel: K, number: PinNumber, initial: Value, retry: Retry) -> Result<Self> {
        retry.run(|| sysfs::export(&kernel, number))?;
        sleep(SETTLE_DELAY);
        let direction = Direction::Output;
        let init = u8::from(initial);
        retry.run(|| sysfs::set_direction(&kernel, number, direction, init))?;
        let value = retry.run(|| sysfs::open_value(&kernel, number, true))?;
        debug!("GPIO {} opened as {} {}", number, direction, initial);
        Ok(Pin {
            kernel,
            number,
            direction,
            value: Some(value),
        })
    }

    /// The number of the pin.
    #[inline]
    pub fn number(&self) -> PinNumber {
        self.number
    }

    /// The direction the pin was opened with.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Return true while the value file is open.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.value.is_some()
    }

    /// Read the value of an input pin.
    pub fn read(&mut self) -> Result<Value> {
        if self.direction != Direction::Input {
            return Err(Error::InvalidState("pin not configured for input".into()));
        }
        let number = self.number;
        sysfs::read_raw(number, self.handle()?)
    }

    /// Drive an output pin active.
    #[inline]
    pub fn high(&mut self) -> Result<()> {
        self.set_value(Value::Active)
    }

    /// Drive an output pin inactive.
    #[inline]
    pub fn low(&mut self) -> Result<()> {
        self.set_value(Value::Inactive)
    }

    /// Drive an output pin to the given value.
    pub fn set_value(&mut self, value: Value) -> Result<()> {
        if self.direction != Direction::Output {
            return Err(Error::InvalidState("pin not configured for output".into()));
        }
        let number = self.number;
        sysfs::write_raw(number, self.handle()?, value.into())
    }

    /// Set the polarity of the pin.
    ///
    /// Applies to both inputs and outputs, and takes effect on output pins
    /// immediately.  The setting is not retained by the [`Pin`].
    pub fn set_logic_level(&self, level: LogicLevel) -> Result<()> {
        sysfs::set_logic_level(&self.kernel, self.number, level)
    }

    /// Set the edges that generate interrupts for the pin.
    ///
    /// The kernel rejects this for pins that cannot generate interrupts.
    /// The setting is not retained by the [`Pin`].
    pub fn set_edge_trigger(&self, edge: Edge) -> Result<()> {
        sysfs::set_edge_trigger(&self.kernel, self.number, edge)
    }

    /// Close the value file.
    ///
    /// The pin remains exported.  Closing a closed pin has no effect.
    pub fn close(&mut self) {
        if self.value.take().is_some() {
            debug!("GPIO {} closed", self.number);
        }
    }

    /// Close the value file and unexport the pin.
    ///
    /// The value file is always closed.  An error returned from unexporting
    /// the pin is also logged, and may be ignored if teardown is best effort.
    pub fn cleanup(mut self) -> Result<()> {
        self.close();
        sysfs::unexport(&self.kernel, self.number).map_err(|e| {
            warn!("GPIO {} unexport failed: {}", self.number, e);
            e
        })
    }

    fn handle(&mut self) -> Result<&mut K::Handle> {
        self.value
            .as_mut()
            .ok_or_else(|| Error::InvalidState("pin is closed".into()))
    }
}
