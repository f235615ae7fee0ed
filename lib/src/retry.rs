// SPDX-FileCopyrightText: 2021 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::Result;
use log::warn;
use std::thread::sleep;
use std::time::Duration;

/// A policy for retrying operations that may race the kernel.
///
/// A failed attempt is retried after a constant `delay`, until `attempts`
/// have been made.  The error from the final attempt is returned unaltered.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Retry {
    /// The maximum number of attempts.
    ///
    /// Zero is treated as one.
    pub attempts: u32,

    /// The period to wait between attempts.
    pub delay: Duration,
}

impl Retry {
    /// Create a policy making up to `attempts` attempts, `delay` apart.
    pub fn new(attempts: u32, delay: Duration) -> Self {
        Retry { attempts, delay }
    }

    /// A policy that makes a single attempt.
    pub fn none() -> Self {
        Retry::new(1, Duration::ZERO)
    }

    /// Call `step` until it succeeds or the attempts are exhausted.
    pub fn run<T, F>(&self, mut step: F) -> Result<T>
    where
        F: FnMut() -> Result<T>,
    {
        let attempts = self.attempts.max(1);
        let mut attempt = 1;
        loop {
            match step() {
                Ok(v) => return Ok(v),
                Err(e) if attempt >= attempts => return Err(e),
                Err(e) => {
                    warn!(
                        "attempt {}/{} failed: {}, retrying in {:?}",
                        attempt, attempts, e, self.delay
                    );
                    sleep(self.delay);
                    attempt += 1;
                }
            }
        }
    }
}

impl Default for Retry {
    fn default() -> Self {
        Retry::none()
    }
}
