// SPDX-FileCopyrightText: 2021 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::Error;
#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The number identifying a line in the kernel's global GPIO numbering.
pub type PinNumber = u32;

/// The logical level of a line.
///
/// The mapping between logical and physical levels depends on the
/// [`LogicLevel`] setting as follows:
///
/// |             | Physical Low | Physical High |
/// |-------------|--------------|---------------|
/// | **Active-High** | Inactive | Active |
/// | **Active-Low**  | Active | Inactive |
///
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Value {
    /// The line is inactive.
    #[default]
    Inactive,
    /// The line is active.
    Active,
}

impl Value {
    /// The value opposite the current value.
    pub fn not(&self) -> Value {
        match self {
            Value::Active => Value::Inactive,
            Value::Inactive => Value::Active,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Value::Active => "active",
            Value::Inactive => "inactive",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Value {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "0" | "inactive" | "off" | "false" => Ok(Value::Inactive),
            "1" | "active" | "on" | "true" => Ok(Value::Active),
            _ => Err(Error::InvalidArgument(format!("invalid value '{}'", s))),
        }
    }
}

impl From<Value> for bool {
    fn from(l: Value) -> bool {
        match l {
            Value::Inactive => false,
            Value::Active => true,
        }
    }
}
impl From<Value> for u8 {
    fn from(l: Value) -> u8 {
        match l {
            Value::Inactive => 0,
            Value::Active => 1,
        }
    }
}
impl From<bool> for Value {
    fn from(b: bool) -> Value {
        match b {
            false => Value::Inactive,
            true => Value::Active,
        }
    }
}

/// The direction of a line.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// The line is an input.
    #[default]
    Input,

    /// The line is an output.
    Output,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Input => "input",
            Direction::Output => "output",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in" | "input" => Ok(Direction::Input),
            "out" | "output" => Ok(Direction::Output),
            _ => Err(Error::InvalidArgument(format!("invalid direction '{}'", s))),
        }
    }
}

/// The edges that trigger interrupts on an input line.
///
/// The kernel only accepts edge settings for lines that can generate
/// interrupts.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Edge {
    /// Interrupts are disabled.
    #[default]
    None,

    /// Interrupt on transitions from inactive to active.
    Rising,

    /// Interrupt on transitions from active to inactive.
    Falling,

    /// Interrupt on all transitions.
    Both,
}

impl Edge {
    /// The token written to the edge control file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Edge::None => "none",
            Edge::Rising => "rising",
            Edge::Falling => "falling",
            Edge::Both => "both",
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Edge {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Edge::None),
            "rising" => Ok(Edge::Rising),
            "falling" => Ok(Edge::Falling),
            "both" => Ok(Edge::Both),
            _ => Err(Error::InvalidArgument(format!("invalid edge '{}'", s))),
        }
    }
}

/// The polarity mapping physical levels to logical values.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LogicLevel {
    /// A physical high is active.
    #[default]
    ActiveHigh,

    /// A physical low is active.
    ActiveLow,
}

impl fmt::Display for LogicLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogicLevel::ActiveHigh => "active-high",
            LogicLevel::ActiveLow => "active-low",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for LogicLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active-high" | "high" => Ok(LogicLevel::ActiveHigh),
            "active-low" | "low" => Ok(LogicLevel::ActiveLow),
            _ => Err(Error::InvalidArgument(format!("invalid logic level '{}'", s))),
        }
    }
}

impl From<bool> for LogicLevel {
    /// Maps an active-low flag to the corresponding polarity.
    fn from(active_low: bool) -> LogicLevel {
        match active_low {
            false => LogicLevel::ActiveHigh,
            true => LogicLevel::ActiveLow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod value {
        use super::*;

        #[test]
        fn not() {
            assert_eq!(Value::Active.not(), Value::Inactive);
            assert_eq!(Value::Inactive.not(), Value::Active);
        }

        #[test]
        fn from_bool() {
            assert_eq!(Value::from(true), Value::Active);
            assert_eq!(Value::from(false), Value::Inactive);
        }

        #[test]
        fn into_u8() {
            assert_eq!(u8::from(Value::Active), 1);
            assert_eq!(u8::from(Value::Inactive), 0);
        }

        #[test]
        fn from_str() {
            assert_eq!("1".parse::<Value>().unwrap(), Value::Active);
            assert_eq!("on".parse::<Value>().unwrap(), Value::Active);
            assert_eq!("Active".parse::<Value>().unwrap(), Value::Active);
            assert_eq!("0".parse::<Value>().unwrap(), Value::Inactive);
            assert_eq!("false".parse::<Value>().unwrap(), Value::Inactive);
            assert!(matches!(
                "2".parse::<Value>(),
                Err(Error::InvalidArgument(_))
            ));
        }

        #[test]
        fn display() {
            assert_eq!(Value::Active.to_string(), "active");
            assert_eq!(Value::Inactive.to_string(), "inactive");
        }
    }

    #[test]
    fn direction_from_str() {
        assert_eq!("in".parse::<Direction>().unwrap(), Direction::Input);
        assert_eq!("output".parse::<Direction>().unwrap(), Direction::Output);
        assert!(matches!(
            "high".parse::<Direction>(),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn edge_from_str() {
        for edge in [Edge::None, Edge::Rising, Edge::Falling, Edge::Both] {
            assert_eq!(edge.as_str().parse::<Edge>().unwrap(), edge);
        }
        assert!(matches!(
            "sideways".parse::<Edge>(),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn logic_level_from_str() {
        assert_eq!(
            "active-low".parse::<LogicLevel>().unwrap(),
            LogicLevel::ActiveLow
        );
        assert_eq!("high".parse::<LogicLevel>().unwrap(), LogicLevel::ActiveHigh);
        assert!(matches!(
            "1".parse::<LogicLevel>(),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn logic_level_from_bool() {
        assert_eq!(LogicLevel::from(true), LogicLevel::ActiveLow);
        assert_eq!(LogicLevel::from(false), LogicLevel::ActiveHigh);
    }
}
