//! Per-variable sweep definitions.

use std::fmt::Display;
use std::io::{Result, Write};
use std::str::FromStr;

use arcstr::ArcStr;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The unit attached to every point of a [`SweepData::Single`] sweep.
///
/// HFSS scripts generated by earlier tooling always tag discrete points as
/// degrees, independent of the units given for linear sweeps.
pub const SINGLE_POINT_UNITS: &str = "deg";

/// Sweep kinds.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum SweepKind {
    /// A list of discrete points.
    #[serde(rename = "SINGLE")]
    Single,
    /// Linear sweep with a fixed step size.
    #[serde(rename = "LIN")]
    Lin,
    /// Linear sweep with a fixed number of points.
    #[serde(rename = "LINC")]
    LinCount,
}

impl SweepKind {
    /// The tag identifying this kind in sweep arguments.
    pub const fn tag(&self) -> &'static str {
        match *self {
            Self::Single => "SINGLE",
            Self::Lin => "LIN",
            Self::LinCount => "LINC",
        }
    }
}

impl Display for SweepKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for SweepKind {
    type Err = Error;

    /// Parses a kind tag. Matching is case-sensitive.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "SINGLE" => Ok(Self::Single),
            "LIN" => Ok(Self::Lin),
            "LINC" => Ok(Self::LinCount),
            _ => Err(Error::UnsupportedKind(s.to_string())),
        }
    }
}

/// The values swept for a single variable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SweepData {
    /// Discrete points, each tagged with [`SINGLE_POINT_UNITS`].
    Single(Vec<f64>),
    /// A linear sweep from `start` to `stop` in increments of `step`.
    Lin {
        /// The first point.
        start: f64,
        /// The last point.
        stop: f64,
        /// The increment between points.
        step: f64,
    },
    /// A linear sweep from `start` to `stop` with `count` points.
    LinCount {
        /// The first point.
        start: f64,
        /// The last point.
        stop: f64,
        /// The number of points.
        count: u64,
    },
}

impl SweepData {
    /// Builds sweep data of the given kind from a flat list of values.
    ///
    /// [`SweepKind::Lin`] and [`SweepKind::LinCount`] take exactly
    /// `[start, stop, step]` and `[start, stop, count]` respectively;
    /// [`SweepKind::Single`] takes one or more points.
    pub fn from_values(
        kind: SweepKind,
        variable: &ArcStr,
        values: &[f64],
    ) -> crate::error::Result<Self> {
        let arity = |expected| Error::Arity {
            variable: variable.clone(),
            kind: kind.tag(),
            expected,
            found: values.len(),
        };
        match kind {
            SweepKind::Single => {
                if values.is_empty() {
                    return Err(arity("at least 1"));
                }
                Ok(Self::Single(values.to_vec()))
            }
            SweepKind::Lin => match *values {
                [start, stop, step] => Ok(Self::Lin { start, stop, step }),
                _ => Err(arity("exactly 3")),
            },
            SweepKind::LinCount => match *values {
                [start, stop, count] => {
                    if !count.is_finite()
                        || count < 0.
                        || count.fract() != 0.
                        || count >= u64::MAX as f64
                    {
                        return Err(Error::InvalidCount {
                            variable: variable.clone(),
                            count,
                        });
                    }
                    Ok(Self::LinCount {
                        start,
                        stop,
                        count: count as u64,
                    })
                }
                _ => Err(arity("exactly 3")),
            },
        }
    }

    /// The kind of this sweep.
    pub fn kind(&self) -> SweepKind {
        match self {
            Self::Single(_) => SweepKind::Single,
            Self::Lin { .. } => SweepKind::Lin,
            Self::LinCount { .. } => SweepKind::LinCount,
        }
    }

    /// Formats the `Data:=` string of this sweep.
    ///
    /// `units` applies to the bounds and step of linear sweeps only.
    pub fn data_string(&self, units: &str) -> String {
        match self {
            Self::Single(points) => points
                .iter()
                .map(|point| format!("{point}{SINGLE_POINT_UNITS}"))
                .join(" "),
            Self::Lin { start, stop, step } => {
                format!("LIN {start:.6}{units} {stop:.6}{units} {step:.6}{units}")
            }
            Self::LinCount { start, stop, count } => {
                format!("LINC {start:.6}{units} {stop:.6}{units} {count}")
            }
        }
    }
}

/// A sweep over one design variable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VariableSweep {
    /// The name of the swept design variable.
    pub variable: ArcStr,
    /// The swept values.
    pub data: SweepData,
    /// The synchronization group.
    ///
    /// Variables sharing a nonzero group are stepped together by HFSS.
    pub synchronize: i32,
}

impl VariableSweep {
    /// Creates a new, unsynchronized [`VariableSweep`].
    pub fn new(variable: impl Into<ArcStr>, data: SweepData) -> Self {
        Self {
            variable: variable.into(),
            data,
            synchronize: 0,
        }
    }

    /// Sweeps `variable` over the given discrete points.
    pub fn single(variable: impl Into<ArcStr>, points: impl Into<Vec<f64>>) -> Self {
        Self::new(variable, SweepData::Single(points.into()))
    }

    /// Sweeps `variable` linearly with a fixed step.
    pub fn lin(variable: impl Into<ArcStr>, start: f64, stop: f64, step: f64) -> Self {
        Self::new(variable, SweepData::Lin { start, stop, step })
    }

    /// Sweeps `variable` linearly over `count` points.
    pub fn lin_count(variable: impl Into<ArcStr>, start: f64, stop: f64, count: u64) -> Self {
        Self::new(variable, SweepData::LinCount { start, stop, count })
    }

    /// Returns a new [`VariableSweep`] in the given synchronization group.
    pub fn with_synchronize(mut self, group: i32) -> Self {
        self.synchronize = group;
        self
    }

    /// Writes the `SweepDefinition` array of this sweep.
    ///
    /// Does not include a separator or newline at the end.
    pub(crate) fn netlist<W: Write>(&self, out: &mut W, units: &str) -> Result<()> {
        writeln!(out, r#"Array("NAME:SweepDefinition", _"#)?;
        writeln!(out, r#""Variable:=", "{}", _"#, self.variable)?;
        writeln!(out, r#""Data:=", "{}", _"#, self.data.data_string(units))?;
        writeln!(out, r#""OffsetF1:=", false, _"#)?;
        write!(out, r#""Synchronize:=", {})"#, self.synchronize)
    }
}
