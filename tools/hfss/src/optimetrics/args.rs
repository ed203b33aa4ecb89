//! Loosely shaped parametric sweep arguments.
//!
//! Script generators usually describe a sweep with parallel lists (one kind,
//! variable name, data set, and synchronization group per variable), where any
//! per-variable list may be collapsed to a single value shared by all variables.
//! [`ParametricSweepArgs`] accepts that shape, from code or from TOML, and
//! [normalizes](ParametricSweepArgs::normalize) it into a [`ParametricSetup`].
//!
//! ```toml
//! name = "ParSetup1"
//! analysis = "MySetup"
//! kinds = ["LIN", "LINC"]
//! variables = ["width", "length"]
//! data = [[1.0, 9.0, 1.0], [2.0, 4.0, 5.0]]
//! units = "mm"
//! ```

use std::io::Write;
use std::path::Path;

use arcstr::ArcStr;
use itertools::izip;
use serde::{Deserialize, Deserializer, Serialize};

use super::ParametricSetup;
use super::sweep::{SweepData, SweepKind, VariableSweep};
use crate::error::{Error, Result};

/// Either a single value shared by every variable or one value per variable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    /// A single value.
    One(T),
    /// One value per variable.
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// Converts into a list, treating a single value as a list of length 1.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::One(value) => vec![value],
            Self::Many(values) => values,
        }
    }

    /// Applies `f` to every contained value.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> OneOrMany<U> {
        match self {
            Self::One(value) => OneOrMany::One(f(value)),
            Self::Many(values) => OneOrMany::Many(values.into_iter().map(f).collect()),
        }
    }
}

impl<T: Clone> OneOrMany<T> {
    /// Expands into exactly `n` values.
    ///
    /// A single value is repeated `n` times. A list must already have `n` entries;
    /// otherwise a [`Error::LengthMismatch`] naming `argument` is returned.
    pub fn broadcast(self, argument: &'static str, n: usize) -> Result<Vec<T>> {
        match self {
            Self::One(value) => Ok(vec![value; n]),
            Self::Many(values) if values.len() == n => Ok(values),
            Self::Many(values) => Err(Error::LengthMismatch {
                argument,
                expected: n,
                found: values.len(),
            }),
        }
    }
}

impl From<&str> for OneOrMany<ArcStr> {
    fn from(value: &str) -> Self {
        Self::One(value.into())
    }
}

impl From<String> for OneOrMany<ArcStr> {
    fn from(value: String) -> Self {
        Self::One(value.into())
    }
}

impl From<ArcStr> for OneOrMany<ArcStr> {
    fn from(value: ArcStr) -> Self {
        Self::One(value)
    }
}

impl From<Vec<&str>> for OneOrMany<ArcStr> {
    fn from(value: Vec<&str>) -> Self {
        Self::Many(value.into_iter().map(ArcStr::from).collect())
    }
}

impl From<Vec<String>> for OneOrMany<ArcStr> {
    fn from(value: Vec<String>) -> Self {
        Self::Many(value.into_iter().map(ArcStr::from).collect())
    }
}

impl From<Vec<ArcStr>> for OneOrMany<ArcStr> {
    fn from(value: Vec<ArcStr>) -> Self {
        Self::Many(value)
    }
}

impl<const N: usize> From<[&str; N]> for OneOrMany<ArcStr> {
    fn from(value: [&str; N]) -> Self {
        Self::Many(value.into_iter().map(ArcStr::from).collect())
    }
}

impl From<f64> for OneOrMany<Vec<f64>> {
    fn from(value: f64) -> Self {
        Self::One(vec![value])
    }
}

impl From<Vec<f64>> for OneOrMany<Vec<f64>> {
    fn from(value: Vec<f64>) -> Self {
        Self::One(value)
    }
}

impl<const N: usize> From<[f64; N]> for OneOrMany<Vec<f64>> {
    fn from(value: [f64; N]) -> Self {
        Self::One(value.to_vec())
    }
}

impl From<Vec<Vec<f64>>> for OneOrMany<Vec<f64>> {
    fn from(value: Vec<Vec<f64>>) -> Self {
        Self::Many(value)
    }
}

impl From<i32> for OneOrMany<i32> {
    fn from(value: i32) -> Self {
        Self::One(value)
    }
}

impl From<bool> for OneOrMany<i32> {
    fn from(value: bool) -> Self {
        Self::One(value.into())
    }
}

impl From<Vec<i32>> for OneOrMany<i32> {
    fn from(value: Vec<i32>) -> Self {
        Self::Many(value)
    }
}

impl From<Vec<bool>> for OneOrMany<i32> {
    fn from(value: Vec<bool>) -> Self {
        Self::Many(value.into_iter().map(i32::from).collect())
    }
}

/// A data set as written in a sweep description.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawData {
    Point(f64),
    Points(Vec<f64>),
    Sets(Vec<Vec<f64>>),
}

fn deserialize_data<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<OneOrMany<Vec<f64>>>, D::Error> {
    Ok(Some(match RawData::deserialize(deserializer)? {
        RawData::Point(point) => OneOrMany::One(vec![point]),
        RawData::Points(points) => OneOrMany::One(points),
        RawData::Sets(sets) => OneOrMany::Many(sets),
    }))
}

/// A synchronization group, given either as a group number or as a boolean.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawSync {
    Flag(bool),
    Group(i32),
}

impl From<RawSync> for i32 {
    fn from(value: RawSync) -> Self {
        match value {
            RawSync::Flag(flag) => flag.into(),
            RawSync::Group(group) => group,
        }
    }
}

fn deserialize_sync<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<OneOrMany<i32>>, D::Error> {
    Ok(Some(OneOrMany::<RawSync>::deserialize(deserializer)?.map(i32::from)))
}

/// Arguments describing a parametric sweep.
///
/// Every field except `sync` is required; missing fields are reported by
/// [`ParametricSweepArgs::normalize`] before anything is written.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParametricSweepArgs {
    /// The name of the parametric setup.
    pub name: Option<ArcStr>,
    /// The name of the analysis setup driven by the sweep.
    pub analysis: Option<ArcStr>,
    /// The [`SweepKind`] tag of each variable.
    pub kinds: Option<OneOrMany<ArcStr>>,
    /// The swept variable names.
    pub variables: Option<OneOrMany<ArcStr>>,
    /// The values of each variable, interpreted according to its kind.
    ///
    /// A bare number is a data set with a single point.
    #[serde(deserialize_with = "deserialize_data")]
    pub data: Option<OneOrMany<Vec<f64>>>,
    /// The units of linear sweeps.
    pub units: Option<ArcStr>,
    /// The synchronization group of each variable.
    ///
    /// Defaults to 0 (unsynchronized) for every variable. Booleans are
    /// accepted as groups 0 and 1.
    #[serde(deserialize_with = "deserialize_sync")]
    pub sync: Option<OneOrMany<i32>>,
}

impl ParametricSweepArgs {
    /// Creates an empty set of arguments.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses arguments from a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Reads arguments from a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "reading sweep description");
        let s = std::fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    /// Sets the setup name.
    pub fn name(mut self, name: impl Into<ArcStr>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the analysis setup name.
    pub fn analysis(mut self, analysis: impl Into<ArcStr>) -> Self {
        self.analysis = Some(analysis.into());
        self
    }

    /// Sets the kind tags.
    pub fn kinds(mut self, kinds: impl Into<OneOrMany<ArcStr>>) -> Self {
        self.kinds = Some(kinds.into());
        self
    }

    /// Sets the variable names.
    pub fn variables(mut self, variables: impl Into<OneOrMany<ArcStr>>) -> Self {
        self.variables = Some(variables.into());
        self
    }

    /// Sets the data sets.
    pub fn data(mut self, data: impl Into<OneOrMany<Vec<f64>>>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Sets the units of linear sweeps.
    pub fn units(mut self, units: impl Into<ArcStr>) -> Self {
        self.units = Some(units.into());
        self
    }

    /// Sets the synchronization groups.
    pub fn sync(mut self, sync: impl Into<OneOrMany<i32>>) -> Self {
        self.sync = Some(sync.into());
        self
    }

    /// Validates the arguments and converts them into a [`ParametricSetup`].
    ///
    /// Single-valued `kinds`, `data`, and `sync` apply to every variable;
    /// list-valued ones must have one entry per variable.
    pub fn normalize(&self) -> Result<ParametricSetup> {
        let name = required("name", &self.name)?;
        let analysis = required("analysis", &self.analysis)?;
        let kinds = required("kinds", &self.kinds)?;
        let variables = required("variables", &self.variables)?;
        let data = required("data", &self.data)?;
        let units = required("units", &self.units)?;

        let variables = variables.into_vec();
        if variables.is_empty() {
            return Err(Error::MissingArgument("variables"));
        }
        let n = variables.len();

        let kinds = kinds.broadcast("kinds", n)?;
        let data = data.broadcast("data", n)?;
        let sync = match &self.sync {
            Some(sync) => sync.clone().broadcast("sync", n)?,
            None => vec![0; n],
        };

        let mut setup = ParametricSetup::new(name, analysis, units);
        for (variable, kind, values, synchronize) in izip!(variables, kinds, data, sync) {
            let kind: SweepKind = kind.parse()?;
            let data = SweepData::from_values(kind, &variable, &values)?;
            setup.add_sweep(VariableSweep::new(variable, data).with_synchronize(synchronize));
        }
        Ok(setup)
    }

    /// Validates the arguments and appends the resulting `InsertSetup` command to `out`.
    ///
    /// Nothing is written if validation fails.
    pub fn emit<W: Write>(&self, out: &mut W) -> Result<()> {
        self.normalize()?.emit(out)
    }
}

fn required<T: Clone>(argument: &'static str, value: &Option<T>) -> Result<T> {
    value.clone().ok_or(Error::MissingArgument(argument))
}
