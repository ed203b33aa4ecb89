//! HFSS Optimetrics parametric setups.
//!
//! A [`ParametricSetup`] is written as a single `oModule.InsertSetup "OptiParametric"`
//! command, where `oModule` must be bound to the Optimetrics module of the active
//! design (see [`select_module`]).

use std::io::Write;

use arcstr::ArcStr;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub mod args;
pub mod sweep;

pub use args::{OneOrMany, ParametricSweepArgs};
pub use sweep::{SweepData, SweepKind, VariableSweep};

/// The name of the HFSS module that owns parametric setups.
pub const MODULE_NAME: &str = "Optimetrics";

/// Writes the statement binding `oModule` to the Optimetrics module of `oDesign`.
pub fn select_module<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, r#"Set oModule = oDesign.GetModule("{MODULE_NAME}")"#)?;
    Ok(())
}

/// A parametric sweep over one or more design variables.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParametricSetup {
    name: ArcStr,
    analysis: ArcStr,
    units: ArcStr,
    sweeps: Vec<VariableSweep>,
}

impl ParametricSetup {
    /// Creates a new [`ParametricSetup`] with no sweeps.
    ///
    /// `analysis` names the existing analysis setup to run at each sweep point.
    /// `units` is appended to the bounds and step of every linear sweep.
    pub fn new(
        name: impl Into<ArcStr>,
        analysis: impl Into<ArcStr>,
        units: impl Into<ArcStr>,
    ) -> Self {
        Self {
            name: name.into(),
            analysis: analysis.into(),
            units: units.into(),
            sweeps: Vec::new(),
        }
    }

    /// Appends a sweep. Sweeps are emitted in the order they are added.
    pub fn add_sweep(&mut self, sweep: VariableSweep) {
        self.sweeps.push(sweep);
    }

    /// Returns a new [`ParametricSetup`] with the given sweep appended.
    pub fn sweep(mut self, sweep: VariableSweep) -> Self {
        self.add_sweep(sweep);
        self
    }

    /// The name of the parametric setup.
    #[inline]
    pub fn name(&self) -> &ArcStr {
        &self.name
    }

    /// The name of the analysis setup this sweep drives.
    #[inline]
    pub fn analysis(&self) -> &ArcStr {
        &self.analysis
    }

    /// The units of linear sweeps.
    #[inline]
    pub fn units(&self) -> &ArcStr {
        &self.units
    }

    /// The sweeps of this setup, in emission order.
    #[inline]
    pub fn sweeps(&self) -> &[VariableSweep] {
        &self.sweeps
    }

    /// Appends the `InsertSetup` command for this setup to `out`.
    ///
    /// The stream is neither flushed nor closed. If a write fails, the text
    /// already written is left in place.
    pub fn emit<W: Write>(&self, out: &mut W) -> Result<()> {
        tracing::debug!(
            setup = %self.name,
            analysis = %self.analysis,
            sweeps = self.sweeps.len(),
            "emitting parametric setup"
        );

        writeln!(out, r#"oModule.InsertSetup "OptiParametric", _"#)?;
        writeln!(out, r#"Array("NAME:{}", _"#, self.name)?;
        writeln!(out, r#""IsEnabled:=", true, _"#)?;
        writeln!(out, r#"Array("NAME:ProdOptiSetupDataV2", _"#)?;
        writeln!(out, r#""SaveFields:=", false, _"#)?;
        writeln!(out, r#""CopyMesh:=", false), _"#)?;
        writeln!(out, r#"Array("NAME:StartingPoint"), _"#)?;
        writeln!(out, r#""Sim. Setups:=", Array("{}"), _"#, self.analysis)?;

        write!(out, r#"Array("NAME:Sweeps""#)?;
        for sweep in self.sweeps.iter() {
            tracing::trace!(
                variable = %sweep.variable,
                kind = %sweep.data.kind(),
                synchronize = sweep.synchronize,
                "emitting sweep definition"
            );
            writeln!(out, ", _")?;
            sweep.netlist(out, &self.units)?;
        }
        writeln!(out, "), _")?;

        writeln!(out, r#"Array("NAME:Sweep Operations"), _"#)?;
        writeln!(out, r#"Array("NAME:Goals"))"#)?;
        Ok(())
    }
}
