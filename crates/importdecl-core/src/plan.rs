//! Emission plans: what a code generator must do for each declaration.
//!
//! A generator calls [`plan_unit`] with the symbols its unit references and
//! gets, per symbol, the projected name, whether a definition is emitted, and
//! the emitted form of every enumeration member.

use crate::decl::{Declaration, EmittedValue, Linkage};
use crate::error::DeclError;
use crate::table::SymbolTable;
use serde::Serialize;
use std::fmt;

/// What the generator does with a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Action {
    /// External symbol: emit references only, no definition.
    Reference,
    /// Local symbol: emit a definition, verbatim from `template` when given.
    Define { template: Option<String> },
}

/// Emitted form of one enumeration member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedMember {
    pub name: String,
    pub emitted: EmittedValue,
}

/// Generation instructions for one declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmissionPlan {
    pub symbol: String,
    pub projected: String,
    pub action: Action,
    pub members: Vec<PlannedMember>,
}

/// Every declaration that failed while planning a unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitError {
    pub errors: Vec<DeclError>,
}

impl fmt::Display for UnitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} declaration(s) failed", self.errors.len())?;
        for err in &self.errors {
            write!(f, "\n  {err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for UnitError {}

/// Plan a single declaration.
pub fn plan_declaration(decl: &Declaration) -> Result<EmissionPlan, DeclError> {
    let action = match decl.linkage() {
        Linkage::External(_) => Action::Reference,
        Linkage::Local(body) => Action::Define {
            template: body.template.clone(),
        },
    };

    let members = decl
        .members()
        .iter()
        .map(|m| {
            Ok(PlannedMember {
                name: m.name.clone(),
                emitted: decl.emit_member(&m.name)?,
            })
        })
        .collect::<Result<Vec<_>, DeclError>>()?;

    Ok(EmissionPlan {
        symbol: decl.qualified_name(),
        projected: decl.projected_name(),
        action,
        members,
    })
}

/// Plan every symbol a unit references, by qualified or projected name.
///
/// The unit fails as a whole if any symbol fails; the error lists each
/// offending declaration so none is silently dropped.
pub fn plan_unit(table: &SymbolTable, symbols: &[&str]) -> Result<Vec<EmissionPlan>, UnitError> {
    let mut plans = Vec::with_capacity(symbols.len());
    let mut errors = Vec::new();

    for symbol in symbols {
        match table
            .lookup(symbol)
            .and_then(|decl| plan_declaration(&decl))
        {
            Ok(plan) => plans.push(plan),
            Err(e) => {
                tracing::warn!(%symbol, error = %e, "cannot plan declaration");
                errors.push(e);
            }
        }
    }

    if errors.is_empty() {
        tracing::debug!(count = plans.len(), "planned unit");
        Ok(plans)
    } else {
        Err(UnitError { errors })
    }
}
