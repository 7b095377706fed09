//! `importdecl plan`: what a generator emits for each symbol.

use importdecl_core::{Action, EmissionPlan, EmittedValue, SymbolTable, plan_unit};
use importdecl_output::{OutputFormatter, paint, symbol_style};
use serde::Serialize;

#[derive(Debug, Serialize, schemars::JsonSchema)]
pub struct PlannedMemberLine {
    pub name: String,
    /// Emitted form as it appears in generated code.
    pub emitted: String,
}

#[derive(Debug, Serialize, schemars::JsonSchema)]
pub struct PlanLine {
    pub symbol: String,
    pub projected: String,
    /// `reference` or `define`.
    pub action: String,
    pub template: Option<String>,
    pub members: Vec<PlannedMemberLine>,
}

impl From<EmissionPlan> for PlanLine {
    fn from(plan: EmissionPlan) -> Self {
        let (action, template) = match plan.action {
            Action::Reference => ("reference", None),
            Action::Define { template } => ("define", template),
        };
        Self {
            symbol: plan.symbol,
            projected: plan.projected,
            action: action.to_string(),
            template,
            members: plan
                .members
                .into_iter()
                .map(|m| PlannedMemberLine {
                    name: m.name,
                    emitted: render_value(&m.emitted),
                })
                .collect(),
        }
    }
}

fn render_value(value: &EmittedValue) -> String {
    match value {
        EmittedValue::Number(n) => n.to_string(),
        EmittedValue::Name(name) => format!("{name:?}"),
        EmittedValue::Structured { type_name, member } => format!("{type_name}.{member}"),
    }
}

#[derive(Debug, Serialize, schemars::JsonSchema)]
#[serde(transparent)]
pub struct PlanReport {
    pub plans: Vec<PlanLine>,
}

impl PlanReport {
    fn render(&self, colors: bool) -> String {
        let mut lines = Vec::new();
        for plan in &self.plans {
            lines.push(format!(
                "{} {} ({})",
                plan.action,
                paint(&plan.projected, symbol_style(), colors),
                plan.symbol
            ));
            if let Some(template) = &plan.template {
                lines.push(format!("  template: {template}"));
            }
            for m in &plan.members {
                lines.push(format!("  {} => {}", m.name, m.emitted));
            }
        }
        lines.join("\n")
    }
}

impl OutputFormatter for PlanReport {
    fn format_text(&self) -> String {
        self.render(false)
    }

    fn format_pretty(&self, colors: bool) -> String {
        self.render(colors)
    }
}

pub fn run(table: &SymbolTable, names: &[String]) -> anyhow::Result<PlanReport> {
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let plans = plan_unit(table, &refs)?;
    Ok(PlanReport {
        plans: plans.into_iter().map(PlanLine::from).collect(),
    })
}
