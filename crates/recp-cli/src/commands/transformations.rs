//! `recp transformations`: describe the built-in transformations.

use serde::Serialize;

use recp_core::domain::{TRANSFORMATION_REGISTRY, TransformationDef};

use crate::{
    cli::{ListFormat, TransformationsArgs},
    error::CliResult,
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct TransformationRow {
    name: &'static str,
    description: &'static str,
    params: Vec<ParamRow>,
    open_params: bool,
}

#[derive(Debug, Serialize)]
struct ParamRow {
    name: &'static str,
    required: bool,
    description: &'static str,
}

impl From<&TransformationDef> for TransformationRow {
    fn from(def: &TransformationDef) -> Self {
        Self {
            name: def.name,
            description: def.description,
            params: def
                .params
                .iter()
                .map(|p| ParamRow {
                    name: p.name,
                    required: p.required,
                    description: p.description,
                })
                .collect(),
            open_params: def.open_params,
        }
    }
}

pub fn execute(args: TransformationsArgs, output: OutputManager) -> CliResult<()> {
    match args.format {
        ListFormat::Table => {
            output.header("Available Transformations:")?;
            for def in TRANSFORMATION_REGISTRY {
                output.emit(&format!("  {:<10}  {}", def.name, def.description))?;
                for line in param_lines(def) {
                    output.emit(&line)?;
                }
            }
        }

        ListFormat::List => {
            for def in TRANSFORMATION_REGISTRY {
                output.emit(def.name)?;
            }
        }

        ListFormat::Json => {
            let rows: Vec<TransformationRow> =
                TRANSFORMATION_REGISTRY.iter().map(TransformationRow::from).collect();
            output.json(&rows)?;
        }
    }

    Ok(())
}

fn param_lines(def: &TransformationDef) -> Vec<String> {
    if def.open_params {
        return vec!["      <search>: <replacement>  (any number of pairs)".to_string()];
    }
    def.params
        .iter()
        .map(|p| {
            let marker = if p.required { "required" } else { "optional" };
            format!("      {:<8} {marker:<8}  {}", p.name, p.description)
        })
        .collect()
}
