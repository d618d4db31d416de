//! Batch driver: declaration in, generated artifacts out.
//!
//! Interfaces are processed independently. A failing interface produces no
//! artifacts of its own but never stops the rest of the batch.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use heck::ToSnakeCase;
use httpgen_core::{GeneratorConfig, InterfaceDecl, InterfaceModel, Synthesis};
use serde::Serialize;
use tracing::{info, warn};

use crate::codegen::render_module;
use crate::interface::build_interface;
use crate::synth::synthesize;

/// Everything generated for one interface.
#[derive(Debug, Clone, Serialize)]
pub struct Artifacts {
    pub model: InterfaceModel,
    pub synthesis: Synthesis,
    /// Rendered Rust module.
    #[serde(skip)]
    pub source: String,
}

impl Artifacts {
    /// Base file name of this interface's outputs, e.g. `dict_store`.
    pub fn stem(&self) -> String {
        self.model.name.to_snake_case()
    }

    /// Write `<stem>.http.rs` and, if asked, the `<stem>.http.json` plan.
    ///
    /// The plan is serialized before anything touches disk.
    pub fn write_to(&self, out_dir: &Path, emit_plan: bool) -> Result<Vec<PathBuf>> {
        let plan = if emit_plan {
            Some(serde_json::to_string_pretty(self).context("Failed to serialize plan")?)
        } else {
            None
        };
        std::fs::create_dir_all(out_dir)
            .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;
        let mut written = Vec::with_capacity(2);

        let source_path = out_dir.join(format!("{}.http.rs", self.stem()));
        std::fs::write(&source_path, &self.source)
            .with_context(|| format!("Failed to write file: {}", source_path.display()))?;
        written.push(source_path);

        if let Some(plan) = plan {
            let plan_path = out_dir.join(format!("{}.http.json", self.stem()));
            std::fs::write(&plan_path, plan)
                .with_context(|| format!("Failed to write file: {}", plan_path.display()))?;
            written.push(plan_path);
        }
        Ok(written)
    }
}

/// Result of one interface in a batch.
#[derive(Debug)]
pub struct Outcome {
    pub interface: String,
    pub result: Result<Artifacts>,
}

/// Run the whole pipeline on one interface.
pub fn generate_interface(decl: &InterfaceDecl, config: &GeneratorConfig) -> Result<Artifacts> {
    let model = build_interface(decl, config)?;
    let synthesis = synthesize(&model, config);
    let source = render_module(&synthesis)
        .map_err(|err| anyhow::anyhow!("interface `{}`: {err}", decl.name))?;
    Ok(Artifacts {
        model,
        synthesis,
        source,
    })
}

/// Run the pipeline on every interface, in the order given.
pub fn generate_batch(decls: &[InterfaceDecl], config: &GeneratorConfig) -> Vec<Outcome> {
    decls
        .iter()
        .map(|decl| {
            let result = generate_interface(decl, config);
            match &result {
                Ok(artifacts) => info!(
                    interface = %decl.name,
                    routes = artifacts.synthesis.handlers.len(),
                    "generated"
                ),
                Err(err) => warn!(interface = %decl.name, "skipped: {err:#}"),
            }
            Outcome {
                interface: decl.name.clone(),
                result,
            }
        })
        .collect()
}
