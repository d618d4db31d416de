use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use httpgen_core::{GeneratorConfig, PathStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PathStyleArg {
    /// `/items/:id`
    Colon,
    /// `/items/{id}`
    Brace,
}

impl From<PathStyleArg> for PathStyle {
    fn from(arg: PathStyleArg) -> Self {
        match arg {
            PathStyleArg::Colon => PathStyle::Colon,
            PathStyleArg::Brace => PathStyle::Brace,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "httpgen",
    version,
    about = "Generate HTTP routing glue from #[http(...)] directives on trait methods"
)]
pub struct Args {
    /// Trait to generate for; repeat for several
    #[arg(short, long = "interface", value_name = "NAME", required = true)]
    pub interfaces: Vec<String>,

    /// Source files or directories to search
    #[arg(short, long = "pattern", value_name = "PATH", default_value = ".")]
    pub patterns: Vec<PathBuf>,

    /// Write generated files here instead of next to each source file
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// TOML file with generator settings
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Accept a body on DELETE routes
    #[arg(long)]
    pub allow_delete_body: bool,

    /// Accept PATCH routes without a body
    #[arg(long)]
    pub allow_empty_patch_body: bool,

    /// Bind requests through the call carrier
    #[arg(long)]
    pub use_encoding: bool,

    /// Router path variable syntax
    #[arg(long, value_enum)]
    pub path_style: Option<PathStyleArg>,

    /// Also write a JSON plan of every generated interface
    #[arg(long)]
    pub emit_plan: bool,

    /// Log level used when RUST_LOG is unset
    #[arg(long, default_value = "info", value_parser = ["trace", "debug", "info", "warn", "error"])]
    pub level: String,
}

impl Args {
    /// Defaults, then the config file, then flags given on the command line.
    pub fn generator_config(&self) -> Result<GeneratorConfig> {
        let base = match &self.config {
            Some(path) => load_config(path)?,
            None => GeneratorConfig::default(),
        };
        Ok(self.apply_flags(base))
    }

    fn apply_flags(&self, mut config: GeneratorConfig) -> GeneratorConfig {
        config.allow_delete_body |= self.allow_delete_body;
        config.allow_empty_patch_body |= self.allow_empty_patch_body;
        config.use_structured_encoding |= self.use_encoding;
        if let Some(style) = self.path_style {
            config.path_style = style.into();
        }
        config
    }
}

pub fn load_config(path: &Path) -> Result<GeneratorConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Failed to parse config file: {}", path.display()))
}
