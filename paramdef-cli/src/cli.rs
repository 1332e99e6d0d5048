//! Command-line interface definitions for `paramdef`.

use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};
use paramdef::ResolveOptions;
use paramdef::file::DocumentFormat;

/// Formats for rendering the resolved tree to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// YAML document.
    Yaml,
    /// Pretty-printed JSON.
    Json,
    /// TOML document.
    Toml,
}

impl OutputFormat {
    /// Returns the document format used to render this output.
    #[must_use]
    pub const fn document_format(self) -> DocumentFormat {
        match self {
            Self::Yaml => DocumentFormat::Yaml,
            Self::Json => DocumentFormat::Json,
            Self::Toml => DocumentFormat::Toml,
        }
    }
}

/// Parsed CLI arguments for `paramdef`.
#[derive(Debug, Parser)]
#[command(name = "paramdef")]
#[command(about = "Resolve layered parameter overrides against a schema")]
#[command(version)]
pub struct Args {
    /// Schema document or directory of documents.
    #[arg(value_name = "SCHEMA")]
    pub schema: Utf8PathBuf,
    /// Override documents or directories, applied in order.
    #[arg(value_name = "OVERRIDES")]
    pub overrides: Vec<Utf8PathBuf>,
    /// Fail when any override is not used by the schema.
    #[arg(long = "error-on-unused")]
    pub should_error_on_unused: bool,
    /// Write the resolved tree to this file instead of stdout.
    #[arg(long, value_name = "PATH")]
    pub out: Option<Utf8PathBuf>,
    /// Format for stdout rendering; ignored with `--out`.
    #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,
}

impl Args {
    /// Options passed to the resolver.
    #[must_use]
    pub fn resolve_options(&self) -> ResolveOptions {
        let options = ResolveOptions::new().error_on_unused(self.should_error_on_unused);
        self.out
            .iter()
            .fold(options, |opts, path| opts.out_path(path.clone()))
    }
}
