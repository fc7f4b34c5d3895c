//! Command-line interface for the compiler.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use console::style;

use crate::error::{CompilerError, Result};
use crate::messages::Severity;
use crate::session::{compile_document, Diagnostic, RecordSet};
use crate::types::Platform;

/// URL reservation compiler - Translate UrlReservation markup into table records.
#[derive(Parser)]
#[command(name = "urlacl-compile")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Serialization format of the emitted records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Yaml,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compile the HTTP extension elements of a source file.
    Compile {
        /// Source XML file
        input: PathBuf,

        /// Target platform (x86, x64, arm64)
        #[arg(short, long, default_value = "x86")]
        platform: Platform,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,

        /// Write records to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Compile {
            input,
            platform,
            format,
            output,
        } => compile_command(&input, platform, format, output.as_deref()),
    }
}

/// Execute the compile command.
fn compile_command(
    input: &Path,
    platform: Platform,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let source = fs::read_to_string(input)?;
    let doc = roxmltree::Document::parse(&source)?;

    let result = compile_document(&doc, platform).into_output();

    for diagnostic in &result.diagnostics {
        print_diagnostic(input, diagnostic);
    }

    let errors = result.error_count();
    let Some(records) = result.records else {
        return Err(CompilerError::CompilationFailed { errors });
    };

    let rendered = render_records(&records, format)?;
    match output {
        Some(path) => {
            fs::write(path, rendered)?;
            eprintln!(
                "{} {} reservation(s), {} ACE(s) to {}",
                style("Wrote").for_stderr().green().bold(),
                records.url_reservations.len(),
                records.url_aces.len(),
                path.display()
            );
        }
        None => print!("{rendered}"),
    }

    Ok(())
}

/// Serialize the record set.
pub fn render_records(records: &RecordSet, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => Ok(serde_yaml_ng::to_string(records)?),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(records)?;
            json.push('\n');
            Ok(json)
        }
    }
}

fn print_diagnostic(input: &Path, diagnostic: &Diagnostic) {
    let severity = match diagnostic.severity() {
        Severity::Error => style("error").for_stderr().red().bold(),
        Severity::Warning => style("warning").for_stderr().yellow().bold(),
    };
    eprintln!(
        "{}({}): {}: {}",
        input.display(),
        diagnostic.position,
        severity,
        diagnostic.message
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifier::Identifier;
    use crate::types::{HandleExisting, UrlReservation};

    #[test]
    fn test_cli_parse_compile() {
        let cli = Cli::parse_from(["urlacl-compile", "compile", "product.wxs"]);

        let Commands::Compile {
            input,
            platform,
            format,
            output,
        } = cli.command;
        assert_eq!(input, PathBuf::from("product.wxs"));
        assert_eq!(platform, Platform::X86);
        assert_eq!(format, OutputFormat::Yaml);
        assert!(output.is_none());
    }

    #[test]
    fn test_cli_parse_compile_with_options() {
        let cli = Cli::parse_from([
            "urlacl-compile",
            "compile",
            "product.wxs",
            "--platform",
            "arm64",
            "--format",
            "json",
        ]);

        let Commands::Compile {
            platform, format, ..
        } = cli.command;
        assert_eq!(platform, Platform::Arm64);
        assert_eq!(format, OutputFormat::Json);
    }

    #[test]
    fn test_cli_rejects_unknown_platform() {
        let result = Cli::try_parse_from(["urlacl-compile", "compile", "a.wxs", "-p", "mips"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_render_records_json() {
        let records = RecordSet {
            url_reservations: vec![UrlReservation {
                id: Identifier::new("Api"),
                handle_existing: HandleExisting::Fail,
                sddl: None,
                url: "http://+:80/".to_string(),
                component_id: "C".to_string(),
            }],
            ..RecordSet::default()
        };
        let json = render_records(&records, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["url_reservations"][0]["id"], "Api");
        assert_eq!(value["url_reservations"][0]["handle_existing"], 2);
        assert!(value["url_reservations"][0].get("sddl").is_none());
    }
}
