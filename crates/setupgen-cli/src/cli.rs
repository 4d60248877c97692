//! Command line arguments

use clap::Parser;
use std::path::PathBuf;

/// Generate the EKS Windows node setup script from the Amazon EKS Optimized
/// Windows AMI ImageBuilder component
#[derive(Parser, Debug, Default)]
#[command(name = "setupgen")]
#[command(version, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file, extension optional; must exist when given
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<String>,

    /// Region to retrieve the component from
    #[arg(long)]
    pub region: Option<String>,

    /// Build version ARN of the component
    #[arg(long, value_name = "ARN")]
    pub component_arn: Option<String>,

    /// AWS CLI executable
    #[arg(long, value_name = "PROGRAM")]
    pub aws_program: Option<String>,

    /// Read the component (YAML or get-component JSON) from a file
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output path of the generated script
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Print the parsed constants and build steps as JSON
    #[arg(long)]
    pub dump: bool,
}

impl Cli {
    /// Log filter directive for the requested verbosity
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "setupgen=info,setupgen_cli=info,setupgen_compiler=info,setupgen_parser=warn",
            1 => "setupgen=debug,setupgen_cli=debug,setupgen_compiler=debug,setupgen_parser=debug",
            _ => "setupgen=trace,setupgen_cli=trace,setupgen_compiler=trace,setupgen_parser=trace",
        }
    }
}
