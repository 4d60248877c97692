//! Statement generation for build step actions
//!
//! One handler per action kind. Every path or string a handler emits goes
//! through constant substitution against the final constant table.

use crate::codegen::constants::ConstantResolver;
use crate::error::{CompileError, Result};
use setupgen_core::ast::{Action, ConstantTable, InputEntry, Step};

/// Commands with this prefix set the fail-fast mode the header already sets
const ERROR_MODE_PREFIX: &str = "$ErrorActionPreference";

/// Generate the statements for a step
pub fn compile_action(action: Action, step: &Step, constants: &ConstantTable) -> Result<Vec<String>> {
    match action {
        Action::CreateFolder => compile_create_folder(step, constants),
        Action::DeleteFolder => compile_delete_folder(step, constants),
        Action::MoveFile => compile_move_file(step, constants),
        Action::S3Download => compile_s3_download(step, constants),
        Action::ExecutePowerShell => compile_execute_powershell(step, constants),
        Action::Reboot => Ok(Vec::new()),
    }
}

/// Convert an `s3://bucket/key` URI to its HTTPS URL
pub fn s3_uri_to_https_url(uri: &str) -> Result<String> {
    let location = uri
        .strip_prefix("s3://")
        .ok_or_else(|| CompileError::InvalidS3Uri(uri.to_string()))?;

    match location.split_once('/') {
        Some((bucket, key)) if !bucket.is_empty() => {
            Ok(format!("https://{}.s3.amazonaws.com/{}", bucket, key))
        }
        _ => Err(CompileError::InvalidS3Uri(uri.to_string())),
    }
}

fn substitute(value: &str, constants: &ConstantTable) -> String {
    ConstantResolver::rewrite_value(value, constants)
}

fn entries<'a>(step: &'a Step) -> Result<&'a [InputEntry]> {
    step.inputs.entries().ok_or_else(|| missing(step, "inputs"))
}

fn required<'a>(step: &Step, value: &'a Option<String>, field: &str) -> Result<&'a str> {
    value.as_deref().ok_or_else(|| missing(step, field))
}

fn missing(step: &Step, field: &str) -> CompileError {
    CompileError::MissingInput {
        step: step.name.clone(),
        field: field.to_string(),
    }
}

fn compile_create_folder(step: &Step, constants: &ConstantTable) -> Result<Vec<String>> {
    let directories: Vec<String> = match step.loop_values() {
        Some(values) => values.to_vec(),
        None => entries(step)?
            .iter()
            .map(|entry| required(step, &entry.path, "path").map(str::to_string))
            .collect::<Result<_>>()?,
    };

    let directories: Vec<String> = directories
        .iter()
        .map(|d| substitute(d, constants))
        .collect();

    Ok(vec![
        format!("foreach ($dir in @({})) {{", directories.join(", ")),
        "\tNew-Item -Path $dir -ItemType Directory -Force | Out-Null".to_string(),
        "}".to_string(),
    ])
}

fn compile_delete_folder(step: &Step, constants: &ConstantTable) -> Result<Vec<String>> {
    entries(step)?
        .iter()
        .map(|entry| {
            let path = required(step, &entry.path, "path")?;
            Ok(format!(
                "Remove-Item -Path \"{}\" -Recurse -Force",
                substitute(path, constants)
            ))
        })
        .collect()
}

fn compile_move_file(step: &Step, constants: &ConstantTable) -> Result<Vec<String>> {
    entries(step)?
        .iter()
        .map(|entry| {
            let source = required(step, &entry.source, "source")?;
            let destination = required(step, &entry.destination, "destination")?;
            Ok(format!(
                "Move-Item -Path \"{}\" -Destination \"{}\" -Force",
                substitute(source, constants),
                substitute(destination, constants)
            ))
        })
        .collect()
}

fn compile_s3_download(step: &Step, constants: &ConstantTable) -> Result<Vec<String>> {
    entries(step)?
        .iter()
        .map(|entry| {
            let source = required(step, &entry.source, "source")?;
            let destination = required(step, &entry.destination, "destination")?;
            Ok(format!(
                "$webClient.DownloadFile(\"{}\", \"{}\")",
                s3_uri_to_https_url(source)?,
                substitute(destination, constants)
            ))
        })
        .collect()
}

fn compile_execute_powershell(step: &Step, constants: &ConstantTable) -> Result<Vec<String>> {
    let commands = step
        .inputs
        .commands()
        .ok_or_else(|| missing(step, "commands"))?;

    Ok(commands
        .iter()
        .filter(|c| !c.starts_with(ERROR_MODE_PREFIX))
        .map(|c| substitute(c, constants).replace('\'', "\""))
        .collect())
}
