//! Named-step patches
//!
//! A handful of build steps are rewritten before code generation: the
//! directory list gains the temp root, extraction uses absolute paths, the
//! runtime installation swaps in containerd 1.7.0, and the build scripts are
//! invoked directly. Some patches also inject literal PowerShell ahead of the
//! step.

use crate::codegen::constants::TEMP_ROOT_VALUE;
use crate::error::{CompileError, Result};
use setupgen_core::ast::{Step, StepInputs};

/// Mutates a step in place and returns lines to emit ahead of it
pub type StepPatch = fn(&mut Step) -> Result<Vec<String>>;

const STEP_PATCHES: &[(&str, StepPatch)] = &[
    ("ConfigureDirectories", configure_directories),
    ("DownloadKubernetes", download_kubernetes),
    ("ExtractEKSArtifacts", extract_eks_artifacts),
    ("InstallContainerRuntimes", install_container_runtimes),
    ("ExecuteBuildScripts", execute_build_scripts),
];

/// Commands with this prefix create directories the script already made
const DIRECTORY_CREATION_PREFIX: &str = "New-Item";

/// Relative tokens in the extraction commands and their absolute forms
const EXTRACTION_PATHS: &[(&str, &str)] = &[
    ("EKS-Artifacts.zip", r#""C:\EKS-Artifacts.zip""#),
    ("TempEKSArtifactDir", r"C:\TempEKSArtifactDir"),
];

const DRIVER_INSTALL: &[&str] = &[
    "# Install the NVIDIA GPU drivers",
    "$driverBucket = 'ec2-windows-nvidia-drivers'",
    "$driver = Get-S3Object -BucketName $driverBucket -KeyPrefix 'latest' -Region 'us-east-1' | Where-Object {$_.Key.Contains('server2022')}",
    r#"Copy-S3Object -BucketName $driverBucket -Key $driver.Key -LocalFile "$TempRoot\driver.exe" -Region 'us-east-1'"#,
    r#"Start-Process -FilePath "$TempRoot\driver.exe" -ArgumentList @('-s', '-noreboot') -NoNewWindow -Wait"#,
    "",
];

const CONTAINERD_INSTALL: &[&str] = &[
    "# -------",
    "",
    "# TEMPORARY UNTIL EKS ADDS SUPPORT FOR CONTAINERD v1.7.0:",
    "# Download and extract the containerd 1.7.0 release build",
    r#"$containerdTarball = "$TempPath\containerd-1.7.0.tar.gz""#,
    r#"$containerdFiles = "$TempPath\containerd-1.7.0""#,
    "$webClient.DownloadFile('https://github.com/containerd/containerd/releases/download/v1.7.0/containerd-1.7.0-windows-amd64.tar.gz', $containerdTarball)",
    r#"New-Item -Path "$containerdFiles" -ItemType Directory -Force | Out-Null"#,
    r#"tar.exe -xvzf "$containerdTarball" -C "$containerdFiles""#,
    "",
    "# Move the containerd files into place",
    r#"Move-Item -Path "$containerdFiles\bin\containerd.exe" -Destination "$ContainerdPath\containerd.exe" -Force"#,
    r#"Move-Item -Path "$containerdFiles\bin\containerd-shim-runhcs-v1.exe" -Destination "$ContainerdPath\containerd-shim-runhcs-v1.exe" -Force"#,
    r#"Move-Item -Path "$containerdFiles\bin\ctr.exe" -Destination "$ContainerdPath\ctr.exe" -Force"#,
    "",
    "# Clean up the containerd intermediate files",
    r#"Remove-Item -Path "$containerdFiles" -Recurse -Force"#,
    r#"Remove-Item -Path "$containerdTarball" -Force"#,
    "",
    "# -------",
    "",
    "# Patch the containerd setup script to configure a log file (rather than just discarding log output) and to use the upstream pause",
    "# container image rather than the EKS version, since the latter appears to cause errors when attempting to create Windows Pods",
    r#"PatchFile -File "$TempPath\Add-ContainerdRuntime.ps1" -Patches @{"#,
    "\t\"containerd --register-service\" = \"containerd --register-service --log-file 'C:\\ProgramData\\containerd\\root\\output.log'\";",
    "\t\"amazonaws.com/eks/pause-windows:latest\" = \"registry.k8s.io/pause:3.9\"",
    "}",
    "",
    "# Add the full Windows Server 2022 base image and the pause image to the list of images to pre-pull",
    r#"$baseLayersFile = "$TempPath\eks.baselayers.config""#,
    "$baseLayers = Get-Content -Path $baseLayersFile -Raw | ConvertFrom-Json",
    r#"$baseLayers.2022 += "mcr.microsoft.com/windows/server:ltsc2022""#,
    r#"$baseLayers.2022 += "registry.k8s.io/pause:3.9""#,
    "$patchedJson = ConvertTo-Json -Depth 100 -InputObject $baseLayers",
    "Set-Content -Path $baseLayersFile -Value $patchedJson -NoNewline",
];

const CONTAINERD_REGISTRATION: &[&str] = &[
    "",
    "# Register containerd as the EKS container runtime",
    "Push-Location $TempPath",
    r#"& .\Add-ContainerdRuntime.ps1 -Path "$ContainerdPath""#,
    "Pop-Location",
];

/// Look up the patch registered for a step name
pub fn find_step_patch(name: &str) -> Option<StepPatch> {
    STEP_PATCHES
        .iter()
        .find(|(step_name, _)| *step_name == name)
        .map(|(_, patch)| *patch)
}

/// Apply the patch registered for the step, if any
///
/// Returns the lines to inject ahead of the step; empty when the step has
/// no patch or its patch injects nothing.
pub fn apply_step_patch(step: &mut Step) -> Result<Vec<String>> {
    match find_step_patch(&step.name) {
        Some(patch) => patch(step),
        None => Ok(Vec::new()),
    }
}

fn to_lines(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|l| l.to_string()).collect()
}

fn invalid(step_name: &str, message: &str) -> CompileError {
    CompileError::InvalidStep {
        step: step_name.to_string(),
        message: message.to_string(),
    }
}

/// Add the temp root to the directories to create
///
/// The literal value is pushed; step codegen turns it into `$TempRoot`.
fn configure_directories(step: &mut Step) -> Result<Vec<String>> {
    let name = step.name.as_str();
    let spec = step
        .loop_spec
        .as_mut()
        .ok_or_else(|| invalid(name, "expected a loop over directories"))?;
    spec.for_each.push(TEMP_ROOT_VALUE.to_string());

    Ok(Vec::new())
}

/// Install the GPU drivers before Kubernetes is downloaded
fn download_kubernetes(_step: &mut Step) -> Result<Vec<String>> {
    Ok(to_lines(DRIVER_INSTALL))
}

/// Drop the redundant directory creation and use absolute paths
fn extract_eks_artifacts(step: &mut Step) -> Result<Vec<String>> {
    let name = step.name.as_str();
    let commands = step
        .inputs
        .commands_mut()
        .ok_or_else(|| invalid(name, "expected a command list"))?;

    commands.retain(|c| !c.starts_with(DIRECTORY_CREATION_PREFIX));
    for command in commands.iter_mut() {
        *command = EXTRACTION_PATHS
            .iter()
            .fold(command.clone(), |acc, (token, absolute)| acc.replace(token, absolute));
    }

    Ok(Vec::new())
}

/// Swap in containerd 1.7.0 and patch its configuration
fn install_container_runtimes(step: &mut Step) -> Result<Vec<String>> {
    step.inputs = StepInputs::Commands {
        commands: to_lines(CONTAINERD_REGISTRATION),
    };
    Ok(to_lines(CONTAINERD_INSTALL))
}

/// Invoke each build script directly from the temp directory
fn execute_build_scripts(step: &mut Step) -> Result<Vec<String>> {
    let name = step.name.as_str();
    let spec = step
        .loop_spec
        .as_mut()
        .ok_or_else(|| invalid(name, "expected a loop over build scripts"))?;

    for script in spec.for_each.iter_mut() {
        *script = format!("& {}", script);
    }

    let mut commands = Vec::with_capacity(spec.for_each.len() + 2);
    commands.push("Push-Location $TempPath".to_string());
    commands.extend(spec.for_each.iter().cloned());
    commands.push("Pop-Location".to_string());

    step.inputs = StepInputs::Commands { commands };
    Ok(Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commands(list: &[&str]) -> StepInputs {
        StepInputs::Commands {
            commands: to_lines(list),
        }
    }

    #[test]
    fn test_find_step_patch() {
        assert!(find_step_patch("ConfigureDirectories").is_some());
        assert!(find_step_patch("ExecuteBuildScripts").is_some());
        assert!(find_step_patch("MoveEKSArtifacts").is_none());
    }

    #[test]
    fn test_configure_directories_appends_temp_root() {
        let mut step = Step::new("ConfigureDirectories", "CreateFolder", StepInputs::None)
            .with_loop(vec!["A".to_string(), "B".to_string()]);

        let injected = apply_step_patch(&mut step).unwrap();
        assert!(injected.is_empty());
        assert_eq!(step.loop_values().unwrap(), ["A", "B", TEMP_ROOT_VALUE]);
    }

    #[test]
    fn test_configure_directories_without_loop() {
        let mut step = Step::new("ConfigureDirectories", "CreateFolder", StepInputs::None);

        let err = apply_step_patch(&mut step).unwrap_err();
        assert!(matches!(err, CompileError::InvalidStep { .. }));
    }

    #[test]
    fn test_download_kubernetes_injects_driver_install() {
        let mut step = Step::new("DownloadKubernetes", "S3Download", StepInputs::Entries(vec![]));
        let before = step.clone();

        let injected = apply_step_patch(&mut step).unwrap();
        assert_eq!(injected[0], "# Install the NVIDIA GPU drivers");
        assert_eq!(injected.last().map(String::as_str), Some(""));
        assert_eq!(step, before);
    }

    #[test]
    fn test_extract_eks_artifacts_rewrites_commands() {
        let mut step = Step::new(
            "ExtractEKSArtifacts",
            "ExecutePowerShell",
            commands(&[
                "New-Item -Path TempEKSArtifactDir -ItemType Directory",
                "Expand-Archive -Path EKS-Artifacts.zip -DestinationPath TempEKSArtifactDir",
            ]),
        );

        apply_step_patch(&mut step).unwrap();
        assert_eq!(
            step.inputs.commands().unwrap(),
            [r#"Expand-Archive -Path "C:\EKS-Artifacts.zip" -DestinationPath C:\TempEKSArtifactDir"#]
        );
    }

    #[test]
    fn test_install_container_runtimes_replaces_commands() {
        let mut step = Step::new(
            "InstallContainerRuntimes",
            "ExecutePowerShell",
            commands(&["& .\\Add-ContainerdRuntime.ps1 -Path '{{ ContainerdPath }}'"]),
        );

        let injected = apply_step_patch(&mut step).unwrap();
        assert_eq!(injected.first().map(String::as_str), Some("# -------"));
        assert!(injected.iter().any(|l| l.starts_with("PatchFile -File")));

        let replaced = step.inputs.commands().unwrap();
        assert_eq!(replaced.len(), 5);
        assert_eq!(replaced[2], "Push-Location $TempPath");
        assert_eq!(replaced[4], "Pop-Location");
    }

    #[test]
    fn test_execute_build_scripts_wraps_invocations() {
        let mut step = Step::new(
            "ExecuteBuildScripts",
            "ExecutePowerShell",
            commands(&["Push-Location '{{ TempPath }}'", "{{ loop.value }}", "Pop-Location"]),
        )
        .with_loop(vec![
            r".\Install-EKSWorkerNode.ps1".to_string(),
            r".\Configure-Logging.ps1".to_string(),
        ]);

        apply_step_patch(&mut step).unwrap();
        assert_eq!(
            step.loop_values().unwrap(),
            [r"& .\Install-EKSWorkerNode.ps1", r"& .\Configure-Logging.ps1"]
        );
        assert_eq!(
            step.inputs.commands().unwrap(),
            [
                "Push-Location $TempPath",
                r"& .\Install-EKSWorkerNode.ps1",
                r"& .\Configure-Logging.ps1",
                "Pop-Location",
            ]
        );
    }

    #[test]
    fn test_unpatched_step_is_untouched() {
        let mut step = Step::new("InstallContainers", "ExecutePowerShell", commands(&["x"]));
        let before = step.clone();

        assert!(apply_step_patch(&mut step).unwrap().is_empty());
        assert_eq!(step, before);
    }
}
