//! Descriptive comments emitted above known build steps

const STEP_COMMENTS: &[(&str, &[&str])] = &[
    ("ConfigureDirectories", &["# Create each of our directories"]),
    ("DownloadKubernetes", &["# Download the Kubernetes components"]),
    ("DownloadEKSArtifacts", &["# Download the EKS artifacts archive"]),
    ("ExtractEKSArtifacts", &["# Extract the EKS artifacts archive"]),
    ("MoveEKSArtifacts", &["# Move the EKS files into place"]),
    ("ExecuteBuildScripts", &["# Perform EKS worker node setup"]),
    ("RemoveEKSArtifactDownloadDirectory", &["# Perform cleanup"]),
    (
        "InstallContainers",
        &[
            "# Install the Windows Containers feature",
            "# (Note: this is actually a no-op here, since we install the feature beforehand in startup.ps1)",
        ],
    ),
];

/// Comment lines for the step with the given name, if it has any
pub fn comment_for_step(name: &str) -> Option<&'static [&'static str]> {
    STEP_COMMENTS
        .iter()
        .find(|(step_name, _)| *step_name == name)
        .map(|(_, lines)| *lines)
}
