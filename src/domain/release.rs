//! Release domain types
//!
//! Image reference derivation and the release pipeline vocabulary.
//! Everything here is pure: the build context is constructed once at
//! pipeline entry and read-only afterwards.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Release channel derived from the branch being built.
///
/// Only two branches produce releasable images. Any other branch
/// yields `None`, which the pipeline turns into an explicit
/// `UnsupportedBranch` failure instead of the historical behavior of
/// continuing with an empty image name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseChannel {
    /// `main` branch: versioned release, tagged `v{version}`
    Stable,
    /// `dev` branch: snapshot release, tagged `{branch}-{build}`
    Dev,
}

impl ReleaseChannel {
    pub fn from_branch(branch: &str) -> Option<Self> {
        match branch {
            "main" => Some(Self::Stable),
            "dev" => Some(Self::Dev),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Stable => "stable",
            Self::Dev => "dev",
        }
    }
}

/// Sanitize a branch name for use inside an image tag.
///
/// Pipeline engines hand over branch names either raw (`feature/x`) or
/// URL-encoded (`feature%2Fx`); both forms of the path separator become
/// a hyphen.
pub fn sanitize_branch(branch: &str) -> String {
    branch.replace("%2F", "-").replace('/', "-")
}

/// Registry-qualified image name plus tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    /// Registry host plus repository path, e.g. `registry.example.com/team/app`
    pub repository: String,
    /// Tag, e.g. `v1.2.3` or `feature-x-42`
    pub tag: String,
}

impl ImageReference {
    pub fn new(repository: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            tag: tag.into(),
        }
    }

    /// Registry host component (everything before the first `/`).
    pub fn registry_host(&self) -> &str {
        self.repository.split('/').next().unwrap_or(&self.repository)
    }
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.repository, self.tag)
    }
}

/// Immutable per-run build context.
///
/// Constructed once at pipeline entry from validated inputs, threaded
/// by reference through every stage, dropped at pipeline end.
#[derive(Debug, Clone)]
pub struct BuildContext {
    /// Branch being built (raw, unsanitized)
    pub branch: String,
    /// Version string from the version file
    pub version: String,
    /// Numeric build identifier from the pipeline engine
    pub build_number: u64,
    /// Correlates log lines and notifications for one run
    pub run_id: Uuid,
    /// When the pipeline started
    pub started_at: DateTime<Utc>,
}

impl BuildContext {
    pub fn new(branch: impl Into<String>, version: impl Into<String>, build_number: u64) -> Self {
        Self {
            branch: branch.into(),
            version: version.into(),
            build_number,
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
        }
    }

    /// Release channel for this context's branch, if any.
    pub fn channel(&self) -> Option<ReleaseChannel> {
        ReleaseChannel::from_branch(&self.branch)
    }

    /// Derive the image reference for this build.
    ///
    /// - `main` → `{repository}:v{version}`
    /// - `dev`  → `{repository}:{sanitized-branch}-{build_number}`
    /// - anything else → `None`
    pub fn image_reference(&self, repository: &str) -> Option<ImageReference> {
        match self.channel()? {
            ReleaseChannel::Stable => Some(ImageReference::new(
                repository,
                format!("v{}", self.version),
            )),
            ReleaseChannel::Dev => Some(ImageReference::new(
                repository,
                format!("{}-{}", sanitize_branch(&self.branch), self.build_number),
            )),
        }
    }
}

/// Individual steps in the release pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseStep {
    /// Build the container image
    Build,
    /// Authenticate to the container registry
    Login,
    /// Push the image to the registry
    Push,
}

impl ReleaseStep {
    pub const ALL: [ReleaseStep; 3] = [Self::Build, Self::Login, Self::Push];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Build => "Build",
            Self::Login => "Login",
            Self::Push => "Push",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Build => "🔨",
            Self::Login => "🔐",
            Self::Push => "📤",
        }
    }
}

/// Result of one executed pipeline step
#[derive(Debug, Clone)]
pub struct StepResult {
    pub step: ReleaseStep,
    pub duration: Duration,
    pub success: bool,
    pub error: Option<String>,
}

impl StepResult {
    pub fn success(step: ReleaseStep, duration: Duration) -> Self {
        Self {
            step,
            duration,
            success: true,
            error: None,
        }
    }

    pub fn failure(step: ReleaseStep, duration: Duration, error: impl Into<String>) -> Self {
        Self {
            step,
            duration,
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Terminal outcome of a pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    Success,
    /// Refused before any external command ran (unsupported branch)
    Aborted,
    Failed(ReleaseStep),
}

impl ReleaseOutcome {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Aborted => "aborted",
            Self::Failed(_) => "failure",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_branch_versioned_tag() {
        let ctx = BuildContext::new("main", "1.2.3", 7);
        let image = ctx
            .image_reference("registry.example.com/team/app")
            .unwrap();
        assert_eq!(image.to_string(), "registry.example.com/team/app:v1.2.3");
    }

    #[test]
    fn test_dev_branch_build_tag() {
        let ctx = BuildContext::new("dev", "1.2.3", 42);
        let image = ctx
            .image_reference("registry.example.com/team/app")
            .unwrap();
        assert_eq!(image.tag, "dev-42");
    }

    #[test]
    fn test_sanitize_replaces_slash() {
        assert_eq!(sanitize_branch("feature/x"), "feature-x");
        assert_eq!(sanitize_branch("feature%2Fx"), "feature-x");
        assert_eq!(sanitize_branch("a/b/c"), "a-b-c");
        assert_eq!(sanitize_branch("plain"), "plain");
    }

    #[test]
    fn test_unknown_branch_has_no_reference() {
        for branch in ["feature/x", "master", "release/1.0", ""] {
            let ctx = BuildContext::new(branch, "1.2.3", 1);
            assert!(ctx.channel().is_none());
            assert!(ctx.image_reference("registry.example.com/app").is_none());
        }
    }

    #[test]
    fn test_registry_host_extraction() {
        let image = ImageReference::new("registry.example.com/team/app", "v1.0.0");
        assert_eq!(image.registry_host(), "registry.example.com");
    }

    #[test]
    fn test_channel_from_branch() {
        assert_eq!(
            ReleaseChannel::from_branch("main"),
            Some(ReleaseChannel::Stable)
        );
        assert_eq!(ReleaseChannel::from_branch("dev"), Some(ReleaseChannel::Dev));
        assert_eq!(ReleaseChannel::from_branch("Main"), None);
    }
}
