//! Release service - orchestrates the release pipeline
//!
//! Runs the stage sequence build → login → push against the
//! infrastructure adapters, with the contract the pipeline promises:
//!
//! - exactly one start notification before any stage
//! - image cleanup after the stages, on success and on every failure path
//! - exactly one terminal notification matching the outcome
//! - an unsupported branch aborts before any external command runs

use std::time::Instant;

use colored::Colorize;
use tracing::{info, warn};

use crate::config::PipelineConfig;
use crate::domain::{BuildContext, ImageReference, ReleaseOutcome, ReleaseStep, StepResult};
use crate::error::ReleaseError;
use crate::infrastructure::{ChatMessage, ContainerEngine, MessageColor, Notifier, RegistryAuth};

/// Report returned to the caller after a run, successful or not
#[derive(Debug)]
pub struct ReleaseReport {
    pub outcome: ReleaseOutcome,
    pub image: Option<ImageReference>,
    pub steps: Vec<StepResult>,
}

/// Service for orchestrating releases
pub struct ReleaseService<E, A, N> {
    engine: E,
    auth: A,
    notifier: N,
}

impl<E, A, N> ReleaseService<E, A, N>
where
    E: ContainerEngine,
    A: RegistryAuth,
    N: Notifier,
{
    pub fn new(engine: E, auth: A, notifier: N) -> Self {
        Self {
            engine,
            auth,
            notifier,
        }
    }

    /// Execute the full pipeline for one build context.
    ///
    /// Returns the report on success; on failure the error is returned
    /// and the terminal notification has already been sent.
    pub async fn execute(
        &self,
        config: &PipelineConfig,
        ctx: &BuildContext,
    ) -> Result<ReleaseReport, ReleaseError> {
        self.notify(config, MessageColor::Info, start_text(ctx)).await;

        let Some(image) = ctx.image_reference(&config.registry.repository) else {
            let error = ReleaseError::UnsupportedBranch {
                branch: ctx.branch.clone(),
            };
            warn!("{}", error);
            self.notify(config, MessageColor::Warning, abort_text(ctx)).await;
            return Err(error);
        };

        info!("Image reference: {}", image);

        let mut steps = Vec::new();
        let run = self.run_stages(config, &image, &mut steps).await;

        // Cleanup runs unconditionally after the stages
        self.engine.remove(&image).await;

        match run {
            Ok(()) => {
                self.notify(config, MessageColor::Good, success_text(ctx, &image))
                    .await;
                Ok(ReleaseReport {
                    outcome: ReleaseOutcome::Success,
                    image: Some(image),
                    steps,
                })
            }
            Err((step, error)) => {
                self.notify(config, MessageColor::Danger, failure_text(ctx, step, &error))
                    .await;
                Err(error)
            }
        }
    }

    /// Run build → login → push, stopping at the first failure.
    async fn run_stages(
        &self,
        config: &PipelineConfig,
        image: &ImageReference,
        steps: &mut Vec<StepResult>,
    ) -> Result<(), (ReleaseStep, ReleaseError)> {
        for (index, step) in ReleaseStep::ALL.iter().enumerate() {
            info!(
                "{} [{}/{}] {}",
                step.emoji(),
                index + 1,
                ReleaseStep::ALL.len(),
                step.name()
            );

            let start = Instant::now();
            let result: Result<(), ReleaseError> = match step {
                ReleaseStep::Build => self
                    .engine
                    .build(image, &config.docker.dockerfile, &config.docker.context)
                    .await
                    .map_err(Into::into),
                ReleaseStep::Login => self
                    .auth
                    .login(image.registry_host())
                    .await
                    .map_err(Into::into),
                ReleaseStep::Push => self.engine.push(image).await.map_err(Into::into),
            };
            let duration = start.elapsed();

            match result {
                Ok(()) => {
                    info!(
                        "{} {} completed in {:.1}s",
                        "✅".green(),
                        step.name(),
                        duration.as_secs_f64()
                    );
                    steps.push(StepResult::success(*step, duration));
                }
                Err(error) => {
                    let message = error.to_string();
                    warn!("{} {} failed: {}", "❌".red(), step.name(), message);
                    steps.push(StepResult::failure(*step, duration, message));
                    return Err((*step, error));
                }
            }
        }
        Ok(())
    }

    /// Send a notification, logging delivery failures without altering
    /// the pipeline outcome.
    async fn notify(&self, config: &PipelineConfig, color: MessageColor, text: String) {
        if config.notify.disabled {
            return;
        }
        let message = ChatMessage::new(config.notify.channel.as_str(), color, text);
        if let Err(e) = self.notifier.send(&message).await {
            warn!("Failed to deliver notification: {}", e);
        }
    }
}

fn start_text(ctx: &BuildContext) -> String {
    format!(
        "🚀 Release started: branch `{}`, version {}, build #{} (run {})",
        ctx.branch, ctx.version, ctx.build_number, ctx.run_id
    )
}

fn abort_text(ctx: &BuildContext) -> String {
    format!(
        "⚠️ Release aborted: branch `{}` does not produce an image (run {})",
        ctx.branch, ctx.run_id
    )
}

fn success_text(ctx: &BuildContext, image: &ImageReference) -> String {
    format!("✅ Release succeeded: pushed {} (run {})", image, ctx.run_id)
}

fn failure_text(ctx: &BuildContext, step: ReleaseStep, error: &ReleaseError) -> String {
    format!(
        "❌ Release failed at {}: {} (run {})",
        step.name(),
        error,
        ctx.run_id
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use crate::error::{DockerError, NotifyError, RegistryError};

    /// Records every engine call; stages fail according to the flags.
    #[derive(Default)]
    struct FakeEngine {
        fail_build: bool,
        fail_push: bool,
        calls: Mutex<Vec<String>>,
    }

    impl FakeEngine {
        fn record(&self, call: &str) {
            self.calls.lock().unwrap().push(call.to_string());
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ContainerEngine for &FakeEngine {
        async fn build(
            &self,
            image: &ImageReference,
            _dockerfile: &str,
            _context: &str,
        ) -> Result<(), DockerError> {
            self.record("build");
            if self.fail_build {
                return Err(DockerError::BuildFailed {
                    image: image.to_string(),
                    message: "boom".to_string(),
                });
            }
            Ok(())
        }

        async fn push(&self, image: &ImageReference) -> Result<(), DockerError> {
            self.record("push");
            if self.fail_push {
                return Err(DockerError::PushFailed {
                    image: image.to_string(),
                    message: "boom".to_string(),
                });
            }
            Ok(())
        }

        async fn remove(&self, _image: &ImageReference) {
            self.record("remove");
        }
    }

    #[derive(Default)]
    struct FakeAuth {
        fail: bool,
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl RegistryAuth for &FakeAuth {
        async fn login(&self, host: &str) -> Result<(), RegistryError> {
            self.calls.lock().unwrap().push(host.to_string());
            if self.fail {
                return Err(RegistryError::LoginFailed {
                    host: host.to_string(),
                    message: "denied".to_string(),
                });
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeNotifier {
        sent: Mutex<Vec<(MessageColor, String)>>,
    }

    impl FakeNotifier {
        fn sent(&self) -> Vec<(MessageColor, String)> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Notifier for &FakeNotifier {
        async fn send(&self, message: &ChatMessage) -> Result<(), NotifyError> {
            self.sent
                .lock()
                .unwrap()
                .push((message.color, message.text.clone()));
            Ok(())
        }
    }

    fn test_config() -> PipelineConfig {
        let mut config = PipelineConfig::default();
        config.registry.repository = "registry.example.com/team/app".to_string();
        config.notify.webhook_url = "https://chat.example.com/hooks/abc".to_string();
        config
    }

    #[tokio::test]
    async fn test_successful_run_pushes_then_cleans_up() {
        let engine = FakeEngine::default();
        let auth = FakeAuth::default();
        let notifier = FakeNotifier::default();
        let service = ReleaseService::new(&engine, &auth, &notifier);

        let ctx = BuildContext::new("main", "1.2.3", 7);
        let report = service.execute(&test_config(), &ctx).await.unwrap();

        assert_eq!(report.outcome, ReleaseOutcome::Success);
        assert_eq!(
            report.image.unwrap().to_string(),
            "registry.example.com/team/app:v1.2.3"
        );
        assert_eq!(engine.calls(), vec!["build", "push", "remove"]);
        assert_eq!(
            auth.calls.lock().unwrap().as_slice(),
            ["registry.example.com"]
        );

        // Exactly one start and one terminal notification
        let sent = notifier.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].0, MessageColor::Info);
        assert_eq!(sent[1].0, MessageColor::Good);
    }

    #[tokio::test]
    async fn test_unsupported_branch_runs_nothing() {
        let engine = FakeEngine::default();
        let auth = FakeAuth::default();
        let notifier = FakeNotifier::default();
        let service = ReleaseService::new(&engine, &auth, &notifier);

        let ctx = BuildContext::new("feature/x", "1.2.3", 7);
        let error = service.execute(&test_config(), &ctx).await.unwrap_err();

        assert!(matches!(error, ReleaseError::UnsupportedBranch { .. }));
        assert!(engine.calls().is_empty());
        assert!(auth.calls.lock().unwrap().is_empty());

        let sent = notifier.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].0, MessageColor::Info);
        assert_eq!(sent[1].0, MessageColor::Warning);
    }

    #[tokio::test]
    async fn test_build_failure_still_cleans_up() {
        let engine = FakeEngine {
            fail_build: true,
            ..Default::default()
        };
        let auth = FakeAuth::default();
        let notifier = FakeNotifier::default();
        let service = ReleaseService::new(&engine, &auth, &notifier);

        let ctx = BuildContext::new("dev", "1.2.3", 42);
        let error = service.execute(&test_config(), &ctx).await.unwrap_err();

        assert!(matches!(error, ReleaseError::Docker(_)));
        // No login or push after a failed build, but cleanup still ran
        assert_eq!(engine.calls(), vec!["build", "remove"]);
        assert!(auth.calls.lock().unwrap().is_empty());

        let sent = notifier.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[1].0, MessageColor::Danger);
        assert!(sent[1].1.contains("Build"));
    }

    #[tokio::test]
    async fn test_push_failure_still_cleans_up() {
        let engine = FakeEngine {
            fail_push: true,
            ..Default::default()
        };
        let auth = FakeAuth::default();
        let notifier = FakeNotifier::default();
        let service = ReleaseService::new(&engine, &auth, &notifier);

        let ctx = BuildContext::new("dev", "1.2.3", 42);
        let error = service.execute(&test_config(), &ctx).await.unwrap_err();

        assert!(matches!(error, ReleaseError::Docker(_)));
        assert_eq!(engine.calls(), vec!["build", "push", "remove"]);

        let sent = notifier.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[1].0, MessageColor::Danger);
        assert!(sent[1].1.contains("Push"));
    }

    #[tokio::test]
    async fn test_login_failure_skips_push() {
        let engine = FakeEngine::default();
        let auth = FakeAuth {
            fail: true,
            ..Default::default()
        };
        let notifier = FakeNotifier::default();
        let service = ReleaseService::new(&engine, &auth, &notifier);

        let ctx = BuildContext::new("main", "2.0.0", 1);
        let error = service.execute(&test_config(), &ctx).await.unwrap_err();

        assert!(matches!(error, ReleaseError::Registry(_)));
        assert_eq!(engine.calls(), vec!["build", "remove"]);

        let sent = notifier.sent();
        assert_eq!(sent[1].0, MessageColor::Danger);
        assert!(sent[1].1.contains("Login"));
    }

    #[tokio::test]
    async fn test_dev_branch_tag_carries_build_number() {
        let engine = FakeEngine::default();
        let auth = FakeAuth::default();
        let notifier = FakeNotifier::default();
        let service = ReleaseService::new(&engine, &auth, &notifier);

        let ctx = BuildContext::new("dev", "1.2.3", 42);
        let report = service.execute(&test_config(), &ctx).await.unwrap();

        assert_eq!(report.image.unwrap().tag, "dev-42");
        assert_eq!(report.steps.len(), 3);
        assert!(report.steps.iter().all(|s| s.success));
    }

    #[tokio::test]
    async fn test_disabled_notifications_send_nothing() {
        let engine = FakeEngine::default();
        let auth = FakeAuth::default();
        let notifier = FakeNotifier::default();
        let service = ReleaseService::new(&engine, &auth, &notifier);

        let mut config = test_config();
        config.notify.disabled = true;

        let ctx = BuildContext::new("main", "1.2.3", 7);
        service.execute(&config, &ctx).await.unwrap();

        assert!(notifier.sent().is_empty());
    }
}
