//! Email/password and OAuth login.

use std::sync::Arc;

use crate::api::{AuthService, Credentials};
use crate::logging::{LogLevel, ViewLogger};
use crate::notify::Prompt;

/// Where the host should go after a login attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Navigate to this path or URL.
    Redirect(String),
    /// The backend refused the credentials.
    Rejected,
    /// The backend could not be reached.
    Error,
}

pub struct LoginView {
    service: Arc<dyn AuthService>,
    prompt: Arc<dyn Prompt>,
    logger: ViewLogger,
    oauth_url: String,
    pub email: String,
    pub password: String,
}

impl LoginView {
    pub fn new(
        service: Arc<dyn AuthService>,
        prompt: Arc<dyn Prompt>,
        oauth_url: impl Into<String>,
    ) -> Self {
        Self {
            service,
            prompt,
            logger: ViewLogger::new("login").with_route("/login"),
            oauth_url: oauth_url.into(),
            email: String::new(),
            password: String::new(),
        }
    }

    pub fn with_logger(mut self, logger: ViewLogger) -> Self {
        self.logger = logger;
        self
    }

    pub async fn submit(&mut self) -> LoginOutcome {
        let credentials = Credentials {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        };

        match self.service.login(&credentials).await {
            Ok(()) => {
                self.logger.event(LogLevel::Info, "login succeeded").emit();
                self.password.clear();
                LoginOutcome::Redirect("/".to_string())
            }
            Err(e) => match e.status() {
                Some(status) => {
                    self.logger
                        .event(LogLevel::Warn, "login rejected")
                        .field("status", status)
                        .emit();
                    self.prompt.alert("Login failed");
                    LoginOutcome::Rejected
                }
                None => {
                    self.logger
                        .event(LogLevel::Error, "login error")
                        .field("cause", e.to_string())
                        .emit();
                    self.prompt.alert("An error occurred");
                    LoginOutcome::Error
                }
            },
        }
    }

    /// External OAuth entry point.
    pub fn oauth_redirect(&self) -> LoginOutcome {
        LoginOutcome::Redirect(self.oauth_url.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeAuth, RecordingPrompt};

    fn login_view(auth: FakeAuth) -> (LoginView, Arc<RecordingPrompt>) {
        let prompt = Arc::new(RecordingPrompt::default());
        let mut view = LoginView::new(
            Arc::new(auth),
            prompt.clone(),
            "http://127.0.0.1:8000/accounts/google/login/",
        );
        view.email = " user@example.com ".into();
        view.password = "secret".into();
        (view, prompt)
    }

    #[tokio::test]
    async fn test_success_redirects_home() {
        let (mut view, prompt) = login_view(FakeAuth::Accept);
        assert_eq!(view.submit().await, LoginOutcome::Redirect("/".into()));
        assert!(view.password.is_empty());
        assert!(prompt.alerts().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_and_unreachable() {
        let (mut view, prompt) = login_view(FakeAuth::Reject(401));
        assert_eq!(view.submit().await, LoginOutcome::Rejected);
        assert_eq!(view.password, "secret");

        let (mut view, other) = login_view(FakeAuth::Unreachable);
        assert_eq!(view.submit().await, LoginOutcome::Error);

        assert_eq!(prompt.alerts(), vec!["Login failed"]);
        assert_eq!(other.alerts(), vec!["An error occurred"]);
    }

    #[test]
    fn test_oauth_redirect() {
        let (view, _) = login_view(FakeAuth::Accept);
        assert_eq!(
            view.oauth_redirect(),
            LoginOutcome::Redirect("http://127.0.0.1:8000/accounts/google/login/".into())
        );
    }
}
