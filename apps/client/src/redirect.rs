use tracing::warn;

/// Invoked when the session is lost for good and the user has to sign in again.
pub trait LoginRedirect: Send + Sync {
    fn redirect_to_login(&self);
}

impl<F> LoginRedirect for F
where
    F: Fn() + Send + Sync,
{
    fn redirect_to_login(&self) {
        self()
    }
}

/// Default redirect for headless use: records the event in the log.
#[derive(Debug, Clone)]
pub struct LogRedirect {
    login_route: String,
}

impl LogRedirect {
    pub fn new(login_route: impl Into<String>) -> Self {
        Self {
            login_route: login_route.into(),
        }
    }
}

impl Default for LogRedirect {
    fn default() -> Self {
        Self::new("/login")
    }
}

impl LoginRedirect for LogRedirect {
    fn redirect_to_login(&self) {
        warn!("Session expired; sign in again via {}", self.login_route);
    }
}
