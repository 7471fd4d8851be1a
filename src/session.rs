//! The credentials and endpoints of a logged-in user

use std::fmt::{Debug, Formatter};

use url::Url;

/// Shown when the session does not know the user name
pub const GUEST_NAME: &str = "Guest";

/// Just a wrapper around the API location and the credentials of the current user.
///
/// It is handed explicitly to a [`Client`](crate::client::Client); nothing is read from ambient storage.
#[derive(Clone)]
pub struct Session {
    base_url: Url,
    token: String,
    user_id: Option<String>,
    username: Option<String>,
}

impl Session {
    /// Create a session. `base_url` is the root of the API (e.g. `http://127.0.0.1:8000/api/`).
    /// A missing trailing slash is added, so that endpoints are resolved below it.
    pub fn new<T: ToString>(mut base_url: Url, token: T) -> Self {
        if base_url.path().ends_with('/') == false {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self { base_url, token: token.to_string(), user_id: None, username: None }
    }

    pub fn with_user_id<S: ToString>(mut self, user_id: S) -> Self {
        self.user_id = Some(user_id.to_string());
        self
    }

    pub fn with_username<S: ToString>(mut self, username: S) -> Self {
        self.username = Some(username.to_string());
        self
    }

    pub fn base_url(&self) -> &Url { &self.base_url }
    pub fn token(&self) -> &str { &self.token }
    pub fn user_id(&self) -> Option<&str> { self.user_id.as_deref() }
    pub fn username(&self) -> Option<&str> { self.username.as_deref() }

    /// Build the URL of an endpoint, given as a path relative to the API root
    pub fn endpoint(&self, relative_path: &str) -> Result<Url, url::ParseError> {
        self.base_url.join(relative_path.trim_start_matches('/'))
    }

    /// The user name, or "Guest" when it is unknown
    pub fn display_name(&self) -> &str {
        match self.username.as_deref() {
            Some(name) if name.trim().is_empty() == false => name,
            _ => GUEST_NAME,
        }
    }

    pub fn greeting(&self) -> String {
        format!("Welcome {}!", self.display_name())
    }
}

impl Debug for Session {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("base_url", &self.base_url.as_str())
            .field("token", &"<redacted>")
            .field("user_id", &self.user_id)
            .field("username", &self.username)
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_resolve_below_the_api_root() {
        let with_slash = Session::new("http://localhost:8000/api/".parse().unwrap(), "t");
        let without_slash = Session::new("http://localhost:8000/api".parse().unwrap(), "t");

        for session in &[with_slash, without_slash] {
            assert_eq!(session.endpoint("tasks/").unwrap().as_str(), "http://localhost:8000/api/tasks/");
            assert_eq!(session.endpoint("/tasks/12/").unwrap().as_str(), "http://localhost:8000/api/tasks/12/");
        }
    }

    #[test]
    fn guest_fallback() {
        let session = Session::new("http://localhost/".parse().unwrap(), "t");
        assert_eq!(session.greeting(), "Welcome Guest!");
        assert_eq!(session.clone().with_username("  ").display_name(), GUEST_NAME);
        assert_eq!(session.with_username("dana").greeting(), "Welcome dana!");
    }

    #[test]
    fn debug_hides_the_token() {
        let session = Session::new("http://localhost/".parse().unwrap(), "very-secret");
        assert!(format!("{:?}", session).contains("very-secret") == false);
    }
}
