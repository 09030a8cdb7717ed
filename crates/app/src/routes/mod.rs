pub mod not_found;
pub mod reset_password;

use std::fmt;

use dioxus::prelude::*;
use shared_types::ResetRequest;

use not_found::NotFound;
use reset_password::ResetPassword;

/// Application routes.
#[derive(Clone, Routable, Debug, PartialEq)]
pub enum Route {
    #[route("/reset-password?:..query")]
    ResetPassword { query: ResetQuery },
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}

impl Route {
    /// The reset path with no query, used once the link has been spent.
    pub fn bare_reset() -> Self {
        Route::ResetPassword {
            query: ResetQuery::default(),
        }
    }
}

/// `token` and `id` from the reset link. Renders nothing when both are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResetQuery {
    pub token: Option<String>,
    pub id: Option<String>,
}

impl ResetQuery {
    pub fn to_request(&self) -> ResetRequest {
        ResetRequest::from_query(self.token.clone(), self.id.clone())
    }
}

impl FromQuery for ResetQuery {
    fn from_query(query: &str) -> Self {
        let mut parsed = ResetQuery::default();
        for pair in query.trim_start_matches('?').split('&') {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = urlencoding::decode(value)
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| value.to_string());
            match key {
                "token" => parsed.token = Some(value),
                "id" => parsed.id = Some(value),
                _ => {}
            }
        }
        parsed
    }
}

impl fmt::Display for ResetQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs: Vec<String> = [("token", &self.token), ("id", &self.id)]
            .into_iter()
            .filter_map(|(key, value)| {
                value
                    .as_ref()
                    .map(|v| format!("{}={}", key, urlencoding::encode(v)))
            })
            .collect();
        write!(f, "{}", pairs.join("&"))
    }
}
