//! # Portal client
//!
//! Talks to the my.te.eg self-care backend: one cookie-priming GET, a login
//! POST, then the free-unit query POST. Every request shares one
//! [`Session`] (browser headers, cookie jar and, after login, the bearer
//! token).

use serde_json::{Value, json};
use std::thread;
use std::time::Duration;

use crate::error::FetchError;
use crate::models::{AuthResult, Credentials, UsageResponse};

pub const BASE_URL: &str = "https://my.te.eg";
const LANDING_PATH: &str = "/echannel/";
const LOGIN_PATH: &str = "/echannel/service/besapp/base/rest/busiservice/v1/auth/userAuthenticate";
const USAGE_PATH: &str = "/echannel/service/besapp/base/rest/busiservice/cz/cbs/bb/queryFreeUnit";

const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:136.0) Gecko/20100101 Firefox/136.0";
const CHANNEL_ID: &str = "702";
const CLIENT_TYPE: &str = "Firefox";
const LOCALE: &str = "ar-EG";
const MAIN_OFFER_ID: &str = "820048";
const LOGIN_SUCCESS_CODE: &str = "0";

/// Pause between login and the usage query
pub const REQUEST_DELAY: Duration = Duration::from_secs(1);

/// Headers sent with every request. Later `set_header` calls replace
/// existing entries by case-insensitive name.
#[derive(Debug, Clone, Default)]
pub struct Session {
    headers: Vec<(String, String)>,
}

impl Session {
    /// Browser-like defaults the portal expects from its web front end.
    pub fn for_portal(base_url: &str) -> Self {
        let mut session = Session::default();
        session.set_header("User-Agent", BROWSER_USER_AGENT);
        session.set_header("Accept", "application/json, text/plain, */*");
        session.set_header("Accept-Language", "en-US,en;q=0.5");
        session.set_header("Origin", base_url);
        session.set_header("DNT", "1");
        session.set_header("Referer", format!("{base_url}{LANDING_PATH}"));
        session
    }

    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self
            .headers
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
        {
            Some(slot) => slot.1 = value,
            None => self.headers.push((name.to_string(), value)),
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Session headers overlaid with per-request ones, request values winning.
    pub fn merged(&self, extra: &[(&str, String)]) -> Vec<(String, String)> {
        let mut out = self.clone();
        for (name, value) in extra {
            out.set_header(name, value.clone());
        }
        out.headers
    }
}

pub struct PortalClient {
    agent: ureq::Agent,
    base_url: String,
    host: String,
    session: Session,
}

impl PortalClient {
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        PortalClient {
            agent: ureq::Agent::new_with_defaults(),
            host: host_of(&base_url).to_string(),
            session: Session::for_portal(&base_url),
            base_url,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn portal_headers(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Content-Type", "application/json".to_string()),
            ("channelId", CHANNEL_ID.to_string()),
            ("clientType", CLIENT_TYPE.to_string()),
            ("isCoporate", "false".to_string()),
            ("isMobile", "false".to_string()),
            ("isSelfcare", "true".to_string()),
            ("languageCode", LOCALE.to_string()),
            ("Host", self.host.clone()),
        ]
    }

    fn post_json(
        &self,
        path: &str,
        extra: &[(&str, String)],
        body: &Value,
    ) -> Result<Value, FetchError> {
        let url = self.url(path);
        log::debug!("POST {url}");
        let headers = self.session.merged(extra);
        let mut response = with_headers(self.agent.post(url.as_str()), &headers).send_json(body)?;
        let text = response.body_mut().read_to_string()?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Visit the landing page so the portal sets its session cookies.
    ///
    /// Failures are only logged; the login request reports any real problem.
    pub fn prime_cookies(&self) {
        let url = self.url(LANDING_PATH);
        log::debug!("GET {url}");
        let headers = self.session.merged(&[]);
        if let Err(e) = with_headers(self.agent.get(url.as_str()), &headers).call() {
            log::debug!("cookie priming failed: {e}");
        }
    }

    /// Log in and attach the issued token to the session.
    pub fn authenticate(&mut self, credentials: &Credentials) -> Result<AuthResult, FetchError> {
        let body = json!({
            "acctId": credentials.username,
            "appLocale": LOCALE,
            "isMobile": "N",
            "isSelfcare": "Y",
            "password": credentials.password,
            "recaptchaToken": "",
        });
        let login = self.post_json(LOGIN_PATH, &self.portal_headers(), &body)?;

        let ret_code = login.pointer("/header/retCode").and_then(Value::as_str);
        if ret_code != Some(LOGIN_SUCCESS_CODE) {
            log::debug!("login rejected, retCode={ret_code:?}");
            return Err(FetchError::LoginRejected {
                ret_code: ret_code.map(str::to_owned),
            });
        }

        let token = login
            .pointer("/body/token")
            .and_then(Value::as_str)
            .ok_or_else(|| FetchError::Protocol("login response is missing body.token".into()))?
            .to_string();
        let subscriber_id = match login.pointer("/body/subscriber/subscriberId") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => {
                return Err(FetchError::Protocol(
                    "login response is missing body.subscriber.subscriberId".into(),
                ));
            }
        };

        self.session.set_header("Authorization", format!("Bearer {token}"));
        self.session.set_header("csrftoken", token.clone());

        Ok(AuthResult {
            token,
            subscriber_id,
        })
    }

    /// Query the broadband free-unit balance for the logged-in subscriber.
    pub fn fetch_usage(&self, auth: &AuthResult) -> Result<UsageResponse, FetchError> {
        let mut headers = self.portal_headers();
        headers.push(("csrftoken", auth.token.clone()));
        headers.push(("delegatorSubsId", String::new()));
        headers.push(("X-Requested-With", "XMLHttpRequest".to_string()));

        let body = json!({
            "mainOfferId": MAIN_OFFER_ID,
            "needQueryPoint": true,
            "subscriberId": auth.subscriber_id,
        });
        self.post_json(USAGE_PATH, &headers, &body)
            .map(UsageResponse::new)
    }

    /// Full exchange: prime cookies, log in, wait, then query usage.
    pub fn authenticate_and_fetch(
        &mut self,
        credentials: &Credentials,
    ) -> Result<UsageResponse, FetchError> {
        self.prime_cookies();
        let auth = self.authenticate(credentials)?;
        thread::sleep(REQUEST_DELAY);
        self.fetch_usage(&auth)
    }
}

fn with_headers<B>(
    mut request: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        request = request.header(name.as_str(), value.as_str());
    }
    request
}

/// Authority part of a URL, e.g. `my.te.eg` for `https://my.te.eg/echannel/`.
fn host_of(url: &str) -> &str {
    let rest = url.split_once("://").map(|(_, r)| r).unwrap_or(url);
    rest.split('/').next().unwrap_or(rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_of() {
        assert_eq!(host_of(BASE_URL), "my.te.eg");
        assert_eq!(host_of("http://127.0.0.1:8080/echannel/"), "127.0.0.1:8080");
        assert_eq!(host_of("my.te.eg"), "my.te.eg");
    }

    #[test]
    fn test_session_defaults() {
        let session = Session::for_portal(BASE_URL);
        assert_eq!(session.header("origin"), Some("https://my.te.eg"));
        assert_eq!(session.header("Referer"), Some("https://my.te.eg/echannel/"));
        assert_eq!(session.header("DNT"), Some("1"));
    }

    #[test]
    fn test_set_header_replaces_case_insensitively() {
        let mut session = Session::default();
        session.set_header("csrftoken", "a");
        session.set_header("CsrfToken", "b");
        assert_eq!(session.merged(&[]).len(), 1);
        assert_eq!(session.header("csrftoken"), Some("b"));
    }

    #[test]
    fn test_merged_request_headers_win() {
        let mut session = Session::default();
        session.set_header("Accept", "*/*");
        session.set_header("csrftoken", "old");
        let merged = session.merged(&[
            ("csrftoken", "new".to_string()),
            ("X-Requested-With", "XMLHttpRequest".to_string()),
        ]);
        assert_eq!(
            merged,
            vec![
                ("Accept".to_string(), "*/*".to_string()),
                ("csrftoken".to_string(), "new".to_string()),
                ("X-Requested-With".to_string(), "XMLHttpRequest".to_string()),
            ]
        );
    }

    #[test]
    fn test_login_headers_carry_no_token() {
        let client = PortalClient::with_base_url("http://localhost:9");
        let headers = client.session().merged(&client.portal_headers());
        for name in ["Authorization", "csrftoken", "X-Requested-With", "delegatorSubsId"] {
            assert!(
                !headers.iter().any(|(n, _)| n.eq_ignore_ascii_case(name)),
                "login request would send {name}"
            );
        }
        assert!(headers.contains(&("Content-Type".to_string(), "application/json".to_string())));
        assert!(headers.contains(&("Host".to_string(), "localhost:9".to_string())));
    }

    #[test]
    fn test_new_targets_production_portal() {
        let client = PortalClient::new();
        assert_eq!(client.host, "my.te.eg");
        assert_eq!(client.url(LANDING_PATH), "https://my.te.eg/echannel/");
        assert_eq!(client.session().header("Origin"), Some(BASE_URL));
        assert!(
            client
                .portal_headers()
                .contains(&("Host", "my.te.eg".to_string()))
        );
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = PortalClient::with_base_url("http://localhost:9/");
        assert_eq!(client.url(LOGIN_PATH), format!("http://localhost:9{LOGIN_PATH}"));
        assert_eq!(client.session().header("Origin"), Some("http://localhost:9"));
    }
}
