use crate::crawler::encoding::decode_body;
use crate::crawler::error::CrawlerError;
use crate::crawler::query::TOKEN_FORM_FIELD;
use crate::crawler::session::SessionStore;
use log::{debug, info, warn};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::redirect::Policy;
use reqwest::{Client, RequestBuilder, Url};
use url::Host;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=utf-8";
const FORM_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;";

/// Redirect handling for a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirects {
    /// Let the HTTP layer follow redirects.
    Follow,
    /// Hand back the first response as-is, redirect or not.
    Manual,
}

/// HTTP client bound to one portal session.
///
/// Both clients share the [`SessionStore`] jar, so every request carries the
/// cookies collected so far and every response's `Set-Cookie` headers,
/// including those on followed redirect hops, are merged back into it.
/// Requests are strictly sequential (`&mut self`).
pub struct SessionClient {
    following: Client,
    manual: Client,
    session: SessionStore,
    token: Option<String>,
}

impl SessionClient {
    pub fn new() -> Result<Self, CrawlerError> {
        let session = SessionStore::new();
        let following = Client::builder()
            .cookie_provider(session.jar())
            .build()
            .map_err(CrawlerError::ClientBuild)?;
        let manual = Client::builder()
            .cookie_provider(session.jar())
            .redirect(Policy::none())
            .build()
            .map_err(CrawlerError::ClientBuild)?;
        Ok(Self {
            following,
            manual,
            session,
            token: None,
        })
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// The form token echoed back by [`SessionClient::submit_form`].
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// GETs `url` and returns the decoded body.
    pub async fn fetch_page(&mut self, url: &Url) -> Result<String, CrawlerError> {
        let request = self.client(Redirects::Follow).get(url.clone());
        self.execute(request, url).await
    }

    /// POSTs a urlencoded form to `url` without following redirects.
    ///
    /// The body is `PHPSESSID=<token>` followed by `extra_fields`; the token pair
    /// is left out when no token is set.
    pub async fn submit_form(
        &mut self,
        url: &Url,
        extra_fields: Vec<(String, String)>,
    ) -> Result<String, CrawlerError> {
        let body = self.form_body(extra_fields, url)?;
        let request = self
            .client(Redirects::Manual)
            .post(url.clone())
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .header(ACCEPT, FORM_ACCEPT)
            .body(body);
        self.execute(request, url).await
    }

    fn client(&self, redirects: Redirects) -> &Client {
        match redirects {
            Redirects::Follow => &self.following,
            Redirects::Manual => &self.manual,
        }
    }

    fn form_body(
        &self,
        extra_fields: Vec<(String, String)>,
        url: &Url,
    ) -> Result<String, CrawlerError> {
        let fields: Vec<(String, String)> = self
            .token
            .iter()
            .map(|token| (TOKEN_FORM_FIELD.to_string(), token.clone()))
            .chain(extra_fields)
            .collect();
        serde_urlencoded::to_string(&fields)
            .map_err(|e| CrawlerError::FormEncode(url.to_string(), e))
    }

    async fn execute(&self, request: RequestBuilder, url: &Url) -> Result<String, CrawlerError> {
        if self.session.cookie_header_for(url).is_some() {
            debug!("Sending session cookies to {}", url);
        }

        info!("Requesting {}", url);
        let response = request
            .send()
            .await
            .map_err(|e| CrawlerError::NetworkRequest(url.to_string(), e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("{} answered with status {}, reading body anyway", url, status);
        }

        let final_url = response.url().clone();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response
            .bytes()
            .await
            .map_err(|e| CrawlerError::BodyRead(url.to_string(), e))?;
        info!("Received {} bytes from {}", bytes.len(), final_url);

        Ok(decode_body(
            &bytes,
            top_level_domain(&final_url).map(str::as_bytes),
            content_type.as_deref(),
        ))
    }
}

/// Last label of a domain host; `None` for IP hosts.
fn top_level_domain(url: &Url) -> Option<&str> {
    match url.host()? {
        Host::Domain(domain) => domain.rsplit('.').next().filter(|tld| !tld.is_empty()),
        Host::Ipv4(_) | Host::Ipv6(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_level_domain() {
        let url = |s: &str| Url::parse(s).unwrap();
        assert_eq!(
            top_level_domain(&url("https://www.data.jma.go.jp/risk/obsdl/")),
            Some("jp")
        );
        assert_eq!(top_level_domain(&url("http://127.0.0.1:8080/")), None);
        assert_eq!(top_level_domain(&url("http://localhost/")), Some("localhost"));
    }

    #[test]
    fn test_form_body_puts_token_first() -> Result<(), CrawlerError> {
        let mut client = SessionClient::new()?;
        client.set_token(Some("tok en".to_string()));
        let url = Url::parse("https://www.data.jma.go.jp/risk/obsdl/show/table").unwrap();
        let body = client.form_body(
            vec![
                ("ymdList".to_string(), r#"["2024","2024"]"#.to_string()),
                ("csvFlag".to_string(), "1".to_string()),
            ],
            &url,
        )?;
        assert_eq!(
            body,
            "PHPSESSID=tok+en&ymdList=%5B%222024%22%2C%222024%22%5D&csvFlag=1"
        );
        Ok(())
    }

    #[test]
    fn test_form_body_omits_missing_token() -> Result<(), CrawlerError> {
        let client = SessionClient::new()?;
        let url = Url::parse("https://www.data.jma.go.jp/risk/obsdl/show/table").unwrap();
        let body = client.form_body(vec![("csvFlag".to_string(), "1".to_string())], &url)?;
        assert_eq!(body, "csvFlag=1");
        assert_eq!(client.token(), None);
        Ok(())
    }
}
