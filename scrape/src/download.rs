// Copyright 2025 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.

//! Getting the text of web pages.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use reqwest::blocking::Client;
use reqwest::redirect::Policy;
use thiserror::Error;
use url::Url;
use crate::pipeline::ScrapeConfig;

/// The maximum number of redirects followed before giving up.
pub const MAX_REDIRECTS : usize = 10;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP status {status} when getting {url}")]
    Status{ url : String, status : u16 },
    #[error("Could not get {url} : {source}")]
    Transport{ url : String, #[source] source : reqwest::Error },
    #[error("Could not set up the HTTP client : {0}")]
    Client(#[source] reqwest::Error),
}

/// Something that can get the text of a page given its url.
///
/// Must be usable from several threads at once, as regions may be fetched in parallel.
pub trait Fetcher : Send + Sync {
    fn fetch(&self,url:&Url) -> Result<String,FetchError>;
}

/// Get pages over HTTP(S) using Reqwest, following redirects, with a bounded timeout.
pub struct HttpFetcher {
    client : Client,
    timeout : Duration,
    user_agent : String,
}

impl HttpFetcher {
    /// A fetcher using the timeout and user agent of the run's configuration.
    pub fn from_config(config:&ScrapeConfig) -> Result<Self,FetchError> {
        HttpFetcher::new(config.timeout,&config.user_agent)
    }

    pub fn new(timeout:Duration,user_agent:&str) -> Result<Self,FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent(user_agent)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(FetchError::Client)?;
        Ok(HttpFetcher{client,timeout,user_agent:user_agent.to_string()})
    }

    pub fn timeout(&self) -> Duration { self.timeout }
    pub fn user_agent(&self) -> &str { &self.user_agent }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        let transport = |source:reqwest::Error| FetchError::Transport{ url: url.to_string(), source };
        let response = self.client.get(url.clone()).send().map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status{ url: url.to_string(), status: status.as_u16() });
        }
        response.text().map_err(transport)
    }
}

/// Pages held in memory, keyed by their full url. Useful for testing and for
/// re-processing pages obtained some other way.
///
/// Every request is recorded, whether or not the page is present. A missing page
/// is reported as a 404.
#[derive(Default)]
pub struct MemoryFetcher {
    pages : HashMap<String,String>,
    requests : Mutex<Vec<String>>,
}

impl MemoryFetcher {
    pub fn with_page(mut self,url:&str,body:&str) -> Self {
        self.pages.insert(url.to_string(),body.to_string());
        self
    }

    /// The urls requested so far, in the order they were requested.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap_or_else(|poisoned|poisoned.into_inner()).clone()
    }
}

impl Fetcher for MemoryFetcher {
    fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        self.requests.lock().unwrap_or_else(|poisoned|poisoned.into_inner()).push(url.to_string());
        self.pages.get(url.as_str()).cloned().ok_or_else(||FetchError::Status{ url: url.to_string(), status: 404 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_fetcher_records_requests_and_reports_missing_pages() {
        let fetcher = MemoryFetcher::default().with_page("https://example.com/a?x=1","hello");
        let present = Url::parse("https://example.com/a?x=1").unwrap();
        let absent = Url::parse("https://example.com/b").unwrap();
        assert_eq!("hello",fetcher.fetch(&present).unwrap());
        match fetcher.fetch(&absent) {
            Err(FetchError::Status{status,url}) => {
                assert_eq!(404,status);
                assert_eq!("https://example.com/b",url);
            }
            other => panic!("Expected a 404, got {:?}",other),
        }
        assert_eq!(vec!["https://example.com/a?x=1".to_string(),"https://example.com/b".to_string()],fetcher.requests());
    }

    #[test]
    fn http_fetcher_builds_with_timeout() {
        assert!(HttpFetcher::new(Duration::from_secs(5),"test-agent").is_ok());
    }

    #[test]
    fn http_fetcher_uses_config() {
        let config = ScrapeConfig{ timeout: Duration::from_secs(7), user_agent: "agent/1.2".to_string(), ..ScrapeConfig::default() };
        let fetcher = HttpFetcher::from_config(&config).unwrap();
        assert_eq!(Duration::from_secs(7),fetcher.timeout());
        assert_eq!("agent/1.2",fetcher.user_agent());
    }
}
