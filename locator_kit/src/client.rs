//! Argo CD resource-tree client
//!
//! Implements [`TreeQuery`] against the application resource-tree
//! endpoint. The query is read-only; non-2xx responses, transport
//! errors and undecodable bodies all collapse to an empty node list,
//! because a missing report is an expected steady state and must not
//! surface as an error to callers.

use std::time::Duration;

use serde::Deserialize;

use crate::tree::{ResourceNode, TreeQuery};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Response envelope of the resource-tree endpoint.
#[derive(Debug, Default, Deserialize)]
struct TreeResponse {
    #[serde(default)]
    nodes: Vec<ResourceNode>,
}

/// Read-only client for one Argo CD application.
#[derive(Debug)]
pub struct ArgoClient {
    http: reqwest::blocking::Client,
    base_url: String,
    app: String,
    token: Option<String>,
}

impl ArgoClient {
    /// Create a client with the default request timeout.
    pub fn new(base_url: impl Into<String>, app: impl Into<String>) -> Self {
        Self::with_timeout(base_url, app, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        app: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            app: app.into(),
            token: None,
        }
    }

    /// Attach a bearer token to every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn tree_url(&self) -> String {
        format!(
            "{}/api/v1/applications/{}/resource-tree",
            self.base_url, self.app
        )
    }

    fn fetch_tree(&self, namespace: &str, kind: &str, name: &str) -> Option<TreeResponse> {
        let mut request = self.http.get(self.tree_url()).query(&[
            ("group", ""),
            ("kind", kind),
            ("name", name),
            ("namespace", namespace),
        ]);

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = match request.send() {
            Ok(response) => response,
            Err(e) => {
                log::warn!("resource-tree query failed for {}/{}: {}", namespace, name, e);
                return None;
            }
        };

        if !response.status().is_success() {
            log::warn!(
                "resource-tree query for {}/{} returned {}",
                namespace,
                name,
                response.status()
            );
            return None;
        }

        match response.json::<TreeResponse>() {
            Ok(tree) => Some(tree),
            Err(e) => {
                log::warn!("undecodable resource-tree response for {}/{}: {}", namespace, name, e);
                None
            }
        }
    }
}

impl TreeQuery for ArgoClient {
    fn nodes(&self, namespace: &str, kind: &str, name: &str) -> Vec<ResourceNode> {
        self.fetch_tree(namespace, kind, name)
            .map(|tree| tree.nodes)
            .unwrap_or_default()
    }
}
