/// Thin async wrapper over the analysis service REST API. One method per
/// remote operation, a fixed bearer credential on every request, and no
/// client-side retry: a failed call is reported once and may simply be
/// re-invoked by the operator.
#[derive(Clone)]
struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl ApiClient {
    fn new(base_url: &str, token: &str, timeout: Duration) -> Result<Self, String> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| format!("http client build failed: {e}"))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn list_urls(&self) -> Result<Vec<TrackedUrl>, String> {
        self.expect_json("list urls", self.http.get(self.endpoint("urls")))
            .await
    }

    async fn create_url(&self, address: &str) -> Result<TrackedUrl, String> {
        self.expect_json(
            "create url",
            self.http
                .post(self.endpoint("urls"))
                .json(&json!({ "address": address })),
        )
        .await
    }

    async fn update_url(&self, id: u64, address: &str) -> Result<TrackedUrl, String> {
        self.expect_json(
            "update url",
            self.http
                .put(self.endpoint(&format!("urls/{id}")))
                .json(&json!({ "address": address })),
        )
        .await
    }

    async fn delete_url(&self, id: u64) -> Result<(), String> {
        self.expect_success("delete url", self.http.delete(self.endpoint(&format!("urls/{id}"))))
            .await
    }

    /// Fire-and-forget trigger; the resulting status change is observed
    /// through subsequent polls, not through this response.
    async fn start_analysis(&self, id: u64) -> Result<(), String> {
        self.expect_success(
            "start analysis",
            self.http.post(self.endpoint(&format!("urls/{id}/start"))),
        )
        .await
    }

    async fn stop_analysis(&self, id: u64) -> Result<(), String> {
        self.expect_success(
            "stop analysis",
            self.http.post(self.endpoint(&format!("urls/{id}/stop"))),
        )
        .await
    }

    async fn url_details(&self, id: u64) -> Result<TrackedUrl, String> {
        self.expect_json("fetch details", self.http.get(self.endpoint(&format!("urls/{id}"))))
            .await
    }

    /// The health probe lives at the service root, outside the API group.
    async fn health(&self) -> Result<(), String> {
        self.expect_success("health check", self.http.get(health_endpoint(&self.base_url)))
            .await
    }

    async fn expect_json<T: serde::de::DeserializeOwned>(
        &self,
        op: &str,
        req: reqwest::RequestBuilder,
    ) -> Result<T, String> {
        let body = self.expect_body(op, req).await?;
        serde_json::from_str(&body).map_err(|e| format!("{op} parse failed: {e}"))
    }

    async fn expect_success(&self, op: &str, req: reqwest::RequestBuilder) -> Result<(), String> {
        self.expect_body(op, req).await.map(|_| ())
    }

    async fn expect_body(&self, op: &str, req: reqwest::RequestBuilder) -> Result<String, String> {
        let res = req
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| format!("{op} request failed: {e}"))?;
        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| format!("{op} response read failed: {e}"))?;
        if !status.is_success() {
            return Err(format!(
                "{op} HTTP {}: {}",
                status.as_u16(),
                truncate_for_log(&body, 200)
            ));
        }
        Ok(body)
    }
}

fn health_endpoint(base_url: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let root = base.strip_suffix("/api").unwrap_or(base);
    format!("{root}/health")
}

#[cfg(test)]
mod api_tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_duplicate_slashes() {
        let client =
            ApiClient::new("http://localhost:8080/api/", "t", Duration::from_secs(1)).unwrap();
        assert_eq!(client.endpoint("urls"), "http://localhost:8080/api/urls");
        assert_eq!(
            client.endpoint("/urls/7/start"),
            "http://localhost:8080/api/urls/7/start"
        );
    }

    #[test]
    fn health_lives_at_service_root() {
        assert_eq!(
            health_endpoint("http://localhost:8080/api"),
            "http://localhost:8080/health"
        );
        assert_eq!(
            health_endpoint("http://crawl.internal/"),
            "http://crawl.internal/health"
        );
    }
}
