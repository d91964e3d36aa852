// Concurrent calls through the facade with a stub issuer:
// every other user fails, and each response must match its own outcome.

#[cfg(test)]
mod test {

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use futures::future::join_all;
    use http::StatusCode;

    use crate::issuer::{ClientUserId, IssuanceError, IssueLinkToken, LinkToken};
    use crate::server::server::{self, AppState};
    use crate::tests::common::{build_reqwest_client, settings, spawn_axum};

    /// Fails for users whose numeric suffix is odd.
    struct StubIssuer {
        calls: Arc<AtomicUsize>,
    }

    impl IssueLinkToken for StubIssuer {
        async fn issue_token(&self, user: &ClientUserId) -> Result<LinkToken, IssuanceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let n: usize = user
                .as_str()
                .trim_start_matches("user-")
                .parse()
                .unwrap_or(0);
            // stagger completion so requests overlap
            tokio::time::sleep(Duration::from_millis(((10 - n % 10) * 10) as u64)).await;
            if n % 2 == 1 {
                return Err(IssuanceError::EmptyToken);
            }
            Ok(LinkToken::new(format!("link-sandbox-{}", user.as_str())).unwrap())
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_requests_resolve_independently() {
        let calls = Arc::new(AtomicUsize::new(0));
        let state = AppState::new(
            StubIssuer { calls: calls.clone() },
            ClientUserId::new("user-0").unwrap(),
        );
        let (handle, addr) = spawn_axum(server::router(&settings(), state)).await;
        let client = build_reqwest_client();
        let url = format!("http://{}/api/create_link_token", addr);

        let requests = (0..10).map(|i| {
            let client = client.clone();
            let url = url.clone();
            async move {
                let response = client
                    .get(&url)
                    .header("x-client-user-id", format!("user-{}", i))
                    .send()
                    .await
                    .unwrap();
                let status = response.status();
                (i, status, response.text().await.unwrap())
            }
        });

        for (i, status, body) in join_all(requests).await {
            if i % 2 == 1 {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "user-{}", i);
                assert_eq!(body, r#"{"error":"Error creating link token"}"#);
            } else {
                assert_eq!(status, StatusCode::OK, "user-{}", i);
                assert_eq!(body, format!(r#"{{"link_token":"link-sandbox-user-{}"}}"#, i));
            }
        }
        assert_eq!(calls.load(Ordering::SeqCst), 10);

        handle.abort();
    }

    #[tokio::test]
    async fn health_does_not_touch_the_issuer() {
        let calls = Arc::new(AtomicUsize::new(0));
        let state = AppState::new(
            StubIssuer { calls: calls.clone() },
            ClientUserId::new("user-1").unwrap(),
        );
        let (handle, addr) = spawn_axum(server::router(&settings(), state)).await;
        let client = build_reqwest_client();

        for _ in 0..3 {
            let response = client
                .get(format!("http://{}/health", addr))
                .send()
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(response.text().await.unwrap(), r#""Health Okay""#);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        handle.abort();
    }
}
