//! # Gateway Flows
//!
//! Requests enter through the gateway and reach the real catalog and auth
//! servers:
//!
//! 1. **Product lookup**: `/getProduct` → gRPC `GetProductById`
//! 2. **Credentials**: `/signup`, `/login` → JSON `POST` with a password digest
//! 3. **Failure mapping**: timeout and refused connections surface as 500
//! 4. **Metrics**: one observation per forwarded request
//! 5. **gRPC passthrough**: `catalog.CatalogService` on the gateway port

#[cfg(test)]
mod tests {
    use super::super::harness::{Stack, StackOptions};
    use sf_01_api_gateway::domain::PasswordDigest;
    use shared_types::{
        CatalogServiceClient, CredentialResponse, GetProductByIdRequest, ListProductsRequest,
    };
    use std::time::Duration;

    async fn get(url: String) -> (u16, String) {
        let response = reqwest::get(url).await.unwrap();
        let status = response.status().as_u16();
        (status, response.text().await.unwrap())
    }

    async fn verdict(url: String) -> CredentialResponse {
        let (status, body) = get(url).await;
        assert_eq!(status, 200, "{}", body);
        serde_json::from_str(&body).unwrap()
    }

    // =========================================================================
    // PRODUCT LOOKUP
    // =========================================================================

    #[tokio::test]
    async fn test_product_lookup_through_gateway() {
        let stack = Stack::start(StackOptions::default()).await.unwrap();

        let (status, body) = get(stack.url("/getProduct?id=1")).await;
        assert_eq!(status, 200);
        assert_eq!(body, "Product: id:1 name:\"Product 1\" price:19.99");

        let (status, body) = get(stack.url("/getProduct?id=42")).await;
        assert_eq!(status, 200);
        assert_eq!(body, "Product: id:42 name:\"Sample Product\" price:9.99");

        assert_eq!(stack.gateway_metrics().observation_count("/getProduct"), 2);
        stack.stop().await;
    }

    #[tokio::test]
    async fn test_invalid_product_id_never_reaches_catalog() {
        let stack = Stack::start(StackOptions::default()).await.unwrap();

        for query in [
            "/getProduct",
            "/getProduct?id=",
            "/getProduct?id=abc",
            "/getProduct?id=%2042%20",
        ] {
            let (status, body) = get(stack.url(query)).await;
            assert_eq!(status, 400);
            assert_eq!(body, "Invalid product ID\n");
        }

        assert_eq!(
            stack
                .catalog_metrics()
                .unwrap()
                .observation_count("GetProductById"),
            0
        );
        assert_eq!(stack.gateway_metrics().observation_count("/getProduct"), 0);
        stack.stop().await;
    }

    // =========================================================================
    // CREDENTIALS
    // =========================================================================

    const SIGNUP: &str =
        "/signup?firstName=John&lastName=Doe&email=john%40example.com&password=password123";

    #[tokio::test]
    async fn test_signup_duplicate_and_login() {
        let stack = Stack::start(StackOptions::default()).await.unwrap();

        let first = verdict(stack.url(SIGNUP)).await;
        assert_eq!(first, CredentialResponse::success("User registered successfully"));

        // Refusals from the auth server are relayed with 200.
        let second = verdict(stack.url(SIGNUP)).await;
        assert_eq!(second, CredentialResponse::failure("User already exists"));

        let good = verdict(stack.url("/login?email=john%40example.com&password=password123")).await;
        assert_eq!(good, CredentialResponse::success("Login successful"));

        let bad = verdict(stack.url("/login?email=john%40example.com&password=wrong")).await;
        assert_eq!(bad, CredentialResponse::failure("Invalid email or password"));

        assert_eq!(stack.gateway_metrics().observation_count("/signup"), 2);
        assert_eq!(stack.gateway_metrics().observation_count("/login"), 2);
        stack.stop().await;
    }

    #[tokio::test]
    async fn test_auth_server_only_sees_digest() {
        let stack = Stack::start(StackOptions::default()).await.unwrap();
        verdict(stack.url(SIGNUP)).await;

        let client = reqwest::Client::new();
        let login = |password: String| {
            client
                .post(format!("http://{}/login", stack.auth_http))
                .json(&serde_json::json!({
                    "email": "john@example.com",
                    "password": password,
                }))
                .send()
        };

        let cleartext = login("password123".into()).await.unwrap();
        assert_eq!(cleartext.status().as_u16(), 401);

        let digest = PasswordDigest::of("password123");
        let hashed = login(digest.as_hex().to_string()).await.unwrap();
        assert_eq!(hashed.status().as_u16(), 200);

        stack.stop().await;
    }

    #[tokio::test]
    async fn test_missing_credential_fields() {
        let stack = Stack::start(StackOptions::default()).await.unwrap();

        let (status, body) = get(stack.url("/signup?firstName=John&email=a%40b.c&password=x")).await;
        assert_eq!(status, 400);
        assert_eq!(body, "All fields are required\n");

        let (status, body) = get(stack.url("/login?password=x")).await;
        assert_eq!(status, 400);
        assert_eq!(body, "Email and password are required\n");

        assert_eq!(stack.gateway_metrics().observation_count("/signup"), 0);
        assert_eq!(stack.gateway_metrics().observation_count("/login"), 0);
        stack.stop().await;
    }

    // =========================================================================
    // FAILURE MAPPING
    // =========================================================================

    #[tokio::test]
    async fn test_catalog_timeout_is_500() {
        let stack = Stack::start(StackOptions {
            catalog_delay: Duration::from_millis(500),
            catalog_timeout: Duration::from_millis(100),
            ..Default::default()
        })
        .await
        .unwrap();

        let (status, body) = get(stack.url("/getProduct?id=1")).await;
        assert_eq!(status, 500);
        assert_eq!(body, "Failed to get product\n");
        assert_eq!(stack.gateway_metrics().observation_count("/getProduct"), 1);

        stack.stop().await;
    }

    #[tokio::test]
    async fn test_catalog_down_is_500() {
        let stack = Stack::start(StackOptions {
            without_catalog: true,
            ..Default::default()
        })
        .await
        .unwrap();

        let (status, body) = get(stack.url("/getProduct?id=1")).await;
        assert_eq!(status, 500);
        assert_eq!(body, "Failed to get product\n");
        assert_eq!(stack.gateway_metrics().observation_count("/getProduct"), 1);

        stack.stop().await;
    }

    // =========================================================================
    // METRICS
    // =========================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_requests_each_observed() {
        let stack = Stack::start(StackOptions::default()).await.unwrap();
        let client = reqwest::Client::new();

        let n = 50;
        let handles: Vec<_> = (0..n)
            .map(|i| {
                let client = client.clone();
                let url = stack.url(&format!("/getProduct?id={}", i));
                tokio::spawn(async move { client.get(url).send().await.map(|r| r.status()) })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap().as_u16(), 200);
        }

        assert_eq!(stack.gateway_metrics().observation_count("/getProduct"), n as u64);

        let (status, body) = get(stack.url("/metrics")).await;
        assert_eq!(status, 200);
        assert!(body.contains(&format!(
            "http_request_duration_seconds_count{{path=\"/getProduct\"}} {}",
            n
        )));

        stack.stop().await;
    }

    // =========================================================================
    // GRPC PASSTHROUGH
    // =========================================================================

    #[tokio::test]
    async fn test_grpc_passthrough() {
        let stack = Stack::start(StackOptions::default()).await.unwrap();
        let mut client = CatalogServiceClient::connect(format!("http://{}", stack.gateway_grpc))
            .await
            .unwrap();

        let product = client
            .get_product_by_id(GetProductByIdRequest { id: 2 })
            .await
            .unwrap()
            .into_inner();
        assert_eq!(product.name, "Product 2");

        let listed = client
            .list_products(ListProductsRequest {})
            .await
            .unwrap()
            .into_inner();
        assert_eq!(listed.products.len(), 3);

        drop(client);
        stack.stop().await;
    }

    #[tokio::test]
    async fn test_grpc_passthrough_catalog_down() {
        let stack = Stack::start(StackOptions {
            without_catalog: true,
            ..Default::default()
        })
        .await
        .unwrap();
        let mut client = CatalogServiceClient::connect(format!("http://{}", stack.gateway_grpc))
            .await
            .unwrap();

        let status = client
            .get_product_by_id(GetProductByIdRequest { id: 2 })
            .await
            .unwrap_err();
        assert_eq!(status.code(), tonic::Code::Unavailable);

        drop(client);
        stack.stop().await;
    }
}
