//! Restaurant Backend Client
//!
//! A bearer-authenticated JSON client for the order endpoints the kitchen board uses.

use crate::backend::error::BackendError;
use crate::backend::{Backend, UserProfile};
use crate::consts::cli_consts::http;
use crate::environment::Environment;
use crate::order::{Order, OrderStatus};
use reqwest::{Client, ClientBuilder, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;

// Build timestamp in milliseconds since epoch
const BUILD_TIMESTAMP: &str = env!("BUILD_TIMESTAMP", "Build timestamp not available");

// User-Agent string with CLI version
const USER_AGENT: &str = concat!("kitchen-board/", env!("CARGO_PKG_VERSION"));

#[derive(Deserialize)]
struct CurrentUserResponse {
    user: UserProfile,
}

#[derive(Deserialize)]
struct StatusUpdateResponse {
    order: Order,
}

#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    environment: Environment,
    token: String,
}

impl BackendClient {
    pub fn new(environment: Environment, token: String) -> Result<Self, BackendError> {
        let client = ClientBuilder::new()
            .connect_timeout(http::connect_timeout())
            .timeout(http::request_timeout())
            .build()?;
        Ok(Self {
            client,
            environment,
            token,
        })
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.environment.backend_url().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    fn with_headers(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .bearer_auth(&self.token)
            .header("User-Agent", USER_AGENT)
            .header("X-Build-Timestamp", BUILD_TIMESTAMP)
    }

    async fn handle_response_status(response: Response) -> Result<Response, BackendError> {
        if !response.status().is_success() {
            return Err(BackendError::from_response(response).await);
        }
        Ok(response)
    }

    async fn decode_response<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
        let response = Self::handle_response_status(response).await?;
        let response_bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&response_bytes)?)
    }

    async fn get_request<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, BackendError> {
        let url = self.build_url(endpoint);
        let response = self.with_headers(self.client.get(&url)).send().await?;
        Self::decode_response(response).await
    }

    async fn put_request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &serde_json::Value,
    ) -> Result<T, BackendError> {
        let url = self.build_url(endpoint);
        let response = self
            .with_headers(self.client.put(&url))
            .json(body)
            .send()
            .await?;
        Self::decode_response(response).await
    }
}

#[async_trait::async_trait]
impl Backend for BackendClient {
    async fn get_current_user(&self) -> Result<UserProfile, BackendError> {
        let response: CurrentUserResponse = self.get_request("api/auth/me").await?;
        Ok(response.user)
    }

    async fn get_orders(&self) -> Result<Vec<Order>, BackendError> {
        self.get_request("api/orders").await
    }

    async fn set_order_status(
        &self,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<Order, BackendError> {
        let endpoint = format!("api/orders/order/{}", urlencoding::encode(order_id));
        let response: StatusUpdateResponse = self
            .put_request(&endpoint, &json!({ "status": status }))
            .await?;
        Ok(response.order)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn client_for(server: &Server) -> BackendClient {
        let environment = Environment::Custom {
            backend_url: server.url(),
        };
        BackendClient::new(environment, "secret-token".to_string()).unwrap()
    }

    const ORDERS_BODY: &str = r#"[
        {"_id": "o1", "table": "4", "items": [{"name": "Dal", "quantity": 1, "price": 120}],
         "status": "pending", "createdAt": "2024-05-01T11:50:00Z"},
        {"_id": "o2", "items": [], "status": "served", "createdAt": "2024-05-01T11:30:00Z"}
    ]"#;

    #[tokio::test]
    async fn get_orders_sends_bearer_token_and_decodes() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/orders")
            .match_header("authorization", "Bearer secret-token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(ORDERS_BODY)
            .create_async()
            .await;

        let orders = client_for(&server).get_orders().await.unwrap();

        mock.assert_async().await;
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].id, "o1");
        assert_eq!(orders[1].status, OrderStatus::Served);
    }

    #[tokio::test]
    async fn get_orders_reports_http_status() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/orders")
            .with_status(401)
            .with_body(r#"{"error":"Invalid token"}"#)
            .create_async()
            .await;

        let err = client_for(&server).get_orders().await.unwrap_err();
        assert!(err.is_auth_failure());
        assert!(matches!(err, BackendError::Http { status: 401, .. }));
    }

    #[tokio::test]
    async fn malformed_orders_are_a_decode_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/orders")
            .with_status(200)
            .with_body(r#"{"orders": "not a list"}"#)
            .create_async()
            .await;

        let err = client_for(&server).get_orders().await.unwrap_err();
        assert!(matches!(err, BackendError::Decode(_)));
    }

    #[tokio::test]
    async fn set_order_status_puts_json_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("PUT", "/api/orders/order/o1")
            .match_header("authorization", "Bearer secret-token")
            .match_body(Matcher::Json(json!({ "status": "preparing" })))
            .with_status(200)
            .with_body(
                r#"{"message": "Order status updated",
                    "order": {"_id": "o1", "status": "preparing", "createdAt": "2024-05-01T11:50:00Z"}}"#,
            )
            .create_async()
            .await;

        let order = client_for(&server)
            .set_order_status("o1", OrderStatus::Preparing)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(order.status, OrderStatus::Preparing);
    }

    #[tokio::test]
    async fn current_user_reads_populated_restaurant() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/auth/me")
            .with_status(200)
            .with_body(
                r#"{"user": {"_id": "u1", "name": "Ravi", "role": "kitchen",
                    "restaurant": {"_id": "r1", "name": "Spice Route"}}}"#,
            )
            .create_async()
            .await;

        let user = client_for(&server).get_current_user().await.unwrap();
        let restaurant = user.restaurant.unwrap();
        assert_eq!(user.id, "u1");
        assert_eq!(restaurant.id(), "r1");
        assert_eq!(restaurant.name(), Some("Spice Route"));
    }
}
