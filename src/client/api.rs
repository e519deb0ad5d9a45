//! The HTTP client for the expense API.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{
    CategoryTotal, EXPENSES_API, EXPENSES_BY_CATEGORY, EXPENSES_TOTAL, ErrorMessage,
    ExpenseDraft, RangeTotal,
    client::{ClientError, ExpenseRecord},
};

/// Where the API is served from when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// The equality filters for listing expenses.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListFilter {
    /// Only list this category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Only list this date, as `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// The operations the client needs from the expense API.
#[async_trait]
pub trait ExpenseApi: Send + Sync {
    /// List the expenses matching `filter`.
    ///
    /// The elements are returned unchecked, see
    /// [keep_valid_expenses](crate::client::keep_valid_expenses).
    async fn list_expenses(&self, filter: &ListFilter) -> Result<Vec<Value>, ClientError>;

    /// Create an expense and return it as stored.
    async fn create_expense(&self, draft: &ExpenseDraft) -> Result<ExpenseRecord, ClientError>;

    /// The sum of the expenses dated from `start` to `end` inclusive.
    async fn range_total(&self, start: &str, end: &str) -> Result<f64, ClientError>;

    /// The total and count of expenses in each category, largest total first.
    async fn totals_by_category(&self) -> Result<Vec<CategoryTotal>, ClientError>;
}

/// Settings for [HttpExpenseApi].
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// The scheme, host and port of the API, e.g. `http://127.0.0.1:5000`.
    pub base_url: String,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
        }
    }
}

/// An [ExpenseApi] that talks to the server over HTTP.
#[derive(Debug, Clone)]
pub struct HttpExpenseApi {
    client: Client,
    config: ApiClientConfig,
}

impl HttpExpenseApi {
    /// Create a client for the API at `config.base_url`.
    ///
    /// # Errors
    /// Returns [ClientError::Http] if the HTTP client could not be built.
    pub fn new(config: ApiClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder().build()?;

        Ok(Self { client, config })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ExpenseApi for HttpExpenseApi {
    async fn list_expenses(&self, filter: &ListFilter) -> Result<Vec<Value>, ClientError> {
        tracing::debug!("GET {EXPENSES_API} with {filter:?}");

        let response = self
            .client
            .get(self.url(EXPENSES_API))
            .query(filter)
            .send()
            .await?;

        read_json(response).await
    }

    async fn create_expense(&self, draft: &ExpenseDraft) -> Result<ExpenseRecord, ClientError> {
        tracing::debug!("POST {EXPENSES_API}");

        let response = self
            .client
            .post(self.url(EXPENSES_API))
            .json(draft)
            .send()
            .await?;

        read_json(response).await
    }

    async fn range_total(&self, start: &str, end: &str) -> Result<f64, ClientError> {
        tracing::debug!("GET {EXPENSES_TOTAL} from {start} to {end}");

        let response = self
            .client
            .get(self.url(EXPENSES_TOTAL))
            .query(&[("start", start), ("end", end)])
            .send()
            .await?;

        read_json::<RangeTotal>(response)
            .await
            .map(|range_total| range_total.total)
    }

    async fn totals_by_category(&self) -> Result<Vec<CategoryTotal>, ClientError> {
        tracing::debug!("GET {EXPENSES_BY_CATEGORY}");

        let response = self
            .client
            .get(self.url(EXPENSES_BY_CATEGORY))
            .send()
            .await?;

        read_json(response).await
    }
}

/// Parse a successful response body as `T`, or turn an error status into a
/// [ClientError::Api] carrying the server's message.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorMessage>(&body)
            .map(|error| error.message)
            .unwrap_or(body);
        tracing::warn!("the expense API responded with {status}: {message}");

        return Err(ClientError::Api {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str(&body).map_err(|error| ClientError::InvalidResponse(error.to_string()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::net::TcpListener;

    use crate::{
        AppState, CategoryTotal, ExpenseDraft, build_router,
        client::{ClientError, keep_valid_expenses},
        stores::InMemoryExpenseStore,
    };

    use super::{ApiClientConfig, ExpenseApi, HttpExpenseApi, ListFilter};

    /// Serve a fresh app on a random local port and return a client for it.
    async fn get_test_api() -> HttpExpenseApi {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let router = build_router(AppState::new(Arc::new(InMemoryExpenseStore::new())));
        tokio::spawn(async move { axum::serve(listener, router).await });

        HttpExpenseApi::new(ApiClientConfig {
            base_url: format!("http://{addr}/"),
        })
        .unwrap()
    }

    fn draft(amount: f64, category: &str, date: &str) -> ExpenseDraft {
        ExpenseDraft {
            amount: Some(amount),
            category: Some(category.to_owned()),
            date: Some(date.to_owned()),
            description: None,
        }
    }

    #[tokio::test]
    async fn round_trips_through_server() {
        let api = get_test_api().await;

        let created = api
            .create_expense(&draft(45.99, "Food", "2025-01-15"))
            .await
            .unwrap();
        api.create_expense(&draft(12.50, "Transportation", "2025-01-14"))
            .await
            .unwrap();

        let food = api
            .list_expenses(&ListFilter {
                category: Some("Food".to_owned()),
                date: None,
            })
            .await
            .unwrap();
        assert_eq!(keep_valid_expenses(food), vec![created]);

        let total = api.range_total("2025-01-14", "2025-01-15").await.unwrap();
        assert_eq!(total, 58.49);

        let by_category = api.totals_by_category().await.unwrap();
        assert_eq!(
            by_category[0],
            CategoryTotal {
                category: "Food".to_owned(),
                total: 45.99,
                count: 1,
            }
        );
    }

    #[tokio::test]
    async fn error_status_carries_server_message() {
        let api = get_test_api().await;

        let result = api
            .create_expense(&ExpenseDraft {
                amount: Some(10.0),
                ..Default::default()
            })
            .await;

        match result {
            Err(ClientError::Api { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "category is required");
            }
            other => panic!("expected an API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_server_is_http_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let api = HttpExpenseApi::new(ApiClientConfig {
            base_url: format!("http://{addr}"),
        })
        .unwrap();

        let result = api.totals_by_category().await;

        assert!(matches!(result, Err(ClientError::Http(_))));
    }
}
