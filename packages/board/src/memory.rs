use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::error::FetchError;
use crate::gateway::{Gateway, Method};

/// A request seen by [`MemoryGateway`].
#[derive(Clone, Debug, PartialEq)]
pub struct Call {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

/// In-memory Gateway for tests. Answers from a fixed route table and records
/// every call; unknown routes answer 404.
#[derive(Clone, Debug, Default)]
pub struct MemoryGateway {
    routes: Arc<Mutex<HashMap<(Method, String), Result<Value, FetchError>>>>,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, method: Method, path: &str, body: Value) {
        self.routes
            .lock()
            .unwrap()
            .insert((method, path.to_string()), Ok(body));
    }

    pub fn fail(&self, method: Method, path: &str, error: FetchError) {
        self.routes
            .lock()
            .unwrap()
            .insert((method, path.to_string()), Err(error));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Calls other than GET.
    pub fn mutation_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.method != Method::Get)
            .count()
    }
}

impl Gateway for MemoryGateway {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, FetchError> {
        self.calls.lock().unwrap().push(Call {
            method,
            path: path.to_string(),
            body: body.cloned(),
        });
        self.routes
            .lock()
            .unwrap()
            .get(&(method, path.to_string()))
            .cloned()
            .unwrap_or_else(|| {
                Err(FetchError::Server {
                    status: 404,
                    message: "Not Found".to_string(),
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_records_calls_and_answers() {
        let gateway = MemoryGateway::new();
        gateway.respond(Method::Post, "/api/admin/approve/dentist/4", json!({"ok": true}));

        let body = json!({"note": "x"});
        let answer = gateway
            .request(Method::Post, "/api/admin/approve/dentist/4", Some(&body))
            .await
            .unwrap();
        assert_eq!(answer, json!({"ok": true}));

        let missing = gateway.request(Method::Get, "/nowhere", None).await;
        assert_eq!(missing.unwrap_err().status(), Some(404));

        assert_eq!(gateway.call_count(), 2);
        assert_eq!(gateway.mutation_count(), 1);
        assert_eq!(gateway.calls()[0].body, Some(body));
    }
}
