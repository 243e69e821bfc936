use async_trait::async_trait;
use docqa::{
    Error, Result,
    analysis::{AnalysisClient, AnalysisRequest, AnalysisResponse},
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock analysis service for testing
#[derive(Debug, Clone)]
pub struct MockAnalysisClient {
    pub responses: Arc<Mutex<Vec<Result<AnalysisResponse>>>>,
    pub requests: Arc<Mutex<Vec<AnalysisRequest>>>,
    pub delay: Option<Duration>,
}

impl MockAnalysisClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            delay: None,
        }
    }

    pub fn with_answer(self, answer: &str) -> Self {
        self.add_response(Ok(AnalysisResponse::answered(answer)));
        self
    }

    pub fn with_response(self, response: Result<AnalysisResponse>) -> Self {
        self.add_response(response);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn add_response(&self, response: Result<AnalysisResponse>) {
        self.responses.lock().unwrap().push(response);
    }

    pub fn get_requests(&self) -> Vec<AnalysisRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl AnalysisClient for MockAnalysisClient {
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResponse> {
        self.requests.lock().unwrap().push(request);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(Error::analysis("No more mock responses available"));
        }

        responses.remove(0)
    }
}

impl Default for MockAnalysisClient {
    fn default() -> Self {
        Self::new()
    }
}
