// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::domain::models::weather_record::{WeatherRecord, NO_RESPONSE_STATUS};
use crate::domain::services::extraction_service::WeatherExtractor;
use crate::engines::traits::{FetchRequest, ScraperEngine};

/// 抓取工作者
///
/// 处理单个URL：抓取页面并提取记录。所有失败都会转换成
/// 带失败原因的记录，`process` 本身不会失败。
pub struct ScrapeWorker {
    engine: Arc<dyn ScraperEngine>,
    extractor: Arc<WeatherExtractor>,
    user_agent: String,
    timeout: Option<Duration>,
}

impl ScrapeWorker {
    /// 创建新的抓取工作者实例
    pub fn new(
        engine: Arc<dyn ScraperEngine>,
        extractor: Arc<WeatherExtractor>,
        user_agent: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            engine,
            extractor,
            user_agent: user_agent.into(),
            timeout,
        }
    }

    /// 抓取并提取单个URL
    ///
    /// # 返回值
    ///
    /// 总是返回一条记录：
    /// * 成功提取 - 包含观测数据
    /// * 非200状态码 - 仅包含状态
    /// * 网络错误 - 状态码为 0 并附带失败原因
    /// * 提取失败 - 保留状态码并附带失败原因
    #[instrument(skip(self), fields(engine = self.engine.name()))]
    pub async fn process(&self, url: &str) -> WeatherRecord {
        let request = FetchRequest::new(url, self.user_agent.as_str()).with_timeout(self.timeout);

        let response = match self.engine.fetch(&request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(
                    url,
                    error = %e,
                    connection = e.is_connection_error(),
                    "Fetch failed"
                );
                return WeatherRecord::failure(url, NO_RESPONSE_STATUS, format!("network error: {}", e));
            }
        };

        match self
            .extractor
            .extract(url, response.status_code, response.content.as_deref())
        {
            Ok(record) => {
                if record.is_success() {
                    debug!(url, "Extracted observation");
                } else {
                    warn!(url, status = record.status, "Non-success status");
                }
                record
            }
            Err(e) => {
                warn!(url, status = response.status_code, error = %e, "Extraction failed");
                WeatherRecord::failure(
                    url,
                    response.status_code,
                    format!("extraction error: {}", e),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::weather_record::RecordOutcome;
    use crate::domain::services::extraction_service::{ElementIds, DEFAULT_DATE_PATTERN};
    use crate::engines::traits::{EngineError, FetchResponse};
    use async_trait::async_trait;

    struct StaticEngine {
        status: u16,
        body: Option<&'static str>,
    }

    #[async_trait]
    impl ScraperEngine for StaticEngine {
        async fn fetch(&self, _request: &FetchRequest) -> Result<FetchResponse, EngineError> {
            Ok(FetchResponse {
                status_code: self.status,
                content: self.body.map(str::to_string),
                response_time_ms: 1,
            })
        }

        fn name(&self) -> &'static str {
            "static"
        }
    }

    struct FailingEngine;

    #[async_trait]
    impl ScraperEngine for FailingEngine {
        async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse, EngineError> {
            Err(EngineError::InvalidUrl {
                url: request.url.clone(),
                reason: "connection refused".to_string(),
            })
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    fn worker(engine: Arc<dyn ScraperEngine>) -> ScrapeWorker {
        let extractor =
            WeatherExtractor::new(DEFAULT_DATE_PATTERN, "span", ElementIds::default()).unwrap();
        ScrapeWorker::new(engine, Arc::new(extractor), "test-agent", None)
    }

    #[tokio::test]
    async fn test_process_success() {
        let body = r#"<p>15/03/2024 08:30:00</p><span id="dist_cant">120 km</span>
            <span id="ult_dato_temp">22°C</span><span id="ult_dato_hum">65%</span>"#;
        let record = worker(Arc::new(StaticEngine {
            status: 200,
            body: Some(body),
        }))
        .process("https://example.com/ok")
        .await;

        assert_eq!(record.outcome(), RecordOutcome::Succeeded);
        assert_eq!(record.observation.unwrap().distance, "120 km");
    }

    #[tokio::test]
    async fn test_process_network_error_becomes_sentinel_record() {
        let record = worker(Arc::new(FailingEngine))
            .process("https://example.com/down")
            .await;

        assert_eq!(record.status, NO_RESPONSE_STATUS);
        assert_eq!(record.outcome(), RecordOutcome::NetworkError);
        assert!(record.error.unwrap().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_process_extraction_error_keeps_status() {
        let record = worker(Arc::new(StaticEngine {
            status: 200,
            body: Some("<html><body>no data</body></html>"),
        }))
        .process("https://example.com/empty")
        .await;

        assert_eq!(record.status, 200);
        assert!(record.observation.is_none());
        assert_eq!(record.outcome(), RecordOutcome::ExtractionError);
        assert!(record.error.unwrap().starts_with("extraction error"));
    }

    #[tokio::test]
    async fn test_process_not_found() {
        let record = worker(Arc::new(StaticEngine {
            status: 404,
            body: None,
        }))
        .process("https://example.com/wakanda")
        .await;

        assert_eq!(record.status, 404);
        assert!(record.error.is_none());
        assert_eq!(record.outcome(), RecordOutcome::HttpError);
    }
}
