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

use crate::engines::traits::{EngineError, FetchRequest, FetchResponse, ScraperEngine};
use crate::engines::validators;
use async_trait::async_trait;
use std::time::Instant;
use tracing::debug;

/// 抓取引擎
///
/// 基于reqwest实现的基本HTTP抓取引擎
pub struct ReqwestEngine;

#[async_trait]
impl ScraperEngine for ReqwestEngine {
    /// 执行HTTP GET
    ///
    /// # 参数
    ///
    /// * `request` - 抓取请求
    ///
    /// # 返回值
    ///
    /// * `Ok(FetchResponse)` - 抓取响应，非200状态码不读取内容
    /// * `Err(EngineError)` - 连接失败或URL无效
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse, EngineError> {
        let url = validators::validate_url(&request.url)?;

        // Each request gets a fresh client so connections and cookies are never shared
        let mut builder = reqwest::Client::builder()
            .user_agent(request.user_agent.as_str())
            .cookie_store(true);

        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build()?;

        let start = Instant::now();
        let response = client.get(url).send().await?;

        let status_code = response.status().as_u16();
        let content = if status_code == 200 {
            Some(response.text().await?)
        } else {
            None
        };

        let response_time_ms = start.elapsed().as_millis() as u64;
        debug!(
            url = %request.url,
            status = status_code,
            elapsed_ms = response_time_ms,
            "Fetched page"
        );

        Ok(FetchResponse {
            status_code,
            content,
            response_time_ms,
        })
    }

    /// 获取引擎名称
    fn name(&self) -> &'static str {
        "reqwest"
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;
