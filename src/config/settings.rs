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

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// 默认采集的城市历史天气页面
pub const DEFAULT_TARGET_URLS: [&str; 4] = [
    "https://www.meteored.mx/ciudad-de-mexico/historico",
    "https://www.meteored.mx/monterrey/historico",
    "https://www.meteored.mx/merida/historico",
    "https://www.meteored.mx/wakanda/historico",
];

/// 应用程序配置设置
///
/// 包含采集目标、抓取、存储、提取和流水线等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 采集目标配置
    pub targets: TargetSettings,
    /// 抓取配置
    pub fetch: FetchSettings,
    /// 存储配置
    pub storage: StorageSettings,
    /// 提取规则配置
    pub extraction: ExtractionSettings,
    /// 流水线配置
    pub pipeline: PipelineSettings,
}

/// 采集目标配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct TargetSettings {
    /// 需要抓取的URL列表
    pub urls: Vec<String>,
}

/// 抓取配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct FetchSettings {
    /// 单个请求超时时间（秒），未设置时不限制
    pub timeout_secs: Option<u64>,
    /// 请求使用的 User-Agent
    pub user_agent: String,
}

impl FetchSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// 存储配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// 存储类型 (local)
    pub storage_type: String,
    /// 本地存储路径 (当 type=local 时使用)
    pub local_path: Option<String>,
    /// 记录集合在存储中的键
    pub records_key: String,
}

/// 提取规则配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionSettings {
    /// 最后更新时间的正则表达式
    pub date_pattern: String,
    /// 承载数据的元素标签
    pub element_tag: String,
    /// 距离元素的 id
    pub distance_id: String,
    /// 温度元素的 id
    pub temperature_id: String,
    /// 湿度元素的 id
    pub humidity_id: String,
}

/// 流水线配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineSettings {
    /// 写入通道容量
    pub channel_capacity: usize,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从默认值、配置文件和环境变量加载配置
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        Self::builder()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("METEOCRAWL")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("targets.urls")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// 仅使用内置默认值构建配置，不读取文件或环境变量
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::builder()?.build()?.try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        let urls: Vec<String> = DEFAULT_TARGET_URLS.iter().map(|u| u.to_string()).collect();
        Config::builder()
            // Start with default settings
            .set_default("targets.urls", urls)?
            .set_default(
                "fetch.user_agent",
                "Mozilla/5.0 (compatible; meteocrawl/0.1)",
            )?
            // Default Storage settings
            .set_default("storage.storage_type", "local")?
            .set_default("storage.local_path", ".")?
            .set_default("storage.records_key", "data.json")?
            // Default extraction rules
            .set_default(
                "extraction.date_pattern",
                crate::domain::services::extraction_service::DEFAULT_DATE_PATTERN,
            )?
            .set_default("extraction.element_tag", "span")?
            .set_default("extraction.distance_id", "dist_cant")?
            .set_default("extraction.temperature_id", "ult_dato_temp")?
            .set_default("extraction.humidity_id", "ult_dato_hum")?
            .set_default("pipeline.channel_capacity", 64)
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
