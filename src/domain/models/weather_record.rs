// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 没有收到HTTP响应时使用的状态码（网络错误、URL无效）
pub const NO_RESPONSE_STATUS: u16 = 0;

/// 成功提取的观测数据
///
/// 四个字段要么同时存在，要么整体缺失，
/// 因此以单个结构体的形式挂在记录上。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// 最后更新时间，格式为 DD/MM/YYYY HH:MM:SS
    pub date: String,
    /// 距离
    pub distance: String,
    /// 温度
    pub temperature: String,
    /// 湿度
    pub humidity: String,
}

/// 天气记录实体
///
/// 处理单个URL得到的结构化结果。记录一旦创建便不再修改，
/// 存储层只会追加新的记录。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherRecord {
    /// 记录唯一标识符
    pub id: Uuid,
    /// 来源URL
    pub url: String,
    /// HTTP响应状态码，0 表示没有收到响应
    pub status: u16,
    /// 观测数据，仅在成功提取时存在
    #[serde(flatten)]
    pub observation: Option<Observation>,
    /// 失败原因
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// 记录处理结果分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// 成功提取观测数据
    Succeeded,
    /// 服务器返回非200状态码
    HttpError,
    /// 未收到响应
    NetworkError,
    /// 响应为200但提取失败
    ExtractionError,
}

impl RecordOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordOutcome::Succeeded => "succeeded",
            RecordOutcome::HttpError => "http_error",
            RecordOutcome::NetworkError => "network_error",
            RecordOutcome::ExtractionError => "extraction_error",
        }
    }
}

impl WeatherRecord {
    /// 创建一个包含观测数据的成功记录
    pub fn success(url: impl Into<String>, status: u16, observation: Observation) -> Self {
        Self {
            id: Uuid::new_v4(),
            url: url.into(),
            status,
            observation: Some(observation),
            error: None,
        }
    }

    /// 创建一个仅包含状态信息的记录
    pub fn status_only(url: impl Into<String>, status: u16) -> Self {
        Self {
            id: Uuid::new_v4(),
            url: url.into(),
            status,
            observation: None,
            error: None,
        }
    }

    /// 创建一个带有失败原因的记录
    ///
    /// 提取失败时保留原始状态码；网络错误时使用 [`NO_RESPONSE_STATUS`]。
    pub fn failure(url: impl Into<String>, status: u16, error: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            url: url.into(),
            status,
            observation: None,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.observation.is_some()
    }

    /// 对记录进行结果分类，供运行汇总使用
    pub fn outcome(&self) -> RecordOutcome {
        if self.observation.is_some() {
            RecordOutcome::Succeeded
        } else if self.status == NO_RESPONSE_STATUS {
            RecordOutcome::NetworkError
        } else if self.status == 200 {
            RecordOutcome::ExtractionError
        } else {
            RecordOutcome::HttpError
        }
    }
}
