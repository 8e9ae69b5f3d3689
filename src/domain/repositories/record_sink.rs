// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::models::weather_record::WeatherRecord;
use crate::domain::repositories::storage_repository::StorageError;

/// 记录写入错误类型
#[derive(Error, Debug)]
pub enum SinkError {
    /// 底层存储失败
    #[error("Storage failure: {0}")]
    Storage(#[from] StorageError),
    /// 序列化或反序列化失败
    #[error("Serialization failure: {0}")]
    Serialization(#[from] serde_json::Error),
    /// 已持久化的文档不是JSON数组
    #[error("Persisted collection '{0}' is not a JSON array")]
    Corrupt(String),
    /// 写入任务已经停止
    #[error("Record writer is closed")]
    WriterClosed,
}

/// 记录集合特质
///
/// 持久化的有序记录集合，只支持追加
#[async_trait]
pub trait RecordSink: Send + Sync {
    /// 追加一条记录
    ///
    /// 并发调用不会丢失记录，已有记录保持不变
    async fn append(&self, record: &WeatherRecord) -> Result<(), SinkError>;

    /// 读取全部已持久化的记录，不符合当前格式的旧条目会被跳过
    async fn load_all(&self) -> Result<Vec<WeatherRecord>, SinkError>;
}
