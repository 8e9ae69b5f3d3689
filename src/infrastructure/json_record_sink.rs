// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::domain::models::weather_record::WeatherRecord;
use crate::domain::repositories::record_sink::{RecordSink, SinkError};
use crate::domain::repositories::storage_repository::StorageRepository;

/// JSON 数组记录集合
///
/// 整个集合保存为存储中的一个 JSON 数组文档，每次追加都会
/// 读取完整文档、追加一条记录并整体写回。读改写过程由互斥锁
/// 串行化，并发追加不会丢失记录。已有的数组元素按原样保留，
/// 即使它们不符合当前的记录格式。
pub struct JsonRecordSink {
    storage: Arc<dyn StorageRepository>,
    key: String,
    write_lock: Mutex<()>,
}

impl JsonRecordSink {
    pub fn new(storage: Arc<dyn StorageRepository>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    async fn read_collection(&self) -> Result<Vec<Value>, SinkError> {
        let Some(bytes) = self.storage.get(&self.key).await? else {
            return Ok(Vec::new());
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Array(items)) => Ok(items),
            Ok(_) | Err(_) => Err(SinkError::Corrupt(self.key.clone())),
        }
    }
}

#[async_trait]
impl RecordSink for JsonRecordSink {
    async fn append(&self, record: &WeatherRecord) -> Result<(), SinkError> {
        let _guard = self.write_lock.lock().await;

        let mut items = self.read_collection().await?;
        items.push(serde_json::to_value(record)?);
        let bytes = serde_json::to_vec(&items)?;
        self.storage.save(&self.key, &bytes).await?;

        metrics::counter!("meteocrawl_sink_appends_total").increment(1);
        debug!(key = %self.key, total = items.len(), url = %record.url, "Appended record");
        Ok(())
    }

    async fn load_all(&self) -> Result<Vec<WeatherRecord>, SinkError> {
        let _guard = self.write_lock.lock().await;

        let items = self.read_collection().await?;
        let mut records = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            // Older entries stay in the document but are not records
            match serde_json::from_value::<WeatherRecord>(item) {
                Ok(record) => records.push(record),
                Err(e) => warn!(
                    key = %self.key,
                    index,
                    error = %e,
                    "Skipping persisted entry in older format"
                ),
            }
        }
        Ok(records)
    }
}
