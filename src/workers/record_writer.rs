// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::domain::models::weather_record::WeatherRecord;
use crate::domain::repositories::record_sink::RecordSink;

/// 写入任务统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriterReport {
    /// 成功写入的记录数
    pub written: usize,
    /// 写入失败的记录数
    pub failed: usize,
}

/// 记录写入者
///
/// 唯一的写入任务，按接收顺序逐条追加到记录集合
pub struct RecordWriter;

impl RecordWriter {
    /// 启动写入任务
    ///
    /// 所有发送端关闭后任务结束，并返回写入统计
    pub fn spawn(
        sink: Arc<dyn RecordSink>,
        capacity: usize,
    ) -> (mpsc::Sender<WeatherRecord>, JoinHandle<WriterReport>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let handle = tokio::spawn(Self::run(sink, rx));
        (tx, handle)
    }

    async fn run(sink: Arc<dyn RecordSink>, mut rx: mpsc::Receiver<WeatherRecord>) -> WriterReport {
        let mut report = WriterReport::default();

        while let Some(record) = rx.recv().await {
            match sink.append(&record).await {
                Ok(()) => report.written += 1,
                Err(e) => {
                    error!(url = %record.url, id = %record.id, error = %e, "Failed to persist record");
                    report.failed += 1;
                }
            }
        }

        info!(
            written = report.written,
            failed = report.failed,
            "Record writer drained"
        );
        report
    }
}
