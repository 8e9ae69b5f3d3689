// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{error, info};

use crate::config::settings::Settings;
use crate::domain::models::run_summary::RunSummary;
use crate::domain::models::weather_record::{WeatherRecord, NO_RESPONSE_STATUS};
use crate::domain::repositories::record_sink::RecordSink;
use crate::domain::services::extraction_service::WeatherExtractor;
use crate::engines::traits::ScraperEngine;
use crate::infrastructure::json_record_sink::JsonRecordSink;
use crate::infrastructure::storage::create_storage_repository;
use crate::utils::errors::PipelineError;
use crate::workers::record_writer::RecordWriter;
use crate::workers::scrape_worker::ScrapeWorker;

/// 工作管理器
///
/// 为每个URL启动一个抓取任务，所有记录经由通道交给唯一的写入任务。
/// 任务之间互不影响，全部完成后返回运行汇总。
pub struct WorkerManager {
    worker: Arc<ScrapeWorker>,
    sink: Arc<dyn RecordSink>,
    channel_capacity: usize,
}

impl WorkerManager {
    pub fn new(worker: ScrapeWorker, sink: Arc<dyn RecordSink>, channel_capacity: usize) -> Self {
        Self {
            worker: Arc::new(worker),
            sink,
            channel_capacity,
        }
    }

    /// 根据配置装配提取器、存储和记录集合
    ///
    /// # 参数
    ///
    /// * `settings` - 应用配置
    /// * `engine` - 抓取引擎
    pub fn from_settings(
        settings: &Settings,
        engine: Arc<dyn ScraperEngine>,
    ) -> Result<Self, PipelineError> {
        if settings.storage.records_key.trim().is_empty() {
            return Err(PipelineError::InvalidParameter(
                "storage.records_key must not be empty".to_string(),
            ));
        }

        let extractor = Arc::new(WeatherExtractor::from_settings(&settings.extraction)?);
        let storage = create_storage_repository(&settings.storage)?;
        let sink = Arc::new(JsonRecordSink::new(
            storage,
            settings.storage.records_key.clone(),
        ));

        let worker = ScrapeWorker::new(
            engine,
            extractor,
            settings.fetch.user_agent.clone(),
            settings.fetch.timeout(),
        );

        Ok(Self::new(worker, sink, settings.pipeline.channel_capacity))
    }

    pub fn sink(&self) -> Arc<dyn RecordSink> {
        self.sink.clone()
    }

    /// 执行一次完整的采集
    ///
    /// 所有URL同时启动，完成顺序不确定；每个URL恰好产生一条记录。
    pub async fn run(&self, urls: &[String]) -> RunSummary {
        info!(targets = urls.len(), "Starting collection run");

        let (tx, writer) = RecordWriter::spawn(self.sink.clone(), self.channel_capacity);
        let mut tasks = JoinSet::new();
        let mut task_urls = HashMap::with_capacity(urls.len());

        for url in urls {
            let worker = self.worker.clone();
            let tx = tx.clone();
            let task_url = url.clone();

            let handle = tasks.spawn(async move {
                let record = worker.process(&task_url).await;
                let outcome = record.outcome();
                let queued = tx.send(record).await.is_ok();
                (outcome, queued)
            });
            task_urls.insert(handle.id(), url.clone());
        }

        let mut summary = RunSummary::default();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((outcome, queued)) => {
                    summary.record(outcome);
                    metrics::counter!("meteocrawl_records_total", "outcome" => outcome.as_str())
                        .increment(1);
                    if !queued {
                        error!("Record writer closed before record could be queued");
                        summary.write_errors += 1;
                    }
                }
                Err(e) => {
                    // A panicked task still owes its URL a record
                    let url = task_urls.remove(&e.id()).unwrap_or_default();
                    error!(url = %url, error = %e, "Collection task aborted");
                    summary.record_aborted();
                    metrics::counter!("meteocrawl_records_total", "outcome" => "aborted")
                        .increment(1);

                    let record = WeatherRecord::failure(
                        url,
                        NO_RESPONSE_STATUS,
                        format!("task aborted: {}", e),
                    );
                    if tx.send(record).await.is_err() {
                        summary.write_errors += 1;
                    }
                }
            }
        }
        drop(tx);

        match writer.await {
            Ok(report) => {
                summary.persisted = report.written;
                summary.write_errors += report.failed;
            }
            Err(e) => {
                error!(error = %e, "Record writer task failed");
                summary.write_errors = summary.total;
            }
        }

        info!(
            total = summary.total,
            succeeded = summary.succeeded,
            failed = summary.failed(),
            persisted = summary.persisted,
            write_errors = summary.write_errors,
            "Collection run finished"
        );
        summary
    }
}
