// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::weather_record::RecordOutcome;

/// 单次采集运行的汇总
///
/// 统计每种处理结果的数量，在运行结束时输出，
/// 避免部分失败被静默吞掉。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// 处理的URL总数
    pub total: usize,
    /// 成功提取的数量
    pub succeeded: usize,
    /// 非200状态码的数量
    pub http_errors: usize,
    /// 网络错误的数量
    pub network_errors: usize,
    /// 提取失败的数量
    pub extraction_errors: usize,
    /// 已持久化的记录数
    pub persisted: usize,
    /// 写入失败的记录数
    pub write_errors: usize,
    /// 异常终止的任务数
    pub aborted_tasks: usize,
}

impl RunSummary {
    pub fn record(&mut self, outcome: RecordOutcome) {
        self.total += 1;
        match outcome {
            RecordOutcome::Succeeded => self.succeeded += 1,
            RecordOutcome::HttpError => self.http_errors += 1,
            RecordOutcome::NetworkError => self.network_errors += 1,
            RecordOutcome::ExtractionError => self.extraction_errors += 1,
        }
    }

    /// 记录一个异常终止的任务
    pub fn record_aborted(&mut self) {
        self.total += 1;
        self.aborted_tasks += 1;
    }

    /// 失败总数（不含成功记录）
    pub fn failed(&self) -> usize {
        self.http_errors + self.network_errors + self.extraction_errors + self.aborted_tasks
    }

    pub fn is_clean(&self) -> bool {
        self.failed() == 0 && self.write_errors == 0
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} urls: {} succeeded, {} failed (http {}, network {}, extraction {}, aborted {}); {} persisted, {} write errors",
            self.total,
            self.succeeded,
            self.failed(),
            self.http_errors,
            self.network_errors,
            self.extraction_errors,
            self.aborted_tasks,
            self.persisted,
            self.write_errors
        )
    }
}
