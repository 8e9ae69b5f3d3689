// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

use crate::domain::repositories::storage_repository::StorageError;
use crate::domain::services::extraction_service::ExtractionError;

/// 流水线装配错误类型
///
/// 只在启动阶段出现；单个URL的失败不会以错误形式向上传播
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("提取器初始化失败: {0}")]
    Extractor(#[from] ExtractionError),

    #[error("存储初始化失败: {0}")]
    Storage(#[from] StorageError),

    #[error("无效参数: {0}")]
    InvalidParameter(String),
}
