// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use thiserror::Error;

/// 存储错误类型
#[derive(Error, Debug)]
pub enum StorageError {
    /// IO错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// 存储错误
    #[error("Storage error: {0}")]
    Other(String),
}

/// 存储仓库特质
///
/// 按键保存完整文档的存储句柄，记录集合通过它读写
#[async_trait]
pub trait StorageRepository: Send + Sync {
    /// 使用指定键整体写入文档，替换原有内容
    async fn save(&self, key: &str, data: &[u8]) -> Result<(), StorageError>;

    /// 根据键读取文档，不存在时返回 `None`
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;
}
