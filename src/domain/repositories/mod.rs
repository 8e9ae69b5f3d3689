// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 定义持久化抽象接口：
/// - 记录集合（record_sink）：只追加的天气记录集合
/// - 存储（storage_repository）：按键读写完整文档的存储句柄
pub mod record_sink;
pub mod storage_repository;
