// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施模块
///
/// 提供存储句柄和 JSON 记录集合的具体实现
pub mod json_record_sink;
pub mod storage;
