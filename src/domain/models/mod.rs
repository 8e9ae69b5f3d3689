// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体，包括：
/// - 天气记录（weather_record）：处理单个URL得到的结构化结果
/// - 运行汇总（run_summary）：一次采集运行的结果统计
pub mod run_summary;
pub mod weather_record;
