// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含天气记录、记录集合接口和数据提取服务
pub mod domain;

/// 引擎模块
///
/// 实现网页抓取引擎
pub mod engines;

/// 基础设施模块
///
/// 提供存储句柄和 JSON 记录集合
pub mod infrastructure;

/// 工具模块
///
/// 提供日志初始化和错误类型
pub mod utils;

/// 工作器模块
///
/// 实现并发抓取、单一写入任务和运行编排
pub mod workers;
