// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use meteocrawl::config::settings::Settings;
use meteocrawl::engines::reqwest_engine::ReqwestEngine;
use meteocrawl::utils::telemetry;
use meteocrawl::workers::WorkerManager;
use std::sync::Arc;
use tracing::{info, warn};

/// 主函数
///
/// 执行一次完整的采集：抓取全部目标页面、写入记录集合、输出汇总后退出
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting meteocrawl...");

    // 2. Load configuration
    let settings = Settings::new()?;
    info!(targets = settings.targets.urls.len(), "Configuration loaded");

    // 3. Wire engine, extractor and sink
    let manager = WorkerManager::from_settings(&settings, Arc::new(ReqwestEngine))?;

    // 4. Fetch everything, wait for everything
    let summary = manager.run(&settings.targets.urls).await;

    if !summary.is_clean() {
        warn!("Run finished with failures");
    }
    println!("{}", summary);

    Ok(())
}
