// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use meteocrawl::config::settings::Settings;
use meteocrawl::engines::reqwest_engine::ReqwestEngine;
use meteocrawl::workers::WorkerManager;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// 生成一个历史天气页面
pub fn history_page(date: &str, distance: &str, temperature: &str, humidity: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="es">
  <head><meta charset="utf-8"><title>Histórico</title></head>
  <body>
    <div class="cabecera">Última actualización {date}</div>
    <table>
      <tr><td>Distancia</td><td><span id="dist_cant">{distance}</span></td></tr>
      <tr><td>Temperatura</td><td><span id="ult_dato_temp">{temperature}</span></td></tr>
      <tr><td>Humedad</td><td><span id="ult_dato_hum">{humidity}</span></td></tr>
    </table>
  </body>
</html>"#
    )
}

/// 模拟站点
///
/// * `/ciudad-de-mexico/historico` - 完整页面
/// * `/monterrey/historico` - 完整页面
/// * `/merida/historico` - 缺少时间戳
/// * `/wakanda/historico` - 404
pub async fn start_weather_site() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ciudad-de-mexico/historico"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html; charset=utf-8")
                .set_body_string(history_page("15/03/2024 08:30:00", "120 km", "22°C", "65%")),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/monterrey/historico"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html; charset=utf-8")
                .set_body_string(history_page("15/03/2024 09:10:00", "8 km", "27°C", "40%")),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/merida/historico"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html; charset=utf-8")
                .set_body_string(history_page("sin fecha", "30 km", "31°C", "70%")),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/wakanda/historico"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    server
}

/// 返回一个没有进程监听的地址
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/historico", addr)
}

/// 指向模拟站点和临时目录的配置
pub fn settings_for(server: &MockServer, data_dir: &Path, extra: Vec<String>) -> Settings {
    let mut settings = Settings::defaults().unwrap();
    let mut urls: Vec<String> = ["ciudad-de-mexico", "monterrey", "merida", "wakanda"]
        .iter()
        .map(|city| format!("{}/{}/historico", server.uri(), city))
        .collect();
    urls.extend(extra);

    settings.targets.urls = urls;
    settings.storage.local_path = Some(data_dir.to_string_lossy().to_string());
    settings
}

pub fn manager_for(settings: &Settings) -> WorkerManager {
    WorkerManager::from_settings(settings, Arc::new(ReqwestEngine)).unwrap()
}

/// 直接从磁盘读取记录集合
pub fn read_collection(data_dir: &Path) -> Vec<Value> {
    let raw = std::fs::read(data_dir.join("data.json")).unwrap();
    serde_json::from_slice(&raw).unwrap()
}
