// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{
    manager_for, read_collection, settings_for, start_weather_site, unreachable_url,
};
use meteocrawl::domain::models::weather_record::NO_RESPONSE_STATUS;
use meteocrawl::domain::repositories::record_sink::RecordSink;
use serde_json::Value;
use std::collections::{BTreeSet, HashSet};

const OBSERVATION_FIELDS: [&str; 4] = ["date", "distance", "temperature", "humidity"];

fn find<'a>(items: &'a [Value], suffix: &str) -> &'a Value {
    items
        .iter()
        .find(|item| item["url"].as_str().unwrap().ends_with(suffix))
        .unwrap_or_else(|| panic!("no record for {}", suffix))
}

fn keys(item: &Value) -> BTreeSet<String> {
    item.as_object().unwrap().keys().cloned().collect()
}

#[tokio::test]
async fn test_run_writes_one_record_per_url() {
    let server = start_weather_site().await;
    let dir = tempfile::tempdir().unwrap();
    let down = unreachable_url().await;
    let settings = settings_for(&server, dir.path(), vec![down.clone()]);

    let summary = manager_for(&settings).run(&settings.targets.urls).await;

    assert_eq!(summary.total, 5);
    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.extraction_errors, 1);
    assert_eq!(summary.http_errors, 1);
    assert_eq!(summary.network_errors, 1);
    assert_eq!(summary.persisted, 5);
    assert_eq!(summary.write_errors, 0);

    let items = read_collection(dir.path());
    assert_eq!(items.len(), 5);

    let urls: HashSet<String> = items
        .iter()
        .map(|item| item["url"].as_str().unwrap().to_string())
        .collect();
    let expected: HashSet<String> = settings.targets.urls.iter().cloned().collect();
    assert_eq!(urls, expected);

    let ids: HashSet<&str> = items.iter().map(|item| item["id"].as_str().unwrap()).collect();
    assert_eq!(ids.len(), 5);

    // Observation fields are all present or all absent
    for item in &items {
        let present = OBSERVATION_FIELDS
            .iter()
            .filter(|field| item.get(**field).is_some())
            .count();
        assert!(present == 0 || present == 4, "partial record: {}", item);
    }

    let cdmx = find(&items, "/ciudad-de-mexico/historico");
    assert_eq!(cdmx["status"], 200);
    assert_eq!(cdmx["date"], "15/03/2024 08:30:00");
    assert_eq!(cdmx["distance"], "120 km");
    assert_eq!(cdmx["temperature"], "22°C");
    assert_eq!(cdmx["humidity"], "65%");

    let monterrey = find(&items, "/monterrey/historico");
    assert_eq!(monterrey["temperature"], "27°C");

    let wakanda = find(&items, "/wakanda/historico");
    assert_eq!(wakanda["status"], 404);
    assert_eq!(
        keys(wakanda),
        ["id", "status", "url"]
            .iter()
            .map(|k| k.to_string())
            .collect::<BTreeSet<String>>()
    );

    let merida = find(&items, "/merida/historico");
    assert_eq!(merida["status"], 200);
    assert!(merida["error"]
        .as_str()
        .unwrap()
        .contains("timestamp not found"));

    let unreachable = items.iter().find(|item| item["url"] == down.as_str()).unwrap();
    assert_eq!(unreachable["status"], NO_RESPONSE_STATUS);
    assert!(unreachable["error"].as_str().unwrap().starts_with("network error"));
}

#[tokio::test]
async fn test_rerun_appends_without_touching_history() {
    let server = start_weather_site().await;
    let dir = tempfile::tempdir().unwrap();
    let settings = settings_for(&server, dir.path(), Vec::new());

    manager_for(&settings).run(&settings.targets.urls).await;
    let first = read_collection(dir.path());
    assert_eq!(first.len(), 4);

    let summary = manager_for(&settings).run(&settings.targets.urls).await;
    assert_eq!(summary.persisted, 4);

    let second = read_collection(dir.path());
    assert_eq!(second.len(), 8);
    assert_eq!(&second[..4], &first[..]);
}

#[tokio::test]
async fn test_run_keeps_records_from_older_format() {
    let server = start_weather_site().await;
    let dir = tempfile::tempdir().unwrap();
    let legacy = r#"[{"url": "https://www.meteored.mx/wakanda/historico", "status": 404}]"#;
    std::fs::write(dir.path().join("data.json"), legacy).unwrap();

    let settings = settings_for(&server, dir.path(), Vec::new());
    let manager = manager_for(&settings);
    let summary = manager.run(&settings.targets.urls).await;
    assert_eq!(summary.persisted, 4);

    let items = read_collection(dir.path());
    assert_eq!(items.len(), 5);
    assert_eq!(items[0]["url"], "https://www.meteored.mx/wakanda/historico");
    assert!(items[0].get("id").is_none());

    let records = manager.sink().load_all().await.unwrap();
    assert_eq!(records.len(), 4);
    assert!(records.iter().all(|r| r.url.starts_with(&server.uri())));
}

#[tokio::test]
async fn test_corrupt_collection_is_reported_not_replaced() {
    let server = start_weather_site().await;
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("data.json"), "not json").unwrap();

    let settings = settings_for(&server, dir.path(), Vec::new());
    let summary = manager_for(&settings).run(&settings.targets.urls).await;

    assert_eq!(summary.total, 4);
    assert_eq!(summary.persisted, 0);
    assert_eq!(summary.write_errors, 4);
    assert_eq!(
        std::fs::read_to_string(dir.path().join("data.json")).unwrap(),
        "not json"
    );
}
