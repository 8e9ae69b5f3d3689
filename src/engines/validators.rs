// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use url::Url;

use crate::engines::traits::EngineError;

/// 验证目标 URL
///
/// 只接受带主机名的 http/https 地址
pub fn validate_url(url_str: &str) -> Result<Url, EngineError> {
    let invalid = |reason: String| EngineError::InvalidUrl {
        url: url_str.to_string(),
        reason,
    };

    let url = Url::parse(url_str).map_err(|e| invalid(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme '{}'", other))),
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid("missing host".to_string()));
    }

    Ok(url)
}
