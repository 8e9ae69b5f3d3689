// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

use crate::config::settings::ExtractionSettings;
use crate::domain::models::weather_record::{Observation, WeatherRecord};

/// 最后更新时间的默认匹配规则：DD/MM/YYYY HH:MM:SS
pub const DEFAULT_DATE_PATTERN: &str = r"\d{2}/\d{2}/\d{4} \d{2}:\d{2}:\d{2}";

/// 提取错误类型
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// 文档中没有匹配的时间戳
    #[error("Last-update timestamp not found")]
    TimestampNotFound,
    /// 缺少指定 id 的元素
    #[error("Element with id '{0}' not found")]
    ElementNotFound(String),
    /// 成功状态但没有响应内容
    #[error("Response body missing for status 200")]
    MissingBody,
    /// 时间戳规则无效
    #[error("Invalid date pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
    /// 元素选择器无效
    #[error("Invalid element selector '{0}'")]
    InvalidSelector(String),
}

/// 三个数据元素的 id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementIds {
    pub distance: String,
    pub temperature: String,
    pub humidity: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            distance: "dist_cant".to_string(),
            temperature: "ult_dato_temp".to_string(),
            humidity: "ult_dato_hum".to_string(),
        }
    }
}

/// 天气数据提取器
///
/// 从历史天气页面的 HTML 中提取最后更新时间、距离、温度和湿度。
/// 时间戳取整个文档中第一个匹配；其余字段按元素 id 精确查找
/// （区分大小写），存在多个同 id 元素时取第一个。
pub struct WeatherExtractor {
    date_pattern: Regex,
    element_selector: Selector,
    ids: ElementIds,
}

impl WeatherExtractor {
    /// 创建提取器
    ///
    /// # 参数
    ///
    /// * `date_pattern` - 时间戳正则表达式
    /// * `element_tag` - 承载数据的元素标签
    /// * `ids` - 三个数据元素的 id
    pub fn new(
        date_pattern: &str,
        element_tag: &str,
        ids: ElementIds,
    ) -> Result<Self, ExtractionError> {
        let date_pattern = Regex::new(date_pattern)?;
        let element_selector = Selector::parse(element_tag)
            .map_err(|e| ExtractionError::InvalidSelector(format!("{}: {}", element_tag, e)))?;

        Ok(Self {
            date_pattern,
            element_selector,
            ids,
        })
    }

    /// 根据配置创建提取器
    pub fn from_settings(settings: &ExtractionSettings) -> Result<Self, ExtractionError> {
        Self::new(
            &settings.date_pattern,
            &settings.element_tag,
            ElementIds {
                distance: settings.distance_id.clone(),
                temperature: settings.temperature_id.clone(),
                humidity: settings.humidity_id.clone(),
            },
        )
    }

    /// 将一次响应转换为记录
    ///
    /// 状态码为200时提取观测数据，其他状态码只生成状态记录。
    ///
    /// # 参数
    ///
    /// * `url` - 来源URL
    /// * `status` - HTTP状态码
    /// * `body` - 响应内容（仅在状态码为200时读取）
    ///
    /// # 返回值
    ///
    /// * `Ok(WeatherRecord)` - 成功记录或状态记录
    /// * `Err(ExtractionError)` - 时间戳或任一元素缺失
    pub fn extract(
        &self,
        url: &str,
        status: u16,
        body: Option<&str>,
    ) -> Result<WeatherRecord, ExtractionError> {
        if status != 200 {
            return Ok(WeatherRecord::status_only(url, status));
        }

        let html = body.ok_or(ExtractionError::MissingBody)?;
        let observation = self.extract_observation(html)?;
        Ok(WeatherRecord::success(url, status, observation))
    }

    /// 从 HTML 中提取观测数据
    pub fn extract_observation(&self, html: &str) -> Result<Observation, ExtractionError> {
        // Matched against the raw markup, not the rendered text
        let date = self
            .date_pattern
            .find(html)
            .map(|m| m.as_str().to_string())
            .ok_or(ExtractionError::TimestampNotFound)?;

        let document = Html::parse_document(html);
        let distance = self.element_text(&document, &self.ids.distance)?;
        let temperature = self.element_text(&document, &self.ids.temperature)?;
        let humidity = self.element_text(&document, &self.ids.humidity)?;

        Ok(Observation {
            date,
            distance,
            temperature,
            humidity,
        })
    }

    fn element_text(&self, document: &Html, id: &str) -> Result<String, ExtractionError> {
        document
            .select(&self.element_selector)
            .find(|element| element.value().id() == Some(id))
            .map(text_of)
            .ok_or_else(|| ExtractionError::ElementNotFound(id.to_string()))
    }
}

/// 元素的全部后代文本，去除首尾空白（内部空白保留）
fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
#[path = "extraction_service_test.rs"]
mod tests;
