// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::listing::ListingRecord;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

static LIST_ITEMS: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("ul.theme_list li, ul.theme_slider li").expect("valid list item selector")
});
static TITLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".theme_detail h3").expect("valid title selector"));
static PARAGRAPHS: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".theme_detail p").expect("valid paragraph selector"));
static LABEL: Lazy<Selector> = Lazy::new(|| Selector::parse("span").expect("valid span selector"));
static THUMBNAIL: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".thum img").expect("valid thumbnail selector"));
static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a").expect("valid anchor selector"));
static STATUS_BADGES: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".icon span").expect("valid badge selector"));

static HOME_VIEW_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"homeView\((\d+)\)").expect("valid homeView regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

const SLIDER_CLONE_CLASS: &str = "slick-cloned";
const SUBWAY_MARKER: &str = "지하철역";
const ADDRESS_MARKER: &str = "주소";

/// 房源提取器
///
/// 把已就绪页面的 HTML 快照转换为房源记录。纯函数，不访问浏览器，
/// 因此可以直接用保存下来的页面做确定性测试。
#[derive(Debug, Clone)]
pub struct ListingExtractor {
    site_origin: String,
    detail_url_template: String,
}

impl ListingExtractor {
    /// 创建提取器
    ///
    /// # 参数
    ///
    /// * `site_origin` - 站点源，例如 `https://soco.seoul.go.kr`
    /// * `detail_url_template` - 详情页模板，`{id}` 为房源编号占位符
    pub fn new(site_origin: impl Into<String>, detail_url_template: impl Into<String>) -> Self {
        Self {
            site_origin: site_origin.into(),
            detail_url_template: detail_url_template.into(),
        }
    }

    /// 从 HTML 文本提取房源
    pub fn extract(&self, html: &str, district: &str) -> Vec<ListingRecord> {
        let document = Html::parse_document(html);
        self.extract_from_document(&document, district)
    }

    /// 从已解析的文档提取房源
    ///
    /// 列表与轮播中的条目按文档顺序遍历；轮播插件生成的克隆条目以及
    /// 没有名称的条目（渲染未完成）会被跳过，而不是报错。
    pub fn extract_from_document(&self, document: &Html, district: &str) -> Vec<ListingRecord> {
        document
            .select(&LIST_ITEMS)
            .filter(|item| !is_slider_clone(item))
            .filter_map(|item| self.extract_item(item, district))
            .collect()
    }

    fn extract_item(&self, item: ElementRef<'_>, district: &str) -> Option<ListingRecord> {
        let name = item
            .select(&TITLE)
            .next()
            .map(|title| text_of(&title))
            .filter(|name| !name.is_empty())?;

        let mut subway = String::new();
        let mut address = String::new();
        for paragraph in item.select(&PARAGRAPHS) {
            let text = text_of(&paragraph);
            if text.contains(SUBWAY_MARKER) {
                subway = strip_label(&paragraph, &text);
            } else if text.contains(ADDRESS_MARKER) {
                address = strip_label(&paragraph, &text);
            }
        }

        let image_url = item
            .select(&THUMBNAIL)
            .next()
            .and_then(|img| img.value().attr("src"))
            .filter(|src| !src.is_empty())
            .map(|src| format!("{}{}", self.site_origin, src));

        let detail_url = item
            .select(&ANCHOR)
            .next()
            .and_then(|a| a.value().attr("href"))
            .and_then(|href| self.detail_url_for(href));

        let statuses: Vec<String> = item
            .select(&STATUS_BADGES)
            .map(|badge| WHITESPACE.replace_all(&text_of(&badge), " ").into_owned())
            .filter(|status| !status.is_empty())
            .collect();

        Some(ListingRecord {
            name,
            district: district.to_string(),
            address: Some(address).filter(|a| !a.is_empty()),
            image_url,
            detail_url,
            description: Some(compose_description(&statuses, &subway)),
        })
    }

    /// 从 `javascript:homeView(123)` 形式的链接中解析详情页地址
    pub fn detail_url_for(&self, href: &str) -> Option<String> {
        HOME_VIEW_ID
            .captures(href)
            .and_then(|caps| caps.get(1))
            .map(|id| self.detail_url_template.replace("{id}", id.as_str()))
    }
}

/// 合成状态描述
///
/// 有状态徽标时为 `상태: a, b | 지하철: <地铁>`，否则只有 `지하철: <地铁>`
pub fn compose_description(statuses: &[String], subway: &str) -> String {
    if statuses.is_empty() {
        format!("지하철: {}", subway)
    } else {
        format!("상태: {} | 지하철: {}", statuses.join(", "), subway)
    }
}

fn is_slider_clone(item: &ElementRef<'_>) -> bool {
    item.value().classes().any(|class| class == SLIDER_CLONE_CLASS)
}

fn text_of(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

// Removes the first occurrence of the label span's text, e.g. "주소" in "<span>주소</span> 서울시 ...".
fn strip_label(paragraph: &ElementRef<'_>, text: &str) -> String {
    let label = paragraph
        .select(&LABEL)
        .next()
        .map(|span| text_of(&span))
        .unwrap_or_default();

    if label.is_empty() {
        text.trim().to_string()
    } else {
        text.replacen(&label, "", 1).trim().to_string()
    }
}
