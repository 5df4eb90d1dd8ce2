// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;

/// “全部”区域名称，不施加任何筛选
pub const SENTINEL_DISTRICT: &str = "전체";

/// 首尔市 25 个自治区，按页面筛选按钮顺序排列
pub const SEOUL_DISTRICTS: [&str; 25] = [
    "강남구", "강동구", "강북구", "강서구", "관악구", "광진구", "구로구", "금천구", "노원구",
    "도봉구", "동대문구", "동작구", "마포구", "서대문구", "서초구", "성동구", "성북구", "송파구",
    "양천구", "영등포구", "용산구", "은평구", "종로구", "중구", "중랑구",
];

/// 区域目录错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DistrictError {
    /// 请求的区域不存在
    #[error("District not found: {0}")]
    NotFound(String),
    /// 两个区域共享同一筛选标记
    #[error("Duplicate district filter token: {0}")]
    DuplicateToken(String),
    /// 目录为空
    #[error("District catalog must contain at least the sentinel district")]
    Empty,
}

/// 爬取目标区域
///
/// `filter_token` 是页面上筛选按钮的可见标签；“全部”区域不点击任何按钮
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct District {
    pub name: String,
    #[serde(rename = "filterToken")]
    pub filter_token: String,
    #[serde(skip)]
    sentinel: bool,
}

impl District {
    /// 是否为不施加筛选的“全部”区域
    pub fn is_sentinel(&self) -> bool {
        self.sentinel
    }
}

/// 区域目录
///
/// 启动时构建一次，之后只读，通过 `Arc` 在组件之间共享。
/// 插入顺序即爬取顺序，第一个条目总是“全部”区域。
#[derive(Debug, Clone)]
pub struct DistrictCatalog {
    districts: Vec<District>,
}

impl DistrictCatalog {
    /// 根据区域名称列表构建目录
    ///
    /// 第一个名称被视为“全部”区域。每个区域的筛选标记等于其名称。
    ///
    /// # 返回值
    ///
    /// * `Ok(DistrictCatalog)` - 构建成功
    /// * `Err(DistrictError)` - 列表为空或存在重复标记
    pub fn new<I, S>(names: I) -> Result<Self, DistrictError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut districts = Vec::new();

        for (index, name) in names.into_iter().enumerate() {
            let name: String = name.into();
            if !seen.insert(name.clone()) {
                return Err(DistrictError::DuplicateToken(name));
            }
            districts.push(District {
                filter_token: name.clone(),
                name,
                sentinel: index == 0,
            });
        }

        if districts.is_empty() {
            return Err(DistrictError::Empty);
        }

        Ok(Self { districts })
    }

    /// 首尔默认目录：“全部” + 25 个自治区
    pub fn seoul() -> Self {
        let districts = std::iter::once(SENTINEL_DISTRICT)
            .chain(SEOUL_DISTRICTS)
            .enumerate()
            .map(|(index, name)| District {
                name: name.to_string(),
                filter_token: name.to_string(),
                sentinel: index == 0,
            })
            .collect();

        Self { districts }
    }

    /// 使用配置覆盖的区域列表，未配置时回退到首尔默认目录
    pub fn from_overrides(names: Option<&[String]>) -> Result<Self, DistrictError> {
        match names {
            Some(names) => Self::new(names.iter().cloned()),
            None => Ok(Self::seoul()),
        }
    }

    /// 按爬取顺序列出所有区域
    pub fn list(&self) -> &[District] {
        &self.districts
    }

    /// 按名称精确查找区域
    pub fn find(&self, name: &str) -> Result<&District, DistrictError> {
        self.districts
            .iter()
            .find(|d| d.name == name)
            .ok_or_else(|| DistrictError::NotFound(name.to_string()))
    }

    /// “全部”区域
    pub fn sentinel(&self) -> &District {
        // Construction guarantees a non-empty list.
        &self.districts[0]
    }

    /// 区域名称列表
    pub fn names(&self) -> Vec<String> {
        self.districts.iter().map(|d| d.name.clone()).collect()
    }
}

impl Default for DistrictCatalog {
    fn default() -> Self {
        Self::seoul()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seoul_catalog_starts_with_sentinel() {
        let catalog = DistrictCatalog::seoul();
        assert_eq!(catalog.list().len(), 26);
        assert_eq!(catalog.sentinel().name, SENTINEL_DISTRICT);
        assert!(catalog.sentinel().is_sentinel());
        assert!(catalog.list()[1..].iter().all(|d| !d.is_sentinel()));
    }

    #[test]
    fn test_find_known_district() {
        let catalog = DistrictCatalog::seoul();
        let district = catalog.find("강남구").unwrap();
        assert_eq!(district.name, "강남구");
        assert_eq!(district.filter_token, "강남구");
    }

    #[test]
    fn test_find_unknown_district() {
        let catalog = DistrictCatalog::seoul();
        assert_eq!(
            catalog.find("없는구"),
            Err(DistrictError::NotFound("없는구".to_string()))
        );
    }

    #[test]
    fn test_find_is_exact_match() {
        let catalog = DistrictCatalog::seoul();
        assert!(catalog.find(" 강남구").is_err());
        assert!(catalog.find("강남").is_err());
    }

    #[test]
    fn test_tokens_are_unique() {
        let catalog = DistrictCatalog::seoul();
        let tokens: HashSet<_> = catalog.list().iter().map(|d| &d.filter_token).collect();
        assert_eq!(tokens.len(), catalog.list().len());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let result = DistrictCatalog::new(["전체", "강남구", "강남구"]);
        assert_eq!(
            result.unwrap_err(),
            DistrictError::DuplicateToken("강남구".to_string())
        );
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let result = DistrictCatalog::new(Vec::<String>::new());
        assert_eq!(result.unwrap_err(), DistrictError::Empty);
    }

    #[test]
    fn test_overrides_keep_order() {
        let names = vec!["전체".to_string(), "마포구".to_string(), "중구".to_string()];
        let catalog = DistrictCatalog::from_overrides(Some(&names)).unwrap();
        assert_eq!(catalog.names(), names);
        assert!(catalog.find("마포구").is_ok());
        assert!(catalog.find("강남구").is_err());
    }
}
