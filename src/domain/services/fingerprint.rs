// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::listing::ListingRecord;
use sha2::{Digest, Sha256};

/// 字段分隔符（ASCII 单元分隔符），不会出现在页面文本中
const FIELD_SEPARATOR: char = '\u{1F}';

/// 计算房源的内容指纹
///
/// 对 `name`、`district`、`address`、`detail_url`、`description` 按顺序拼接后取
/// SHA-256 十六进制摘要，缺失的可选字段按空字符串处理。`image_url` 不参与计算，
/// 图片地址变化不会引起存储写入。
pub fn compute_fingerprint(record: &ListingRecord) -> String {
    let fields = [
        record.name.as_str(),
        record.district.as_str(),
        record.address.as_deref().unwrap_or_default(),
        record.detail_url.as_deref().unwrap_or_default(),
        record.description.as_deref().unwrap_or_default(),
    ];

    let mut hasher = Sha256::new();
    for (index, field) in fields.iter().enumerate() {
        if index > 0 {
            let mut buf = [0u8; 4];
            hasher.update(FIELD_SEPARATOR.encode_utf8(&mut buf).as_bytes());
        }
        hasher.update(field.as_bytes());
    }
    hex::encode(hasher.finalize())
}
