// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use std::sync::Arc;
use sweethome::domain::models::listing::ListingRecord;

/// 创建已迁移的内存数据库
pub async fn setup_db() -> Arc<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    Arc::new(db)
}

pub fn listing(name: &str, district: &str, status: &str) -> ListingRecord {
    let mut record = ListingRecord::new(name, district);
    record.address = Some(format!("서울특별시 {} 테스트로 1", district));
    record.image_url = Some(format!("https://soco.seoul.go.kr/images/{}.jpg", name));
    record.detail_url = Some(format!(
        "https://soco.seoul.go.kr/youth/pgm/home/yohome/view.do?menuNo=400002&homeCode={}",
        name
    ));
    record.description = Some(format!("상태: {} | 지하철: 2호선 역삼역", status));
    record
}
