// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm_migration::prelude::*;

/// 创建住房小区表
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(HousingComplexes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(HousingComplexes::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(HousingComplexes::Name).string().not_null())
                    .col(ColumnDef::new(HousingComplexes::District).string().not_null())
                    .col(ColumnDef::new(HousingComplexes::Address).string())
                    .col(ColumnDef::new(HousingComplexes::ImageUrl).string())
                    .col(ColumnDef::new(HousingComplexes::DetailUrl).string())
                    .col(ColumnDef::new(HousingComplexes::Description).text())
                    .col(ColumnDef::new(HousingComplexes::DataHash).string())
                    .col(
                        ColumnDef::new(HousingComplexes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(HousingComplexes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Lookup index; (name, district) is not unique.
        manager
            .create_index(
                Index::create()
                    .name("idx_housing_complexes_name_district")
                    .table(HousingComplexes::Table)
                    .col(HousingComplexes::Name)
                    .col(HousingComplexes::District)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(HousingComplexes::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum HousingComplexes {
    Table,
    Id,
    Name,
    District,
    Address,
    ImageUrl,
    DetailUrl,
    Description,
    DataHash,
    CreatedAt,
    UpdatedAt,
}
