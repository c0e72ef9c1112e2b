use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DiscoveryStory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DiscoveryStory::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DiscoveryStory::DiscoveryId)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(DiscoveryStory::ScientistId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(DiscoveryStory::Image).string())
                    .col(ColumnDef::new(DiscoveryStory::Content).json())
                    .col(ColumnDef::new(DiscoveryStory::Impact).json())
                    .col(ColumnDef::new(DiscoveryStory::References).json())
                    .col(ColumnDef::new(DiscoveryStory::Timeline).json())
                    .col(
                        ColumnDef::new(DiscoveryStory::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(DiscoveryStory::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_discovery_story_scientist")
                    .table(DiscoveryStory::Table)
                    .col(DiscoveryStory::ScientistId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DiscoveryStory::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum DiscoveryStory {
    Table,
    Id,
    DiscoveryId,
    ScientistId,
    Image,
    Content,
    Impact,
    References,
    Timeline,
    CreatedAt,
    UpdatedAt,
}
