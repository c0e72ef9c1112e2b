use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // scientist_id is intentionally not a foreign key: the reference is
        // checked in the service layer, and deleting a scientist must neither
        // cascade to nor block on its discoveries.
        manager
            .create_table(
                Table::create()
                    .table(Discovery::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Discovery::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Discovery::Title).string().not_null())
                    .col(ColumnDef::new(Discovery::ScientistId).integer().not_null())
                    .col(ColumnDef::new(Discovery::Field).string())
                    .col(ColumnDef::new(Discovery::Year).integer())
                    .col(ColumnDef::new(Discovery::ShortDescription).text())
                    .col(ColumnDef::new(Discovery::Image).string())
                    .col(
                        ColumnDef::new(Discovery::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Discovery::UpdatedAt)
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
                    .name("idx_discovery_scientist")
                    .table(Discovery::Table)
                    .col(Discovery::ScientistId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_discovery_year")
                    .table(Discovery::Table)
                    .col(Discovery::Year)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Discovery::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Discovery {
    Table,
    Id,
    Title,
    ScientistId,
    Field,
    Year,
    ShortDescription,
    Image,
    CreatedAt,
    UpdatedAt,
}
