use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Scientist::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Scientist::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Scientist::Name).string().not_null())
                    .col(ColumnDef::new(Scientist::Field).string())
                    .col(ColumnDef::new(Scientist::Image).string())
                    .col(ColumnDef::new(Scientist::Tagline).string())
                    .col(ColumnDef::new(Scientist::Era).string())
                    .col(ColumnDef::new(Scientist::Nationality).string())
                    .col(ColumnDef::new(Scientist::Born).string())
                    .col(ColumnDef::new(Scientist::Died).string())
                    .col(ColumnDef::new(Scientist::Bio).text())
                    .col(ColumnDef::new(Scientist::Story).json())
                    .col(ColumnDef::new(Scientist::Impact).json())
                    .col(ColumnDef::new(Scientist::Quotes).json())
                    .col(ColumnDef::new(Scientist::FunFacts).json())
                    .col(
                        ColumnDef::new(Scientist::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Scientist::UpdatedAt)
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
                    .name("idx_scientist_name")
                    .table(Scientist::Table)
                    .col(Scientist::Name)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Scientist::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Scientist {
    Table,
    Id,
    Name,
    Field,
    Image,
    Tagline,
    Era,
    Nationality,
    Born,
    Died,
    Bio,
    Story,
    Impact,
    Quotes,
    FunFacts,
    CreatedAt,
    UpdatedAt,
}
