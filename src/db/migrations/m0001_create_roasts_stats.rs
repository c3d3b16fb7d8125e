use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Roasts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Roasts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Roasts::Topic).string_len(255).not_null())
                    .col(ColumnDef::new(Roasts::Label).string_len(100).not_null())
                    .col(ColumnDef::new(Roasts::Body).text().not_null())
                    .col(
                        ColumnDef::new(Roasts::Language)
                            .string_len(20)
                            .not_null()
                            .default("hindi"),
                    )
                    .col(
                        ColumnDef::new(Roasts::CreatedAt)
                            .date_time()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Stats::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Stats::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Stats::TotalRoasts)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Stats::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Roasts::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Roasts {
    Table,
    Id,
    Topic,
    Label,
    Body,
    Language,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Stats {
    Table,
    Id,
    TotalRoasts,
}
