use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Policies::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Policies::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Policies::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Policies::Name).string().not_null())
                    .col(ColumnDef::new(Policies::Description).string())
                    .col(
                        ColumnDef::new(Policies::MonthlyPremiumCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Policies::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Policies::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Policies {
    Table,
    Id,
    Code,
    Name,
    Description,
    MonthlyPremiumCents,
    CreatedAt,
}
