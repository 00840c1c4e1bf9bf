use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Dependents::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Dependents::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Dependents::EmployeeId).uuid().not_null())
                    .col(ColumnDef::new(Dependents::Name).string().not_null())
                    .col(ColumnDef::new(Dependents::Relationship).string().not_null())
                    .col(ColumnDef::new(Dependents::Dob).date())
                    .col(ColumnDef::new(Dependents::Gender).string())
                    .col(ColumnDef::new(Dependents::PolicyId).uuid())
                    .col(
                        ColumnDef::new(Dependents::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Dependents::Table, Dependents::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Dependents::Table, Dependents::PolicyId)
                            .to(Policies::Table, Policies::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Dependents::Table)
                    .col(Dependents::EmployeeId)
                    .name("idx_dependents_employee_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_dependents_employee_id").to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Dependents::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Dependents {
    Table,
    Id,
    EmployeeId,
    Name,
    Relationship,
    Dob,
    Gender,
    PolicyId,
    CreatedAt,
}

#[derive(Iden)]
enum Employees {
    Table,
    Id,
}

#[derive(Iden)]
enum Policies {
    Table,
    Id,
}
