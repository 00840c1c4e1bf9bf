use sea_orm_migration::prelude::*;

mod m20260401_000001_create_users;
mod m20260401_000002_create_policies;
mod m20260401_000003_create_employees;
mod m20260401_000004_create_dependents;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260401_000001_create_users::Migration),
            Box::new(m20260401_000002_create_policies::Migration),
            Box::new(m20260401_000003_create_employees::Migration),
            Box::new(m20260401_000004_create_dependents::Migration),
        ]
    }
}
