use sea_orm_migration::prelude::*;

mod m20240516_000001_create_users_table;
mod m20240516_000002_create_requests_table;
mod m20240516_000003_create_logs_table;
mod m20240516_000004_create_refresh_tokens;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240516_000001_create_users_table::Migration),
            Box::new(m20240516_000002_create_requests_table::Migration),
            Box::new(m20240516_000003_create_logs_table::Migration),
            Box::new(m20240516_000004_create_refresh_tokens::Migration),
        ]
    }
}
