use sea_orm_migration::prelude::*;

mod m20250101_000001_create_gallery_table;
mod m20250101_000002_create_events_tables;
mod m20250101_000003_create_clubs_tables;
mod m20250101_000004_create_content_tables;
mod m20250101_000005_create_recruit_and_partner_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_gallery_table::Migration),
            Box::new(m20250101_000002_create_events_tables::Migration),
            Box::new(m20250101_000003_create_clubs_tables::Migration),
            Box::new(m20250101_000004_create_content_tables::Migration),
            Box::new(m20250101_000005_create_recruit_and_partner_table::Migration),
        ]
    }
}
