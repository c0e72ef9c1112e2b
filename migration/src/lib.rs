pub use sea_orm_migration::prelude::*;

mod m20260812_101500_create_user;
mod m20260812_102200_create_scientist;
mod m20260812_103000_create_discovery;
mod m20260812_103800_create_discovery_story;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260812_101500_create_user::Migration),
            Box::new(m20260812_102200_create_scientist::Migration),
            Box::new(m20260812_103000_create_discovery::Migration),
            Box::new(m20260812_103800_create_discovery_story::Migration),
        ]
    }
}
