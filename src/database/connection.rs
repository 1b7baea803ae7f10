use crate::config::DatabaseConfig;
use crate::entities::lucky_draw_entity;
use crate::error::AppResult;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityName, Schema};

pub type DbPool = DatabaseConnection;

pub async fn create_pool(config: &DatabaseConfig) -> AppResult<DbPool> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .sqlx_logging(false);

    let pool = Database::connect(options).await?;

    Ok(pool)
}

/// 按实体定义建表 (IF NOT EXISTS)，用于新库初始化与测试
pub async fn create_schema(pool: &DbPool) -> AppResult<()> {
    let backend = pool.get_database_backend();
    let schema = Schema::new(backend);

    let mut stmt = schema.create_table_from_entity(lucky_draw_entity::Entity);
    stmt.if_not_exists();
    pool.execute(backend.build(&stmt)).await?;

    log::info!(
        "Ensured table {} exists",
        lucky_draw_entity::Entity.table_name()
    );
    Ok(())
}
