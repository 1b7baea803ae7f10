#![allow(dead_code)]

use prizebond::config::{DatabaseConfig, MediaConfig};
use prizebond::database::{DbPool, create_pool, create_schema};
use prizebond::entities::lucky_draw_entity as draws;
use prizebond::services::LuckyDrawService;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

/// 内存 SQLite (单连接, 保证所有查询看到同一个库)
pub async fn setup_db() -> DbPool {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
    };
    let pool = create_pool(&config).await.expect("connect sqlite");
    create_schema(&pool).await.expect("create schema");
    pool
}

pub async fn setup_service() -> (DbPool, LuckyDrawService) {
    let pool = setup_db().await;
    let service = LuckyDrawService::new(pool.clone(), &MediaConfig::default());
    (pool, service)
}

pub async fn insert_draw(pool: &DbPool, name: &str) -> draws::Model {
    draws::ActiveModel {
        name: Set(name.to_string()),
        file: Set(format!("media/{name}.xlsx")),
        ..Default::default()
    }
    .insert(pool)
    .await
    .expect("insert lucky draw")
}

pub async fn reload(pool: &DbPool, id: i32) -> draws::Model {
    draws::Entity::find_by_id(id)
        .one(pool)
        .await
        .expect("load lucky draw")
        .expect("lucky draw exists")
}
