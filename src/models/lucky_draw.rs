use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::lucky_draw_entity as entity;

use super::PaginatedResponse;

/// 创建抽奖
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateLuckyDraw {
    /// 名称 (最多 150 字符)
    pub name: String,
    /// 上传文件的原始文件名
    pub file_name: String,
}

/// 修改抽奖 (仅修改提供的字段)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpdateLuckyDraw {
    pub name: Option<String>,
    pub file_name: Option<String>,
}

/// 抽奖信息响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LuckyDrawResponse {
    pub id: i32,
    pub name: String,
    /// 文件存储路径
    pub file: String,
    pub created_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
}

impl From<entity::Model> for LuckyDrawResponse {
    fn from(m: entity::Model) -> Self {
        LuckyDrawResponse {
            id: m.id,
            name: m.name,
            file: m.file,
            created_on: m.created_on,
            updated_on: m.updated_on,
        }
    }
}

/// 抽奖分页响应
pub type LuckyDrawPageResponse = PaginatedResponse<LuckyDrawResponse>;
