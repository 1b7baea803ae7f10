use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::timestamps::Timestamped;

/// 名称最大长度 (字符)
pub const NAME_MAX_LENGTH: usize = 150;
/// 文件路径最大长度 (字符)
pub const FILE_MAX_LENGTH: usize = 100;

/// 抽奖实体
/// 说明:
/// - file: 上传文件的存储路径 (如 media/xxx.xlsx)，文件内容由外部存储负责
/// - created_on / updated_on: UTC，保存与批量更新时自动维护
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "lucky_draws")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "String(Some(150))")]
    pub name: String,
    #[sea_orm(column_type = "String(Some(100))")]
    pub file: String,
    /// 创建时间
    pub created_on: DateTime<Utc>,
    /// 最后更新时间
    pub updated_on: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

crate::impl_timestamp_behavior!(ActiveModel);

impl Timestamped for Entity {
    fn created_on_column() -> Column {
        Column::CreatedOn
    }

    fn updated_on_column() -> Column {
        Column::UpdatedOn
    }
}
