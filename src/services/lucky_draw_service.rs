use crate::config::MediaConfig;
use crate::entities::lucky_draw_entity::{self as draws, FILE_MAX_LENGTH, NAME_MAX_LENGTH};
use crate::error::{AppError, AppResult};
use crate::models::{
    CreateLuckyDraw, LuckyDrawPageResponse, LuckyDrawResponse, PaginatedResponse,
    PaginationParams, UpdateLuckyDraw,
};
use crate::timestamps::{Changes, Timestamped};
use crate::utils::upload_path;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryOrder, Set, Value,
};

#[derive(Clone)]
pub struct LuckyDrawService {
    pool: DatabaseConnection,
    upload_to: String,
}

impl LuckyDrawService {
    pub fn new(pool: DatabaseConnection, media: &MediaConfig) -> Self {
        Self {
            pool,
            upload_to: media.upload_to.clone(),
        }
    }

    /// 登记抽奖 (时间戳由保存钩子写入)
    pub async fn create(&self, input: CreateLuckyDraw) -> AppResult<LuckyDrawResponse> {
        validate_name(&input.name)?;
        let file = self.file_path(&input.file_name)?;

        let model = draws::ActiveModel {
            name: Set(input.name),
            file: Set(file),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!("Created lucky draw {} ({})", model.id, model.file);
        Ok(model.into())
    }

    pub async fn get(&self, id: i32) -> AppResult<LuckyDrawResponse> {
        let model = self.find(id).await?;
        Ok(model.into())
    }

    /// 分页列表 (按创建时间倒序)
    pub async fn list(&self, params: &PaginationParams) -> AppResult<LuckyDrawPageResponse> {
        let paginator = draws::Entity::find()
            .order_by_desc(draws::Column::CreatedOn)
            .order_by_desc(draws::Column::Id)
            .paginate(&self.pool, params.per_page());

        let counts = paginator.num_items_and_pages().await?;

        // 超出总页数时直接返回空页
        let items = if params.is_within(&counts) {
            paginator
                .fetch_page(params.page_index())
                .await?
                .into_iter()
                .map(Into::into)
                .collect()
        } else {
            Vec::new()
        };

        Ok(PaginatedResponse::new(items, params, counts))
    }

    /// 修改名称或文件 (单条保存, 刷新 updated_on)
    pub async fn update(&self, id: i32, input: UpdateLuckyDraw) -> AppResult<LuckyDrawResponse> {
        let model = self.find(id).await?;
        let mut am = model.into_active_model();

        if let Some(name) = input.name {
            validate_name(&name)?;
            am.name = Set(name);
        }
        if let Some(file_name) = input.file_name {
            am.file = Set(self.file_path(&file_name)?);
        }

        let updated = am.update(&self.pool).await?;
        Ok(updated.into())
    }

    /// 批量改名, 返回受影响行数
    pub async fn bulk_rename(&self, ids: &[i32], name: &str) -> AppResult<u64> {
        validate_name(name)?;
        if ids.is_empty() {
            return Ok(0);
        }

        let rows = draws::Entity::objects()
            .filter(draws::Column::Id.is_in(ids.iter().copied()))
            .update(&self.pool, Changes::new().set(draws::Column::Name, name))
            .await?;
        Ok(rows)
    }

    /// 按任意条件批量更新 (name / file 的取值按字段约束校验)
    pub async fn bulk_update(
        &self,
        filter: Condition,
        changes: Changes<draws::Entity>,
    ) -> AppResult<u64> {
        validate_changes(&changes)?;

        let rows = draws::Entity::objects()
            .filter(filter)
            .update(&self.pool, changes)
            .await?;
        Ok(rows)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = draws::Entity::delete_by_id(id).exec(&self.pool).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound(format!("Lucky draw {id} not found")));
        }
        log::info!("Deleted lucky draw {id}");
        Ok(())
    }

    // -----------------------------
    // 内部辅助方法
    // -----------------------------

    async fn find(&self, id: i32) -> AppResult<draws::Model> {
        draws::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Lucky draw {id} not found")))
    }

    fn file_path(&self, file_name: &str) -> AppResult<String> {
        let path = upload_path(&self.upload_to, file_name)?;
        validate_file_path(&path)?;
        Ok(path)
    }
}

/// 名称: 非空, 最多 150 字符
pub fn validate_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::ValidationError("Name is required".into()));
    }
    if name.chars().count() > NAME_MAX_LENGTH {
        return Err(AppError::ValidationError(format!(
            "Name must be at most {NAME_MAX_LENGTH} characters"
        )));
    }
    Ok(())
}

/// 文件路径: 最多 100 字符
pub fn validate_file_path(path: &str) -> AppResult<()> {
    if path.chars().count() > FILE_MAX_LENGTH {
        return Err(AppError::ValidationError(format!(
            "File path must be at most {FILE_MAX_LENGTH} characters"
        )));
    }
    Ok(())
}

fn validate_changes(changes: &Changes<draws::Entity>) -> AppResult<()> {
    if let Some(value) = changes.get(draws::Column::Name) {
        validate_name(string_value(value, "name")?)?;
    }
    if let Some(value) = changes.get(draws::Column::File) {
        validate_file_path(string_value(value, "file")?)?;
    }
    Ok(())
}

fn string_value<'a>(value: &'a Value, field: &str) -> AppResult<&'a str> {
    match value {
        Value::String(Some(s)) => Ok(s.as_str()),
        _ => Err(AppError::ValidationError(format!(
            "{field} must be a non-null string"
        ))),
    }
}
