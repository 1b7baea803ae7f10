//! 创建/更新时间戳
//!
//! - 单条记录保存: `impl_timestamp_behavior!` 通过 `before_save` 写入时间戳
//! - 批量更新: `TimestampedQuerySet::update` 在调用方未指定 `updated_on` 时注入当前 UTC 时间
//!
//! `update_many` 直接在数据库层执行, 不会经过 `before_save`, 所以批量路径需要单独处理。

use std::marker::PhantomData;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, IntoCondition};
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, DbErr, EntityName, EntityTrait, IdenStatic, QueryFilter,
    Value,
};

/// 当前 UTC 时间
pub fn now_in_utc() -> DateTime<Utc> {
    Utc::now()
}

/// 时间来源
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// 系统时钟 (UTC)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        now_in_utc()
    }
}

impl<F> Clock for F
where
    F: Fn() -> DateTime<Utc> + Send + Sync,
{
    fn now(&self) -> DateTime<Utc> {
        self()
    }
}

/// 带创建/更新时间戳的实体
///
/// 实现方的 `ActiveModel` 应同时使用 [`impl_timestamp_behavior!`](crate::impl_timestamp_behavior)
/// 以覆盖单条保存路径。
pub trait Timestamped: EntityTrait {
    fn created_on_column() -> Self::Column;

    fn updated_on_column() -> Self::Column;

    /// 全表查询集, 对应 manager 级别的 `update`
    fn objects() -> TimestampedQuerySet<Self> {
        TimestampedQuerySet::new()
    }
}

/// 批量更新的字段赋值 (列 -> 新值), 保持插入顺序, 同一列只保留最后一次赋值
#[derive(Debug, Clone)]
pub struct Changes<E: EntityTrait> {
    values: Vec<(E::Column, Value)>,
}

impl<E: EntityTrait> Default for Changes<E> {
    fn default() -> Self {
        Self { values: Vec::new() }
    }
}

impl<E: EntityTrait> Changes<E> {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn set<V: Into<Value>>(mut self, column: E::Column, value: V) -> Self {
        self.insert(column, value.into());
        self
    }

    pub fn insert(&mut self, column: E::Column, value: Value) {
        match self.values.iter_mut().find(|(c, _)| same_column(c, &column)) {
            Some(slot) => slot.1 = value,
            None => self.values.push((column, value)),
        }
    }

    pub fn remove(&mut self, column: E::Column) -> Option<Value> {
        let index = self
            .values
            .iter()
            .position(|(c, _)| same_column(c, &column))?;
        Some(self.values.remove(index).1)
    }

    pub fn contains(&self, column: E::Column) -> bool {
        self.values.iter().any(|(c, _)| same_column(c, &column))
    }

    pub fn get(&self, column: E::Column) -> Option<&Value> {
        self.values
            .iter()
            .find(|(c, _)| same_column(c, &column))
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_values(self) -> Vec<(E::Column, Value)> {
        self.values
    }
}

fn same_column<C: ColumnTrait>(a: &C, b: &C) -> bool {
    a.as_str() == b.as_str()
}

/// 过滤后的记录集合, 批量更新时自动刷新 `updated_on`
pub struct TimestampedQuerySet<E: Timestamped> {
    condition: Condition,
    clock: Arc<dyn Clock>,
    entity: PhantomData<E>,
}

impl<E: Timestamped> Default for TimestampedQuerySet<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Timestamped> Clone for TimestampedQuerySet<E> {
    fn clone(&self) -> Self {
        Self {
            condition: self.condition.clone(),
            clock: Arc::clone(&self.clock),
            entity: PhantomData,
        }
    }
}

impl<E: Timestamped> TimestampedQuerySet<E> {
    pub fn new() -> Self {
        Self {
            condition: Condition::all(),
            clock: Arc::new(SystemClock),
            entity: PhantomData,
        }
    }

    /// 追加过滤条件 (AND)
    #[must_use]
    pub fn filter<F: IntoCondition>(mut self, filter: F) -> Self {
        self.condition = self.condition.add(filter.into_condition());
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// 批量更新, 返回受影响行数
    ///
    /// - 未指定 `updated_on` 时, 本次调用只取一次时间, 所有命中记录写入同一时刻
    /// - 指定了 `updated_on` 时原样写入, 不读取时钟
    /// - 对 `created_on` 的赋值会被丢弃
    pub async fn update<C>(&self, db: &C, mut changes: Changes<E>) -> Result<u64, DbErr>
    where
        C: ConnectionTrait,
    {
        let created_on = E::created_on_column();
        if changes.remove(created_on).is_some() {
            log::warn!(
                "Ignoring assignment to {} in bulk update of {}",
                created_on.as_str(),
                E::default().table_name()
            );
        }

        let updated_on = E::updated_on_column();
        if !changes.contains(updated_on) {
            changes.insert(updated_on, self.clock.now().into());
        }

        let mut update = E::update_many().filter(self.condition.clone());
        for (column, value) in changes.into_values() {
            update = update.col_expr(column, Expr::value(value));
        }
        let result = update.exec(db).await?;

        log::debug!(
            "Bulk updated {} rows in {}",
            result.rows_affected,
            E::default().table_name()
        );
        Ok(result.rows_affected)
    }
}

/// 为实体的 `ActiveModel` 实现保存时的时间戳写入
///
/// 要求实体含有 `created_on` 与 `updated_on` 两个 `DateTime<Utc>` 字段:
/// - 插入: 两个字段写入同一时刻 (覆盖调用方的值)
/// - 更新: 刷新 `updated_on`, 丢弃对 `created_on` 的修改
#[macro_export]
macro_rules! impl_timestamp_behavior {
    ($active_model:ty) => {
        #[async_trait::async_trait]
        impl sea_orm::ActiveModelBehavior for $active_model {
            async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, sea_orm::DbErr>
            where
                C: sea_orm::ConnectionTrait,
            {
                let now = $crate::timestamps::now_in_utc();
                if insert {
                    self.created_on = sea_orm::ActiveValue::Set(now);
                } else if self.created_on.is_set() {
                    self.created_on = sea_orm::ActiveValue::NotSet;
                }
                self.updated_on = sea_orm::ActiveValue::Set(now);
                Ok(self)
            }
        }
    };
}
