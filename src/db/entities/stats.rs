//! The roast counter.
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;

/// Row holding the counter.
pub const COUNTER_ID: i32 = 1;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "stats")]
/// Running totals
pub struct Model {
    #[sea_orm(primary_key)]
    /// db id, only [`COUNTER_ID`] is used
    pub id: i32,
    /// roasts generated so far
    pub total_roasts: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Creates the counter row at `seed` unless it already exists.
pub async fn ensure_counter<C: ConnectionTrait>(db: &C, seed: i64) -> Result<(), DbErr> {
    if Entity::find_by_id(COUNTER_ID).one(db).await?.is_some() {
        return Ok(());
    }
    ActiveModel {
        id: Set(COUNTER_ID),
        total_roasts: Set(seed),
    }
    .insert(db)
    .await?;
    Ok(())
}

/// Current counter value, `None` before [`ensure_counter`] has run.
pub async fn total_roasts<C: ConnectionTrait>(db: &C) -> Result<Option<i64>, DbErr> {
    Ok(Entity::find_by_id(COUNTER_ID)
        .one(db)
        .await?
        .map(|model| model.total_roasts))
}

/// Bumps the counter by one.
pub async fn increment<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    Entity::update_many()
        .col_expr(Column::TotalRoasts, Expr::col(Column::TotalRoasts).add(1))
        .filter(Column::Id.eq(COUNTER_ID))
        .exec(db)
        .await?;
    Ok(())
}
