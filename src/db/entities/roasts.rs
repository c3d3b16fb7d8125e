//! DB storage for generated roasts
use sea_orm::{ActiveValue::Set, TransactionTrait, entity::prelude::*};

use crate::constants::{MAX_LABEL_CHARS, MAX_TOPIC_CHARS};
use crate::error::RoasterError;
use crate::roast::{Language, Roast};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "roasts")]
/// One generated roast
pub struct Model {
    #[sea_orm(primary_key)]
    /// db id
    pub id: i32,
    /// what the user asked to roast
    pub topic: String,
    /// banner text
    pub label: String,
    /// caption text
    #[sea_orm(column_type = "Text")]
    pub body: String,
    /// language the roast was asked for in
    pub language: Language,
    /// when it was generated
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn truncate(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}

/// Appends a roast to the log and bumps the counter, in one transaction.
pub async fn record_roast(
    db: &DatabaseConnection,
    topic: &str,
    roast: &Roast,
    language: Language,
) -> Result<(), RoasterError> {
    let db_txn = db.begin().await?;

    ActiveModel {
        topic: Set(truncate(topic, MAX_TOPIC_CHARS)),
        label: Set(truncate(&roast.label, MAX_LABEL_CHARS)),
        body: Set(roast.body.clone()),
        language: Set(language),
        created_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(&db_txn)
    .await?;
    super::stats::increment(&db_txn).await?;

    db_txn.commit().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::entities::stats;
    use sea_orm::QueryOrder;
    use sea_orm_migration::MigratorTrait;

    async fn setup_db() -> DatabaseConnection {
        let db = crate::db::connect_test_db()
            .await
            .expect("connect test db");
        crate::db::migrations::Migrator::up(&db, None)
            .await
            .expect("run migrations");
        db
    }

    #[tokio::test]
    async fn counter_is_seeded_once() {
        let db = setup_db().await;
        assert_eq!(stats::total_roasts(&db).await.expect("read"), None);
        stats::ensure_counter(&db, 10).await.expect("seed");
        stats::ensure_counter(&db, 99).await.expect("seed again");
        assert_eq!(stats::total_roasts(&db).await.expect("read"), Some(10));
    }

    #[tokio::test]
    async fn recording_logs_and_counts() {
        let db = setup_db().await;
        stats::ensure_counter(&db, 5).await.expect("seed");

        let roast = Roast {
            label: "Gym Tourist".to_string(),
            body: "Selfie pe selfie, rep ek bhi nahi".to_string(),
        };
        record_roast(&db, "Gym wale", &roast, Language::Hindi)
            .await
            .expect("record first");
        record_roast(&db, "Engineers", &roast, Language::English)
            .await
            .expect("record second");

        assert_eq!(stats::total_roasts(&db).await.expect("read"), Some(7));
        let rows = Entity::find()
            .order_by_asc(Column::Id)
            .all(&db)
            .await
            .expect("fetch roasts");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].topic, "Gym wale");
        assert_eq!(rows[0].language, Language::Hindi);
        assert_eq!(rows[1].language, Language::English);
        assert_eq!(rows[1].label, "Gym Tourist");
    }

    #[tokio::test]
    async fn long_fields_are_truncated() {
        let db = setup_db().await;
        stats::ensure_counter(&db, 0).await.expect("seed");
        let roast = Roast {
            label: "l".repeat(300),
            body: "b".repeat(1000),
        };
        record_roast(&db, &"t".repeat(400), &roast, Language::English)
            .await
            .expect("record");
        let row = Entity::find()
            .one(&db)
            .await
            .expect("fetch")
            .expect("row exists");
        assert_eq!(row.topic.len(), MAX_TOPIC_CHARS);
        assert_eq!(row.label.len(), MAX_LABEL_CHARS);
        assert_eq!(row.body.len(), 1000);
    }
}
