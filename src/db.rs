use sqlx::{sqlite::SqlitePoolOptions, FromRow, SqlitePool};
use time::OffsetDateTime;

use crate::contact::form::ValidatedContact;

/// One row of `contact`. Rows are only ever inserted.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ContactMessage {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: OffsetDateTime,
}

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS contact (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        VARCHAR(80)  NOT NULL,
    email       VARCHAR(120) NOT NULL,
    message     TEXT         NOT NULL,
    created_at  DATETIME     NOT NULL
)
"#;

pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let db_pool = SqlitePoolOptions::new()
        .max_connections(16)
        .connect(database_url)
        .await?;
    init(&db_pool).await?;
    Ok(db_pool)
}

pub async fn init(db_pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(SCHEMA).execute(db_pool).await?;
    Ok(())
}

pub async fn insert(db_pool: &SqlitePool, contact: &ValidatedContact) -> Result<ContactMessage, sqlx::Error> {
    let mut tx = db_pool.begin().await?;
    let row: ContactMessage = sqlx::query_as(
        "INSERT INTO contact (name,email,message,created_at) VALUES (?,?,?,?) \
         RETURNING id,name,email,message,created_at",
    )
        .bind(&contact.name)
        .bind(&contact.email)
        .bind(&contact.message)
        .bind(OffsetDateTime::now_utc())
        .fetch_one(&mut *tx)
        .await?;
    tx.commit().await?;
    Ok(row)
}

/// Newest first. Rows are insert-only, so id order is creation order; `created_at`
/// is stored as RFC 3339 text, which does not sort as time once fractions vary.
pub async fn list_all(db_pool: &SqlitePool) -> Result<Vec<ContactMessage>, sqlx::Error> {
    sqlx::query_as("SELECT id,name,email,message,created_at FROM contact ORDER BY id DESC")
        .fetch_all(db_pool)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_pool() -> SqlitePool {
        let db_pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        init(&db_pool).await.unwrap();
        db_pool
    }

    fn contact(name: &str) -> ValidatedContact {
        ValidatedContact {
            name: name.to_owned(),
            email: format!("{}@example.com", name.to_lowercase()),
            message: "hi".to_owned(),
        }
    }

    #[tokio::test]
    async fn insert_assigns_id_and_timestamp() {
        let db_pool = memory_pool().await;
        let before = OffsetDateTime::now_utc();

        let row = insert(&db_pool, &contact("Alice")).await.unwrap();

        assert!(row.id > 0);
        assert_eq!(row.name, "Alice");
        assert_eq!(row.email, "alice@example.com");
        assert_eq!(row.message, "hi");
        assert!(row.created_at >= before);
    }

    #[tokio::test]
    async fn list_all_is_newest_first() {
        let db_pool = memory_pool().await;
        let first = insert(&db_pool, &contact("Alice")).await.unwrap();
        let second = insert(&db_pool, &contact("Bob")).await.unwrap();

        let rows = list_all(&db_pool).await.unwrap();

        assert_eq!(rows, vec![second, first]);
    }

    #[tokio::test]
    async fn whole_second_timestamp_does_not_reorder() {
        use time::macros::datetime;

        let db_pool = memory_pool().await;
        for (name, at) in [
            ("Alice", datetime!(2024-05-01 12:00:00 UTC)),
            ("Bob", datetime!(2024-05-01 12:00:00.5 UTC)),
        ] {
            sqlx::query("INSERT INTO contact (name,email,message,created_at) VALUES (?,?,?,?)")
                .bind(name)
                .bind("x@example.com")
                .bind("hi")
                .bind(at)
                .execute(&db_pool)
                .await
                .unwrap();
        }

        let names: Vec<String> = list_all(&db_pool).await.unwrap().into_iter().map(|row| row.name).collect();
        assert_eq!(names, vec!["Bob", "Alice"]);
    }

    #[tokio::test]
    async fn init_is_repeatable() {
        let db_pool = memory_pool().await;
        insert(&db_pool, &contact("Alice")).await.unwrap();
        init(&db_pool).await.unwrap();
        assert_eq!(list_all(&db_pool).await.unwrap().len(), 1);
    }
}
