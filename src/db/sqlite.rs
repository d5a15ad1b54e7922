use crate::db::models::{DbAccount, Enquiry, NewEnquiry};
use crate::db::schema::SQLITE_INIT;
use crate::error::SylvaError;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite};
use std::str::FromStr;

pub type SqlitePool = Pool<Sqlite>;

#[derive(Clone)]
pub struct SylvaStorage {
    pool: SqlitePool,
}

impl SylvaStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Build a pool without touching the database. Connections are opened on
    /// first use, so an unreachable database surfaces per request instead of at startup.
    pub fn connect_lazy(database_url: &str) -> Result<Self, SylvaError> {
        let connect_opts = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_lazy_with(connect_opts);
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), SylvaError> {
        // execute multiple statements one by one (sqlx::query runs a single statement)
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    pub async fn find_account(&self, username: &str) -> Result<Option<DbAccount>, SylvaError> {
        let account = sqlx::query_as::<_, DbAccount>(
            "SELECT username, password_hash FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(account)
    }

    /// Insert an account unless the username is already taken. Returns whether a row was written.
    /// An existing row is never touched.
    pub async fn insert_account_if_absent(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<bool, SylvaError> {
        let res = sqlx::query(
            "INSERT INTO users (username, password_hash) VALUES (?, ?) ON CONFLICT(username) DO NOTHING",
        )
        .bind(username)
        .bind(password_hash)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() == 1)
    }

    /// Append one enquiry and return it as stored, with its store-assigned id.
    /// Timestamps keep millisecond precision; any representable instant round-trips.
    pub async fn insert_enquiry(&self, mut enquiry: NewEnquiry) -> Result<Enquiry, SylvaError> {
        let timestamp = enquiry.submitted_at.map(|t| t.timestamp_millis());
        enquiry.submitted_at = timestamp.and_then(DateTime::from_timestamp_millis);
        let res = sqlx::query(
            r#"
            INSERT INTO enquiries (name, email, phone, furniture_type, message, timestamp)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&enquiry.name)
        .bind(&enquiry.email)
        .bind(&enquiry.phone)
        .bind(&enquiry.furniture_type)
        .bind(&enquiry.message)
        .bind(timestamp)
        .execute(&self.pool)
        .await?;
        Ok(enquiry.into_enquiry(res.last_insert_rowid()))
    }

    /// All enquiries, most recent timestamp first. Rows without a timestamp sort last. Unbounded.
    pub async fn list_enquiries(&self) -> Result<Vec<Enquiry>, SylvaError> {
        let rows = sqlx::query(
            r#"SELECT id, name, email, phone, furniture_type, message, timestamp
               FROM enquiries ORDER BY timestamp DESC"#,
        )
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Self::row_to_enquiry).collect()
    }

    fn row_to_enquiry(row: SqliteRow) -> Result<Enquiry, SylvaError> {
        let timestamp: Option<i64> = row.try_get("timestamp")?;
        let submitted_at: Option<DateTime<Utc>> = timestamp
            .map(|ms| {
                DateTime::from_timestamp_millis(ms).ok_or_else(|| {
                    sqlx::Error::Decode(format!("timestamp out of range: {ms}").into())
                })
            })
            .transpose()?;

        Ok(Enquiry {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            furniture_type: row.try_get("furniture_type")?,
            message: row.try_get("message")?,
            submitted_at,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::time::{SystemTime, UNIX_EPOCH};

    /// Fresh storage backed by a throwaway SQLite file with the schema applied.
    pub(crate) async fn temp_storage(tag: &str) -> (SylvaStorage, std::path::PathBuf) {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before UNIX_EPOCH")
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!("sylva-{tag}-{}-{nanos}.sqlite", std::process::id()));

        let storage = SylvaStorage::connect_lazy(&format!("sqlite:{}", path.display()))
            .expect("valid sqlite url");
        storage.init_schema().await.expect("schema init failed");
        (storage, path)
    }

    fn enquiry(name: &str, secs: i64) -> NewEnquiry {
        NewEnquiry {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: "555".to_string(),
            furniture_type: "chair".to_string(),
            message: "need one".to_string(),
            submitted_at: Utc.timestamp_opt(secs, 0).single(),
        }
    }

    #[tokio::test]
    async fn lists_most_recent_first() {
        let (storage, path) = temp_storage("order").await;

        storage.insert_enquiry(enquiry("Middle", 1_700_000_000)).await.unwrap();
        storage.insert_enquiry(enquiry("Newest", 1_800_000_000)).await.unwrap();
        storage.insert_enquiry(enquiry("Oldest", 1_600_000_000)).await.unwrap();

        let names: Vec<String> = storage
            .list_enquiries()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["Newest", "Middle", "Oldest"]);

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn sub_second_timestamps_keep_order() {
        let (storage, path) = temp_storage("millis").await;

        let base = Utc.timestamp_opt(1_700_000_000, 0).single().unwrap();
        let mut later = enquiry("Later", 0);
        later.submitted_at = Some(base + chrono::Duration::milliseconds(500));
        let mut earlier = enquiry("Earlier", 0);
        earlier.submitted_at = Some(base);

        storage.insert_enquiry(earlier).await.unwrap();
        storage.insert_enquiry(later).await.unwrap();

        let listed = storage.list_enquiries().await.unwrap();
        assert_eq!(listed[0].name, "Later");
        assert_eq!(listed[1].name, "Earlier");

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn stored_fields_round_trip_verbatim() {
        let (storage, path) = temp_storage("fields").await;

        let mut blank = enquiry("", 1_700_000_000);
        blank.email = "not-an-email".to_string();
        let stored = storage.insert_enquiry(blank.clone()).await.unwrap();
        assert!(stored.id > 0);

        let listed = storage.list_enquiries().await.unwrap();
        assert_eq!(listed, vec![blank.into_enquiry(stored.id)]);

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn instants_beyond_four_digit_years_still_list() {
        let (storage, path) = temp_storage("extremes").await;

        // Both shift across a year boundary once normalised to UTC.
        let future: DateTime<Utc> = "9999-12-31T23:00:00-02:00".parse().expect("valid rfc3339");
        let ancient: DateTime<Utc> = "0000-01-01T00:30:00+01:00".parse().expect("valid rfc3339");
        for (name, at) in [("Future", future), ("Ancient", ancient)] {
            let mut e = enquiry(name, 0);
            e.submitted_at = Some(at);
            storage.insert_enquiry(e).await.unwrap();
        }
        storage.insert_enquiry(enquiry("Now", 1_700_000_000)).await.unwrap();

        let listed = storage.list_enquiries().await.expect("listing must still decode");
        let names: Vec<&str> = listed.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Future", "Now", "Ancient"]);
        assert_eq!(listed[0].submitted_at, Some(future));
        assert_eq!(listed[2].submitted_at, Some(ancient));

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn missing_timestamp_is_stored_as_null_and_sorts_last() {
        let (storage, path) = temp_storage("nullts").await;

        let mut undated = enquiry("Undated", 0);
        undated.submitted_at = None;
        storage.insert_enquiry(undated).await.unwrap();
        storage.insert_enquiry(enquiry("Dated", 1_700_000_000)).await.unwrap();

        let listed = storage.list_enquiries().await.unwrap();
        assert_eq!(listed[0].name, "Dated");
        assert_eq!(listed[1].name, "Undated");
        assert!(listed[1].submitted_at.is_none());

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn existing_account_is_never_overwritten() {
        let (storage, path) = temp_storage("accounts").await;

        assert!(storage.insert_account_if_absent("owner", "first").await.unwrap());
        assert!(!storage.insert_account_if_absent("owner", "second").await.unwrap());

        let account = storage.find_account("owner").await.unwrap().expect("account exists");
        assert_eq!(account.password_hash, "first");
        assert!(storage.find_account("nobody").await.unwrap().is_none());

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn missing_schema_surfaces_as_storage_error() {
        let mut path = std::env::temp_dir();
        path.push(format!("sylva-noschema-{}.sqlite", std::process::id()));
        let storage = SylvaStorage::connect_lazy(&format!("sqlite:{}", path.display())).unwrap();

        let err = storage.list_enquiries().await.unwrap_err();
        assert!(matches!(err, SylvaError::Storage(_)));
        assert!(err.to_string().contains("no such table"));

        let _ = std::fs::remove_file(&path);
    }
}
