use sqlx::postgres::PgConnectOptions;
use sqlx::postgres::PgPoolOptions;
use sqlx::Connection;
use sqlx::Executor;
use sqlx::PgConnection;
use sqlx::PgPool;

/// Throwaway database with migrations applied.
///
/// Tests using it are skipped unless `DATABASE_URL` names a server whose
/// user may create databases.
pub struct TestDb {
    pub pool: PgPool,
    db_name: String,
    admin_url: String,
}

impl TestDb {
    /// Create a database with a unique name, or `None` without `DATABASE_URL`.
    pub async fn connect() -> Option<Self> {
        let Ok(admin_url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL not set, skipping Postgres test");
            return None;
        };

        let db_name = format!(
            "test_todo_service_{}",
            uuid::Uuid::new_v4().to_string().replace('-', "_")
        );

        let mut conn = PgConnection::connect(&admin_url)
            .await
            .expect("Failed to connect to Postgres");

        conn.execute(format!(r#"CREATE DATABASE "{}";"#, db_name).as_str())
            .await
            .expect("Failed to create test database");

        let options = admin_url
            .parse::<PgConnectOptions>()
            .expect("Failed to parse DATABASE_URL")
            .database(&db_name);

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .expect("Failed to connect to test database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        Some(Self {
            pool,
            db_name,
            admin_url,
        })
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        let db_name = self.db_name.clone();
        let admin_url = self.admin_url.clone();
        tokio::spawn(async move {
            if let Ok(mut conn) = PgConnection::connect(&admin_url).await {
                let _ = conn
                    .execute(
                        format!(
                            r#"SELECT pg_terminate_backend(pid) FROM pg_stat_activity WHERE datname = '{}';"#,
                            db_name
                        )
                        .as_str(),
                    )
                    .await;

                let _ = conn
                    .execute(format!(r#"DROP DATABASE IF EXISTS "{}";"#, db_name).as_str())
                    .await;
            }
        });
    }
}
