use log::*;
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};

/// Create a fresh throwaway database, run the migrations, and return its URL.
pub async fn prepare_test_env() -> String {
    dotenvy::from_filename(".env.test").ok();
    let _ = env_logger::try_init();
    let url = random_db_path();
    create_database(&url).await;
    run_migrations(&url).await;
    url
}

/// A unique sqlite URL under the system temp directory, so tests never collide.
pub fn random_db_path() -> String {
    let path = std::env::temp_dir().join(format!("tikiti_test_{:016x}.db", rand::random::<u64>()));
    format!("sqlite://{}", path.display())
}

pub async fn create_database(url: &str) {
    if Sqlite::database_exists(url).await.unwrap_or(false) {
        debug!("🪛️ Database {url} already exists. Dropping it");
        Sqlite::drop_database(url).await.expect("Error dropping test database");
    }
    Sqlite::create_database(url).await.expect("Error creating test database");
    info!("🪛️ Test database created at {url}");
}

pub async fn run_migrations(url: &str) {
    let pool = SqlitePool::connect(url).await.expect("Error connecting to test database");
    sqlx::migrate!("./migrations").run(&pool).await.expect("Error running migrations");
    pool.close().await;
    info!("🪛️ Migrations complete");
}
