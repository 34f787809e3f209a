use diesel::{
    Connection, SqliteConnection,
    connection::{Instrumentation, InstrumentationEvent, SimpleConnection},
    r2d2::{ConnectionManager, CustomizeConnection, Pool, PoolError, PooledConnection},
};

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConn = PooledConnection<ConnectionManager<SqliteConnection>>;

struct ConnectionTracer;

impl Instrumentation for ConnectionTracer {
    fn on_connection_event(&mut self, event: InstrumentationEvent<'_>) {
        match event {
            InstrumentationEvent::StartQuery { query, .. } => {
                tracing::trace!("Started running query {query:?}");
            }
            InstrumentationEvent::FinishQuery { query, error, .. } => {
                if let Some(error) = error {
                    tracing::warn!(
                        "Encountered an error when running query {query} (error: {error})"
                    );
                }
            }
            _ => (),
        }
    }
}

#[derive(Debug)]
struct Customizer;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for Customizer {
    fn on_acquire(
        &self,
        conn: &mut SqliteConnection,
    ) -> Result<(), diesel::r2d2::Error> {
        conn.set_instrumentation(ConnectionTracer);

        conn.batch_execute(
            "\
            PRAGMA journal_mode = WAL;\
            PRAGMA busy_timeout = 1000;\
            PRAGMA foreign_keys = ON;\
        ",
        )
        .map_err(diesel::r2d2::Error::QueryError)?;

        Ok(())
    }
}

/// Builds the connection pool used by everything in this crate. Foreign key
/// enforcement is per-connection in SQLite, so it is switched on here rather
/// than in the migrations.
pub fn build_pool(db_url: &str) -> Result<DbPool, PoolError> {
    Pool::builder()
        .max_size(if db_url == ":memory:" { 1 } else { 10 })
        .connection_customizer(Box::new(Customizer))
        .build(ConnectionManager::<SqliteConnection>::new(db_url))
}
