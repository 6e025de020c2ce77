use r2d2::PooledConnection;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::ErrorCode;

pub const TABLE_NAME: &str = "restaurants";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inserted {
    New,
    Duplicate,
}

pub struct SqliteDatabase {}

impl SqliteDatabase {
    /**
    Create the restaurants table if it is not there yet.

    Names are unique, a second row with the same name is refused by sqlite.
    */
    pub fn create_table(
        connection: &PooledConnection<SqliteConnectionManager>,
    ) -> rusqlite::Result<()> {
        connection.execute(
            &format!(
                "CREATE TABLE IF NOT EXISTS {} (
                    id INTEGER PRIMARY KEY,
                    name TEXT NOT NULL UNIQUE,
                    hours TEXT NOT NULL
                )",
                TABLE_NAME
            ),
            (),
        )?;
        Ok(())
    }

    /**
    Get every (name, hours) pair in insertion order.
    */
    pub fn query_all_hours(
        connection: &PooledConnection<SqliteConnectionManager>,
    ) -> rusqlite::Result<Vec<(String, String)>> {
        let mut statement = connection.prepare(&format!(
            "SELECT name, hours FROM {} ORDER BY id",
            TABLE_NAME
        ))?;

        let rows = statement.query_map((), |row| {
            let name: String = row.get(0)?;
            let hours: String = row.get(1)?;
            Ok((name, hours))
        })?;

        let mut data: Vec<(String, String)> = Vec::new();
        for row in rows {
            data.push(row?);
        }
        Ok(data)
    }

    /**
    Insert one restaurant.

    Returns `Ok(Inserted::Duplicate)` instead of an error when the name is
    already taken.
    */
    pub fn insert_restaurant(
        connection: &PooledConnection<SqliteConnectionManager>,
        name: &str,
        hours: &str,
    ) -> rusqlite::Result<Inserted> {
        let result = connection.execute(
            &format!("INSERT INTO {} (name, hours) VALUES (?1, ?2)", TABLE_NAME),
            rusqlite::params![name, hours],
        );
        match result {
            Ok(_) => Ok(Inserted::New),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Ok(Inserted::Duplicate)
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
pub mod tests {
    use r2d2::Pool;

    use super::*;

    /// In-memory databases live per connection, so the pool is capped at one.
    pub fn memory_pool() -> Pool<SqliteConnectionManager> {
        let pool = Pool::builder()
            .max_size(1)
            .build(SqliteConnectionManager::memory())
            .unwrap();
        SqliteDatabase::create_table(&pool.get().unwrap()).unwrap();
        pool
    }

    #[test]
    fn create_table_twice() {
        let pool = memory_pool();
        SqliteDatabase::create_table(&pool.get().unwrap()).unwrap();
    }

    #[test]
    fn insert_and_query_in_order() {
        let pool = memory_pool();
        let connection = pool.get().unwrap();
        for (name, hours) in [("Zeta", "Mon 9 am - 5 pm"), ("Alpha", "Tue 9 am - 5 pm")] {
            assert_eq!(
                SqliteDatabase::insert_restaurant(&connection, name, hours).unwrap(),
                Inserted::New
            );
        }
        assert_eq!(
            SqliteDatabase::query_all_hours(&connection).unwrap(),
            vec![
                ("Zeta".to_string(), "Mon 9 am - 5 pm".to_string()),
                ("Alpha".to_string(), "Tue 9 am - 5 pm".to_string()),
            ]
        );
    }

    #[test]
    fn duplicate_name_is_reported() {
        let pool = memory_pool();
        let connection = pool.get().unwrap();
        SqliteDatabase::insert_restaurant(&connection, "Zeta", "Mon 9 am - 5 pm").unwrap();
        assert_eq!(
            SqliteDatabase::insert_restaurant(&connection, "Zeta", "Sun 9 am - 5 pm").unwrap(),
            Inserted::Duplicate
        );
        assert_eq!(SqliteDatabase::query_all_hours(&connection).unwrap().len(), 1);
    }
}
