#[cfg(test)]
mod tests {
    use indoc::indoc;
    use ladle::{Cursor, CursorExt, Hydrator, Result, ResultSet, Value};
    use ladle_sqlite::{SqliteConnection, SqliteCursor};
    use ladle_tests::{Opener, Script, execute_tests, init_logs, silent_logs};
    use std::{env, fs, path::Path};

    fn literal(value: &Value) -> String {
        match value {
            Value::Int64(Some(v)) => v.to_string(),
            Value::Varchar(Some(v)) => format!("'{}'", v.replace('\'', "''")),
            _ => "NULL".into(),
        }
    }

    fn render(set: &ResultSet) -> String {
        if set.labels().is_empty() {
            return "CREATE TEMP TABLE IF NOT EXISTS ladle_noop (x)".into();
        }
        let select = |row: Option<&[Value]>| {
            let columns = set
                .labels()
                .iter()
                .enumerate()
                .map(|(i, label)| {
                    let value = row.map_or_else(|| "NULL".into(), |v| literal(&v[i]));
                    format!("{value} AS \"{label}\"")
                })
                .collect::<Vec<_>>()
                .join(", ");
            format!("SELECT {columns}")
        };
        if set.rows().is_empty() {
            return format!("{} WHERE 0", select(None));
        }
        set.rows()
            .iter()
            .map(|row| select(Some(row)))
            .collect::<Vec<_>>()
            .join(" UNION ALL ")
    }

    struct SqliteOpener {
        connection: SqliteConnection,
    }

    impl Opener for SqliteOpener {
        type Cursor<'s> = SqliteCursor<'s>;

        fn open(&mut self, script: &Script) -> Result<Self::Cursor<'_>> {
            let sql = script
                .sets()
                .iter()
                .map(render)
                .collect::<Vec<_>>()
                .join(";\n");
            self.connection.query(sql)
        }
    }

    #[test]
    fn sqlite() {
        init_logs();
        let connection =
            SqliteConnection::connect("sqlite://:memory:").expect("Could not open the database");
        execute_tests(&mut SqliteOpener { connection });
    }

    #[test]
    fn sqlite_file() {
        init_logs();
        let path = env::temp_dir().join(format!("ladle-sqlite-{}.sqlite", std::process::id()));
        if path.exists() {
            fs::remove_file(&path).expect("Failed to remove existing test database file");
        }
        {
            let mut connection =
                SqliteConnection::connect(format!("sqlite://{}?mode=rwc", path.display()))
                    .expect("Could not open the database");
            assert!(
                Path::new(&path).exists(),
                "Database file should be created after connection"
            );
            connection
                .execute("CREATE TABLE t (v INTEGER); INSERT INTO t VALUES (42);")
                .expect("Failed to create the table");
        }
        {
            let mut connection = SqliteConnection::connect(format!("sqlite://{}", path.display()))
                .expect("Could not reopen the database");
            let v = connection
                .query("SELECT v FROM t")
                .expect("Failed to query")
                .fill_object::<Single>(true, true)
                .expect("Failed to read the value");
            assert_eq!(v.map(|v| v.v), Some(42));
        }
        let _ = fs::remove_file(&path);
    }

    #[derive(Hydrator, Default)]
    struct Single {
        v: i64,
    }

    #[test]
    fn sqlite_connect_errors() {
        init_logs();
        silent_logs! {
            assert!(SqliteConnection::connect("postgres://localhost").is_err());
            assert!(SqliteConnection::connect("sqlite://:memory:?mode=nope").is_err());
        }
    }

    #[test]
    fn sqlite_values() {
        #[derive(Hydrator, Default, Debug, PartialEq)]
        struct Sample {
            integer: i64,
            small: u8,
            real: f64,
            text: String,
            blob: Vec<u8>,
            absent: Option<i32>,
            day: Option<time::Date>,
            flag: bool,
        }
        init_logs();
        let mut connection =
            SqliteConnection::connect("sqlite://:memory:").expect("Could not open the database");
        let mut cursor = connection
            .query(indoc! {"
                SELECT
                    9007199254740993 AS integer,
                    200 AS small,
                    1.25 AS real,
                    'it''s' AS text,
                    x'CAFE' AS blob,
                    NULL AS absent,
                    '2024-02-29' AS day,
                    1 AS flag
            "})
            .expect("Failed to query");
        let sample = cursor
            .fill_object::<Sample>(false, true)
            .expect("Failed to read the sample")
            .expect("The sample should be present");
        assert_eq!(
            sample,
            Sample {
                integer: 9007199254740993,
                small: 200,
                real: 1.25,
                text: "it's".into(),
                blob: vec![0xCA, 0xFE],
                absent: None,
                day: time::Date::from_calendar_date(2024, time::Month::February, 29).ok(),
                flag: true,
            }
        );
        let row = cursor.current_row().expect("Failed to read the row");
        assert_eq!(row.values()[0], Value::Int64(Some(9007199254740993)));
        assert_eq!(row.values()[5], Value::Null);
        assert!(!cursor.advance_record().expect("Failed to advance"));
        assert!(cursor.value(0).is_err());
        cursor.close_safely();
    }

    #[test]
    fn sqlite_script() {
        init_logs();
        let mut connection =
            SqliteConnection::connect("sqlite://:memory:").expect("Could not open the database");
        let mut cursor = connection
            .query(indoc! {"
                -- setup
                CREATE TABLE item (id INTEGER PRIMARY KEY, name TEXT NOT NULL);
                INSERT INTO item (name) VALUES ('spoon'), ('fork'), ('knife');

                SELECT id, name FROM item ORDER BY id;
                UPDATE item SET name = upper(name);
                SELECT name FROM item WHERE id = 2;
            "})
            .expect("Failed to query");
        let mut created = false;
        cursor
            .no_record(|| created = true)
            .next_result_safely();
        assert!(created);
        let mut names = Vec::<String>::new();
        let mut updated = false;
        cursor
            .next_result_safely()
            .for_each_record(false, |c| Ok(names.push(c.get("name")?)))
            .expect("Failed to read the items")
            .next_result_safely()
            .no_record(|| updated = true)
            .next_result_safely();
        assert_eq!(names, ["spoon", "fork", "knife"]);
        assert!(updated);
        let fork: Option<String> = cursor
            .fill_object::<Name>(false, true)
            .expect("Failed to read the second item")
            .map(|v| v.name);
        assert_eq!(fork.as_deref(), Some("FORK"));
        assert!(!cursor.next_result_safely().is_closed());
        assert_eq!(cursor.field_count(), 0);
        assert!(!cursor.advance_result_set().expect("No more statements"));
        cursor.close_safely();
        assert!(cursor.is_closed());
    }

    #[derive(Hydrator, Default)]
    struct Name {
        name: String,
    }

    #[test]
    fn sqlite_errors() {
        init_logs();
        let mut connection =
            SqliteConnection::connect("sqlite://:memory:").expect("Could not open the database");
        silent_logs! {
            assert!(connection.query("SELEC 1").is_err());
            assert!(connection.execute("SELECT 1; SELECT * FROM missing_table").is_err());
            let mut cursor = connection.query("SELECT 1 AS a; SELEC 2").expect("The first statement is valid");
            assert!(cursor.advance_result_set().is_err());
            cursor.close_safely();
        }
        let mut cursor = connection.query("SELECT 1 AS a").expect("Failed to query");
        assert!(cursor.next_result_safely().field_count() == 0);
        cursor.close().expect("Failed to close");
        cursor.close().expect("Closing twice must succeed");
        assert!(cursor.advance_record().is_err());
    }
}
