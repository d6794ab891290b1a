use crate::{CBox, SqliteCursor, error_message_from_ptr};
use ladle_core::{Context, Cursor, Error, Result};
use libsqlite3_sys::{
    SQLITE_OK, SQLITE_OPEN_CREATE, SQLITE_OPEN_READWRITE, SQLITE_OPEN_URI, sqlite3, sqlite3_close,
    sqlite3_errmsg, sqlite3_open_v2,
};
use std::{ffi::CString, ptr};

pub const URL_PREFIX: &str = "sqlite://";

/// Connection to a sqlite database.
///
/// ```rust
/// use ladle::CursorExt;
/// use ladle_sqlite::SqliteConnection;
///
/// # fn main() -> ladle::Result<()> {
/// let mut connection = SqliteConnection::connect("sqlite://:memory:")?;
/// connection.execute("CREATE TABLE tag (id INTEGER, name TEXT); INSERT INTO tag VALUES (1, 'rust');")?;
/// let mut names = Vec::<String>::new();
/// connection
///     .query("SELECT name FROM tag")?
///     .for_each_record(true, |c| Ok(names.push(c.get("name")?)))?;
/// assert_eq!(names, ["rust"]);
/// # Ok(())
/// # }
/// ```
pub struct SqliteConnection {
    pub(crate) connection: CBox<*mut sqlite3>,
}

impl SqliteConnection {
    /// Open the database at `url`, like `sqlite://path/to/file.db?mode=rwc` or
    /// `sqlite://:memory:`. The part after the prefix is handed to sqlite as a
    /// `file:` URI, query parameters included.
    pub fn connect(url: impl AsRef<str>) -> Result<Self> {
        let url = url.as_ref();
        let Some(location) = url.strip_prefix(URL_PREFIX) else {
            let error = Error::msg(format!(
                "Expected sqlite connection url to start with `{}`",
                URL_PREFIX
            ));
            log::error!("{:#}", error);
            return Err(error);
        };
        let context = || format!("Error while decoding connection URL: `{}`", url);
        let location = CString::new(format!("file:{location}")).with_context(context)?;
        let mut connection = CBox::new(ptr::null_mut(), |p| unsafe {
            sqlite3_close(p);
        });
        unsafe {
            let rc = sqlite3_open_v2(
                location.as_ptr(),
                &mut *connection,
                SQLITE_OPEN_READWRITE | SQLITE_OPEN_CREATE | SQLITE_OPEN_URI,
                ptr::null(),
            );
            if rc != SQLITE_OK {
                let error = Error::msg(
                    error_message_from_ptr(&sqlite3_errmsg(*connection)).to_string(),
                )
                .context(format!("Could not open the database `{}`", url));
                log::error!("{:#}", error);
                return Err(error);
            }
        }
        Ok(Self { connection })
    }

    /// Run every statement of `sql`, discarding the rows produced.
    pub fn execute(&mut self, sql: impl Into<String>) -> Result<()> {
        let mut cursor = self.query(sql)?;
        loop {
            while cursor.advance_record()? {}
            if !cursor.advance_result_set()? {
                break;
            }
        }
        cursor.close()
    }

    /// Cursor over the result sets of the statements in `sql`, one result set
    /// per statement.
    pub fn query(&mut self, sql: impl Into<String>) -> Result<SqliteCursor<'_>> {
        SqliteCursor::new(self, sql.into())
    }
}
