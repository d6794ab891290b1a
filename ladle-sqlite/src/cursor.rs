use crate::{
    CBox, SqliteConnection, error_message_from_ptr,
    extract::{extract_name, extract_value},
};
use ladle_core::{Context, Cursor, CursorError, Error, Result, Value, truncate_long};
use libsqlite3_sys::{
    SQLITE_BUSY, SQLITE_DONE, SQLITE_OK, SQLITE_ROW, sqlite3, sqlite3_column_count,
    sqlite3_errmsg, sqlite3_finalize, sqlite3_prepare_v2, sqlite3_step, sqlite3_stmt,
};
use std::{
    ffi::{CString, c_char, c_int},
    marker::PhantomData,
    ptr,
};

fn finalize(statement: *mut sqlite3_stmt) {
    unsafe {
        sqlite3_finalize(statement);
    }
}

/// [`Cursor`] over a sql script, each statement is one result set.
///
/// Statements are prepared lazily, when the cursor reaches them. Statements
/// that do not return rows are run right away and show up as result sets
/// without columns.
pub struct SqliteCursor<'c> {
    connection: *mut sqlite3,
    sql: CString,
    /// Byte offset of the statements not prepared yet.
    offset: usize,
    statement: CBox<*mut sqlite3_stmt>,
    labels: Box<[String]>,
    on_row: bool,
    done: bool,
    closed: bool,
    _connection: PhantomData<&'c mut SqliteConnection>,
}

impl<'c> SqliteCursor<'c> {
    pub(crate) fn new(connection: &'c mut SqliteConnection, sql: String) -> Result<Self> {
        let sql = match CString::new(sql) {
            Ok(sql) => sql,
            Err(e) => {
                let error =
                    Error::new(e).context("Could not create a CString from the query String");
                log::error!("{:#}", error);
                return Err(error);
            }
        };
        let mut result = Self {
            connection: *connection.connection,
            sql,
            offset: 0,
            statement: CBox::new(ptr::null_mut(), finalize),
            labels: [].into(),
            on_row: false,
            done: true,
            closed: false,
            _connection: PhantomData,
        };
        result.prepare_next()?;
        Ok(result)
    }

    fn error(&self) -> Error {
        unsafe { Error::msg(error_message_from_ptr(&sqlite3_errmsg(self.connection)).to_string()) }
    }

    /// Release the current statement and prepare the next one of the script.
    fn prepare_next(&mut self) -> Result<bool> {
        self.statement = CBox::new(ptr::null_mut(), finalize);
        self.labels = [].into();
        self.on_row = false;
        self.done = true;
        loop {
            let remaining = self.sql.as_bytes().len() - self.offset;
            if remaining == 0 {
                return Ok(false);
            }
            let mut tail: *const c_char = ptr::null();
            unsafe {
                let start = self.sql.as_ptr().add(self.offset);
                let rc = sqlite3_prepare_v2(
                    self.connection,
                    start,
                    remaining as c_int,
                    &mut *self.statement,
                    &mut tail,
                );
                if rc != SQLITE_OK {
                    let error = self.error().context(format!(
                        "While preparing the statement:\n{}",
                        truncate_long!(String::from_utf8_lossy(&self.sql.as_bytes()[self.offset..]))
                    ));
                    log::error!("{:#}", error);
                    self.offset = self.sql.as_bytes().len();
                    return Err(error);
                }
                let consumed = if tail.is_null() {
                    remaining
                } else {
                    tail.offset_from(start) as usize
                };
                if consumed == 0 && self.statement.is_null() {
                    return Ok(false);
                }
                self.offset += consumed;
            }
            // Whitespace and comments produce no statement
            if !self.statement.is_null() {
                break;
            }
        }
        let count = unsafe { sqlite3_column_count(*self.statement) };
        self.labels = (0..count)
            .map(|i| extract_name(*self.statement, i))
            .collect::<Result<_>>()?;
        self.done = false;
        if count == 0 {
            while self.step()? {}
        }
        Ok(true)
    }

    fn step(&mut self) -> Result<bool> {
        loop {
            match unsafe { sqlite3_step(*self.statement) } {
                SQLITE_BUSY => {
                    continue;
                }
                SQLITE_ROW => {
                    return Ok(true);
                }
                SQLITE_DONE => {
                    self.done = true;
                    return Ok(false);
                }
                _ => {
                    self.done = true;
                    let error = self.error();
                    log::error!("{:#}", error);
                    return Err(error);
                }
            }
        }
    }
}

impl Cursor for SqliteCursor<'_> {
    fn advance_record(&mut self) -> Result<bool> {
        if self.closed {
            return Err(CursorError::Closed.into());
        }
        if self.done {
            self.on_row = false;
            return Ok(false);
        }
        self.on_row = self.step()?;
        Ok(self.on_row)
    }
    fn field_count(&self) -> usize {
        self.labels.len()
    }
    fn field_name(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }
    fn value(&self, index: usize) -> Result<Value> {
        if self.closed {
            return Err(CursorError::Closed.into());
        }
        if !self.on_row {
            return Err(CursorError::NoCurrentRecord.into());
        }
        if index >= self.labels.len() {
            return Err(CursorError::IndexOutOfRange {
                index,
                count: self.labels.len(),
            }
            .into());
        }
        extract_value(*self.statement, index as c_int)
            .with_context(|| format!("While reading column {index} `{}`", self.labels[index]))
    }
    fn advance_result_set(&mut self) -> Result<bool> {
        if self.closed {
            return Err(CursorError::Closed.into());
        }
        self.prepare_next()
    }
    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.statement = CBox::new(ptr::null_mut(), finalize);
        self.labels = [].into();
        self.offset = self.sql.as_bytes().len();
        self.on_row = false;
        self.done = true;
        self.closed = true;
        Ok(())
    }
    fn is_closed(&self) -> bool {
        self.closed
    }
}
