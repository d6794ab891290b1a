mod fill;
mod guards;
mod probe;
mod results;
mod walk;

pub use probe::*;

use crate::{fill::fill, guards::guards, results::results, walk::walk};
use ladle::{Cursor, Hydrator, ResultSet, Result, Value};
use log::LevelFilter;
use std::env;

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

/// Ordered list of result sets a backend must reproduce as a cursor.
///
/// A set without labels stands for a statement that does not produce rows.
#[derive(Debug, Clone, Default)]
pub struct Script {
    sets: Vec<ResultSet>,
}

impl Script {
    pub fn new(sets: impl IntoIterator<Item = ResultSet>) -> Self {
        Self {
            sets: sets.into_iter().collect(),
        }
    }
    pub fn sets(&self) -> &[ResultSet] {
        &self.sets
    }
}

/// Turns a [`Script`] into a cursor of the backend under test.
pub trait Opener {
    type Cursor<'s>: Cursor
    where
        Self: 's;

    /// Cursor positioned before the first record of the first set of `script`.
    fn open(&mut self, script: &Script) -> Result<Self::Cursor<'_>>;
}

#[derive(Hydrator, Default, Debug, Clone, PartialEq)]
pub struct Letter {
    pub id: i64,
    pub name: String,
}

impl Letter {
    pub fn new(id: i64, name: &str) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Result set of [`Letter`] records.
pub fn letters(rows: &[(i64, &str)]) -> ResultSet {
    rows.iter().fold(ResultSet::new(["id", "name"]), |set, (id, name)| {
        set.with_row([Value::Int64(Some(*id)), Value::Varchar(Some((*name).into()))])
    })
}

pub(crate) fn open<'o, O: Opener>(opener: &'o mut O, script: &Script) -> ProbeCursor<O::Cursor<'o>> {
    ProbeCursor::new(opener.open(script).expect("Could not open the cursor"))
}

pub fn execute_tests<O: Opener>(opener: &mut O) {
    fill(opener);
    walk(opener);
    results(opener);
    guards(opener);
}

#[macro_export]
macro_rules! silent_logs {
    ($($code:tt)+) => {{
        let level = log::max_level();
        log::set_max_level(log::LevelFilter::Off);
        $($code)+
        log::set_max_level(level);
    }};
}
