use crate::{Cursor, CursorGuard, Result};
use std::iter;

/// A record type that can populate itself from the current record of a
/// [`Cursor`].
///
/// Implement it by hand or with `#[derive(Hydrator)]` from the `ladle` crate.
///
/// # Cursor management
/// Both methods receive a `manage_cursor` flag. When it is `true` the
/// implementation must close the cursor before returning, on success and on
/// failure alike; when it is `false` the cursor must be left open. Wrapping the
/// cursor in a [`CursorGuard`] takes care of both cases:
/// `let cursor = CursorGuard::new(cursor, manage_cursor);`.
pub trait Hydrator {
    /// Populate `self` from the current record.
    ///
    /// The cursor must already be positioned on a record, this method does not
    /// advance it.
    fn populate_self<C: Cursor + ?Sized>(&mut self, cursor: &mut C, manage_cursor: bool)
    -> Result<()>;

    /// Append one populated instance per remaining record of the current result
    /// set to `target`, in cursor order.
    fn populate_into<C, E>(cursor: &mut C, manage_cursor: bool, target: &mut E) -> Result<()>
    where
        Self: Sized + Default,
        C: Cursor + ?Sized,
        E: Extend<Self>,
    {
        let mut cursor = CursorGuard::new(cursor, manage_cursor);
        while cursor.advance_record()? {
            let mut item = Self::default();
            item.populate_self(&mut *cursor, false)?;
            target.extend(iter::once(item));
        }
        Ok(())
    }
}
