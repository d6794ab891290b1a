use crate::{Cursor, CursorExt};
use std::ops::{Deref, DerefMut};

/// Scoped borrow of a cursor that closes it when dropped.
///
/// The cursor is closed with [`CursorExt::close_safely`] when the guard goes
/// out of scope with its close flag set, which also happens while a panic
/// unwinds. The flag can be changed during the scope.
///
/// ```rust
/// use ladle_core::{Cursor, CursorGuard, Hydrator, Result};
///
/// #[derive(Default)]
/// struct Tag {
///     name: String,
/// }
///
/// impl Hydrator for Tag {
///     fn populate_self<C: Cursor + ?Sized>(&mut self, cursor: &mut C, manage_cursor: bool) -> Result<()> {
///         let cursor = CursorGuard::new(cursor, manage_cursor);
///         self.name = ladle_core::CursorExt::get(&*cursor, "name")?;
///         Ok(())
///     }
/// }
/// ```
pub struct CursorGuard<'c, C: Cursor + ?Sized> {
    cursor: &'c mut C,
    close: bool,
}

impl<'c, C: Cursor + ?Sized> CursorGuard<'c, C> {
    pub fn new(cursor: &'c mut C, close: bool) -> Self {
        Self { cursor, close }
    }
    pub fn set_close(&mut self, close: bool) {
        self.close = close;
    }
    pub fn will_close(&self) -> bool {
        self.close
    }
}

impl<C: Cursor + ?Sized> Deref for CursorGuard<'_, C> {
    type Target = C;

    fn deref(&self) -> &Self::Target {
        self.cursor
    }
}

impl<C: Cursor + ?Sized> DerefMut for CursorGuard<'_, C> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.cursor
    }
}

impl<C: Cursor + ?Sized> Drop for CursorGuard<'_, C> {
    fn drop(&mut self) {
        if self.close {
            self.cursor.close_safely();
        }
    }
}
