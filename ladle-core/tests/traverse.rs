#[cfg(test)]
mod tests {
    use ladle_core::{
        Cursor, CursorError, CursorExt, CursorGuard, Error, Hydrator, MemoryCursor, Result,
        ResultSet, Value,
    };

    #[derive(Default, Debug, PartialEq)]
    struct Pair {
        key: String,
        value: i32,
    }

    impl Hydrator for Pair {
        fn populate_self<C: Cursor + ?Sized>(
            &mut self,
            cursor: &mut C,
            manage_cursor: bool,
        ) -> Result<()> {
            let cursor = CursorGuard::new(cursor, manage_cursor);
            self.key = cursor.get("key")?;
            self.value = cursor.get("value")?;
            Ok(())
        }
    }

    fn pairs() -> MemoryCursor {
        MemoryCursor::new([ResultSet::new(["key", "value"])
            .with_row(["a".into(), 1.into()])
            .with_row(["b".into(), 2.into()])])
    }

    /// Fails when advancing past the first record.
    #[derive(Debug)]
    struct Flaky {
        inner: MemoryCursor,
        advances: usize,
    }

    impl Cursor for Flaky {
        fn advance_record(&mut self) -> Result<bool> {
            self.advances += 1;
            if self.advances > 1 {
                return Err(Error::msg("Connection lost"));
            }
            self.inner.advance_record()
        }
        fn field_count(&self) -> usize {
            self.inner.field_count()
        }
        fn field_name(&self, index: usize) -> Option<&str> {
            self.inner.field_name(index)
        }
        fn value(&self, index: usize) -> Result<Value> {
            self.inner.value(index)
        }
        fn close(&mut self) -> Result<()> {
            self.inner.close()
        }
        fn is_closed(&self) -> bool {
            self.inner.is_closed()
        }
    }

    #[test]
    fn traverse_cursor_failure_propagates() {
        let mut cursor = Flaky {
            inner: pairs(),
            advances: 0,
        };
        let error = cursor
            .fill_collection::<Pair>(true)
            .expect_err("The second advance fails");
        assert_eq!(error.to_string(), "Connection lost");
        assert!(cursor.is_closed());

        let mut cursor = Flaky {
            inner: pairs(),
            advances: 0,
        };
        let mut calls = 0;
        cursor
            .for_each_record(false, |_| {
                calls += 1;
                Ok(())
            })
            .expect_err("The second advance fails");
        assert_eq!(calls, 1);
        assert!(cursor.is_closed());
    }

    #[test]
    fn traverse_fill_object_advance_failure() {
        let mut cursor = Flaky {
            inner: pairs(),
            advances: 0,
        };
        let first = cursor
            .fill_object::<Pair>(false, true)
            .expect("The first advance succeeds");
        assert_eq!(first.map(|v| v.value), Some(1));
        let error = cursor
            .fill_object::<Pair>(false, true)
            .expect_err("The second advance fails");
        assert_eq!(error.to_string(), "Connection lost");
        assert!(!cursor.is_closed());
        let error = cursor
            .fill_object::<Pair>(true, true)
            .expect_err("The third advance fails");
        assert_eq!(error.to_string(), "Connection lost");
        assert!(cursor.is_closed());
    }

    #[test]
    fn traverse_default_result_set_advance() {
        let mut cursor = Flaky {
            inner: pairs(),
            advances: 0,
        };
        assert!(matches!(
            cursor
                .advance_result_set()
                .unwrap_err()
                .downcast_ref::<CursorError>(),
            Some(CursorError::Unsupported)
        ));
        cursor.next_result_safely().close_safely();
        assert!(cursor.is_closed());
    }

    #[test]
    fn traverse_trait_objects() {
        let mut cursor: Box<dyn Cursor> = Box::new(pairs());
        let first = cursor
            .fill_object::<Pair>(false, true)
            .expect("Failed to fill the first pair");
        assert_eq!(
            first,
            Some(Pair {
                key: "a".into(),
                value: 1
            })
        );
        let rest = (&mut *cursor)
            .fill_collection::<Pair>(true)
            .expect("Failed to fill the remaining pairs");
        assert_eq!(rest.len(), 1);
        assert!(cursor.is_closed());
    }

    #[test]
    fn traverse_field_lookup() {
        let mut cursor = MemoryCursor::new([ResultSet::new(["Name", "name", "AGE"])
            .with_row(["upper".into(), "lower".into(), 30.into()])]);
        assert_eq!(cursor.field_index("name"), Some(1));
        assert_eq!(cursor.field_index("Name"), Some(0));
        assert_eq!(cursor.field_index("NAME"), Some(0));
        assert_eq!(cursor.field_index("age"), Some(2));
        assert!(cursor.get::<String>("name").is_err());
        assert!(cursor.advance_record().unwrap());
        assert_eq!(cursor.get::<String>("name").unwrap(), "lower");
        assert_eq!(cursor.get::<u8>("age").unwrap(), 30);
        assert!(matches!(
            cursor
                .get::<u8>("height")
                .unwrap_err()
                .downcast_ref::<CursorError>(),
            Some(CursorError::ColumnNotFound(..))
        ));
        let row = cursor.current_row().unwrap();
        assert_eq!(row.get_column("AGE"), Some(&Value::Int32(Some(30))));
    }
}
