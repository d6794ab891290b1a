use crate::{Letter, Opener, Script, letters, open};
use ladle::{Cursor, CursorExt, CursorGuard};

pub fn guards<O: Opener>(opener: &mut O) {
    let abc = Script::new([letters(&[(1, "a"), (2, "b"), (3, "c")])]);

    // Closing twice
    {
        let mut cursor = open(opener, &abc);
        cursor.close_safely();
        assert!(cursor.is_closed());
        cursor.close_safely();
        assert!(cursor.is_closed());
        assert_eq!(cursor.closes(), 1);
        cursor.close().expect("Closing a closed cursor must succeed");
    }

    // Close failures are swallowed
    {
        let mut cursor = open(opener, &abc).failing_close();
        cursor.close_safely();
        assert!(cursor.is_closed());
        assert_eq!(cursor.closes(), 1);
    }
    {
        let mut cursor = open(opener, &abc).failing_close();
        let letters = cursor
            .fill_collection::<Letter>(true)
            .expect("A failure while closing must not be reported");
        assert_eq!(letters.len(), 3);
        assert_eq!(cursor.closes(), 1);
    }

    // Moving past the last result set, or on a cursor that does not support it
    {
        let mut cursor = open(opener, &abc);
        let same: *const _ = cursor.next_result_safely();
        assert_eq!(same, &cursor as *const _);
        cursor.next_result_safely().next_result_safely();
        let mut calls = 0;
        cursor
            .for_each_record(true, |_| {
                calls += 1;
                Ok(())
            })
            .expect("Walking an exhausted cursor must succeed");
        assert_eq!(calls, 0);
    }
    {
        let mut cursor = open(opener, &abc).single_result();
        cursor.next_result_safely().next_result_safely();
        assert_eq!(cursor.result_set_advances(), 2);
        assert!(!cursor.is_closed());
        cursor.close_safely();
        cursor.next_result_safely();
    }

    // Guards close on drop unless told otherwise
    {
        let mut cursor = open(opener, &abc);
        {
            let mut guard = CursorGuard::new(&mut cursor, true);
            assert!(guard.will_close());
            assert!(guard.advance_record().expect("Failed to advance"));
            guard.set_close(false);
        }
        assert!(!cursor.is_closed());
        {
            let guard = CursorGuard::new(&mut cursor, true);
            let id: i64 = guard.get("id").expect("Failed to read the id");
            assert_eq!(id, 1);
        }
        assert!(cursor.is_closed());
        assert_eq!(cursor.closes(), 1);
    }

    // Field helpers
    {
        let mut cursor = open(opener, &abc);
        assert_eq!(cursor.field_count(), 2);
        assert_eq!(cursor.field_index("name"), Some(1));
        assert_eq!(cursor.field_index("NAME"), Some(1));
        assert_eq!(cursor.field_index("missing"), None);
        assert!(cursor.advance_record().expect("Failed to advance"));
        let row = cursor.current_row().expect("Failed to read the row");
        assert_eq!(row.names(), ["id", "name"]);
        assert_eq!(row.get::<String>("name").expect("Failed to read the name"), "a");
        assert!(cursor.get_index::<i64>(5).is_err());
        cursor.close_safely();
    }
}
