use crate::{Letter, Opener, Script, letters, open};
use ladle::{Cursor, CursorExt, Error, Hydrator, ResultSet};
use std::panic::{AssertUnwindSafe, catch_unwind};

pub fn walk<O: Opener>(opener: &mut O) {
    let abc = Script::new([letters(&[(1, "a"), (2, "b"), (3, "c")])]);
    let empty = Script::new([letters(&[])]);

    // Zero records, the callback is never invoked whatever the flag
    for close in [false, true] {
        let mut cursor = open(opener, &empty);
        let mut calls = 0;
        cursor
            .for_each_record(close, |_| {
                calls += 1;
                Ok(())
            })
            .expect("Walking an empty result set must succeed");
        assert_eq!(calls, 0);
        assert_eq!(cursor.closes(), close as usize);
        cursor.close_safely();
    }

    // Every record in order
    {
        let mut cursor = open(opener, &abc);
        let mut names = Vec::new();
        cursor
            .for_each_record(true, |c| {
                let mut letter = Letter::default();
                letter.populate_self(c, false)?;
                names.push(letter.name);
                Ok(())
            })
            .expect("Failed to walk the letters");
        assert_eq!(names, ["a", "b", "c"]);
        assert_eq!(cursor.closes(), 1);
    }

    // Keep the cursor open after a successful walk
    {
        let mut cursor = open(opener, &abc);
        let mut ids = Vec::<i64>::new();
        cursor
            .for_each_record(false, |c| Ok(ids.push(c.get("id")?)))
            .expect("Failed to walk the letters");
        assert_eq!(ids, [1, 2, 3]);
        assert_eq!(cursor.closes(), 0);
        assert!(!cursor.is_closed());
        cursor
            .for_each_record(false, |_| panic!("The result set is exhausted"))
            .expect("Walking an exhausted result set must succeed")
            .close_safely();
        assert_eq!(cursor.closes(), 1);
    }

    // Callback failing on the second of three records
    for close in [false, true] {
        let mut cursor = open(opener, &abc);
        let mut visited = Vec::<i64>::new();
        let Err(error) = cursor.for_each_record(close, |c| {
            let id = c.get("id")?;
            visited.push(id);
            if id == 2 {
                return Err(Error::msg("Stop at 2"));
            }
            Ok(())
        }) else {
            panic!("The callback must fail on the second record");
        };
        assert_eq!(error.to_string(), "Stop at 2");
        assert_eq!(visited, [1, 2]);
        assert!(cursor.is_closed());
        assert_eq!(cursor.closes(), 1);
    }

    // A panic escaping the callback closes the cursor
    {
        let mut cursor = open(opener, &abc);
        let result = catch_unwind(AssertUnwindSafe(|| {
            let _ = cursor.for_each_record(false, |c| {
                let id: i64 = c.get("id")?;
                if id == 2 {
                    panic!("Unexpected letter");
                }
                Ok(())
            });
        }));
        assert!(result.is_err());
        assert!(cursor.is_closed());
        assert_eq!(cursor.closes(), 1);
    }

    // The empty result guard only looks at the columns
    {
        let mut cursor = open(opener, &abc);
        let mut called = false;
        cursor.no_record(|| called = true);
        assert!(!called);
        assert_eq!(cursor.record_advances(), 0);
        cursor.close_safely();
    }
    {
        let mut cursor = open(opener, &Script::new([ResultSet::without_columns()]));
        let mut called = false;
        cursor.no_record(|| called = true).close_safely();
        assert!(called);
        assert_eq!(cursor.record_advances(), 0);
        assert_eq!(cursor.closes(), 1);
    }
    {
        // Columns but no rows is still a result set
        let mut cursor = open(opener, &empty);
        let mut called = false;
        cursor.no_record(|| called = true).close_safely();
        assert!(!called);
        assert_eq!(cursor.record_advances(), 0);
    }
}
