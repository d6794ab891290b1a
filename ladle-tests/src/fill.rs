use crate::{Letter, Opener, Script, letters, open};
use ladle::{Cursor, CursorExt, CursorGuard, Error, Hydrator, Result};

/// Fails on the record with id 2.
#[derive(Default, Debug)]
struct Picky {
    id: i64,
}

impl Hydrator for Picky {
    fn populate_self<C: Cursor + ?Sized>(&mut self, cursor: &mut C, manage_cursor: bool) -> Result<()> {
        let cursor = CursorGuard::new(cursor, manage_cursor);
        self.id = cursor.get("id")?;
        if self.id == 2 {
            return Err(Error::msg("Picky does not like the number 2"));
        }
        Ok(())
    }
}

pub fn fill<O: Opener>(opener: &mut O) {
    let abc = Script::new([letters(&[(1, "a"), (2, "b"), (3, "c")])]);
    let empty = Script::new([letters(&[])]);

    // Collection closing on completion
    {
        let mut cursor = open(opener, &abc);
        let result = cursor
            .fill_collection::<Letter>(true)
            .expect("Failed to fill the letters");
        assert_eq!(
            result,
            [Letter::new(1, "a"), Letter::new(2, "b"), Letter::new(3, "c")]
        );
        assert_eq!(cursor.closes(), 1);
        assert!(cursor.is_closed());
    }

    // Collection keeping the cursor open, the second fill finds nothing
    {
        let mut cursor = open(opener, &abc);
        let first = cursor
            .fill_collection::<Letter>(false)
            .expect("Failed to fill the letters");
        assert_eq!(first.len(), 3);
        assert_eq!(cursor.closes(), 0);
        assert!(!cursor.is_closed());
        let second = cursor
            .fill_collection::<Letter>(false)
            .expect("Failed to fill the letters a second time");
        assert!(second.is_empty());
        cursor.close_safely();
        assert_eq!(cursor.closes(), 1);
    }

    // Appending to an existing collection
    {
        let mut cursor = open(opener, &abc);
        let mut target = vec![Letter::new(0, "z")];
        cursor
            .fill_collection_into::<Letter, _>(&mut target)
            .expect("Failed to append the letters")
            .close_safely();
        assert_eq!(
            target.iter().map(|v| v.id).collect::<Vec<_>>(),
            [0, 1, 2, 3]
        );
        assert_eq!(cursor.closes(), 1);
    }

    // Zero records
    {
        let mut cursor = open(opener, &empty);
        let result = cursor
            .fill_collection::<Letter>(true)
            .expect("Failed to fill from an empty result set");
        assert!(result.is_empty());
        assert_eq!(cursor.closes(), 1);
    }

    // Single objects
    {
        let mut cursor = open(opener, &Script::new([letters(&[(7, "g"), (8, "h")])]));
        let first = cursor
            .fill_object::<Letter>(false, true)
            .expect("Failed to fill the first letter");
        assert_eq!(first, Some(Letter::new(7, "g")));
        assert_eq!(cursor.record_advances(), 1);
        assert!(!cursor.is_closed());

        let mut target = None;
        cursor
            .fill_object_into::<Letter>(&mut target)
            .expect("Failed to fill the second letter")
            .fill_object_into::<Letter>(&mut target)
            .expect("Failed to fill from the exhausted cursor");
        assert_eq!(target, Some(Letter::new(8, "h")));
        assert!(!cursor.is_closed());

        let missing = cursor
            .fill_object::<Letter>(true, true)
            .expect("Failed to fill from the exhausted cursor");
        assert_eq!(missing, None);
        assert_eq!(cursor.closes(), 0);
        cursor.close_safely();
    }

    // Single object from an already positioned cursor
    {
        let mut cursor = open(opener, &abc);
        assert!(cursor.advance_record().expect("Failed to advance"));
        let letter = cursor
            .fill_object::<Letter>(true, false)
            .expect("Failed to fill the letter");
        assert_eq!(letter, Some(Letter::new(1, "a")));
        assert_eq!(cursor.record_advances(), 1);
        assert_eq!(cursor.closes(), 1);
    }

    // Materializer failure closes exactly once and the following records are not visited
    {
        let mut cursor = open(opener, &abc);
        let error = cursor
            .fill_collection::<Picky>(true)
            .expect_err("Picky must fail on the second record");
        assert!(format!("{error:#}").contains("number 2"));
        assert_eq!(cursor.closes(), 1);
        assert_eq!(cursor.record_advances(), 2);
    }

    // Materializer failure without closing
    {
        let mut cursor = open(opener, &abc);
        cursor
            .fill_collection::<Picky>(false)
            .expect_err("Picky must fail on the second record");
        assert_eq!(cursor.closes(), 0);
        assert!(!cursor.is_closed());
        cursor.close_safely();
    }

    // Single object failure
    {
        let mut cursor = open(opener, &Script::new([letters(&[(2, "b")])]));
        cursor
            .fill_object::<Picky>(true, true)
            .expect_err("Picky must fail on the only record");
        assert_eq!(cursor.closes(), 1);
    }
}
