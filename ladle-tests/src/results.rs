use crate::{Opener, Script, letters, open};
use ladle::CursorExt;
#[cfg(not(feature = "disable-multiple-results"))]
use ladle::{CursorError, Error};
#[cfg(all(
    not(feature = "disable-multiple-results"),
    not(feature = "disable-result-set-advance")
))]
use {
    crate::Letter,
    ladle::{Cursor, ResultSet},
};

pub fn results<O: Opener>(opener: &mut O) {
    // No callbacks at all, the cursor is still closed
    {
        let mut cursor = open(opener, &Script::new([letters(&[(1, "a")])]));
        cursor
            .for_each_result(&mut [])
            .expect("Walking no result sets must succeed");
        assert_eq!(cursor.closes(), 1);
        assert_eq!(cursor.record_advances(), 0);
    }

    // Single result set
    {
        let mut cursor = open(opener, &Script::new([letters(&[(1, "a"), (2, "b")])]));
        let mut ids = Vec::<i64>::new();
        cursor
            .for_each_result(&mut [&mut |c| Ok(ids.push(c.get("id")?))])
            .expect("Failed to walk the result set");
        assert_eq!(ids, [1, 2]);
        assert_eq!(cursor.closes(), 1);
    }

    #[cfg(not(feature = "disable-multiple-results"))]
    multiple_results(opener);
}

#[cfg(not(feature = "disable-multiple-results"))]
fn multiple_results<O: Opener>(opener: &mut O) {
    let two_three = Script::new([
        letters(&[(1, "a"), (2, "b")]),
        letters(&[(3, "c"), (4, "d"), (5, "e")]),
    ]);

    #[cfg(not(feature = "disable-result-set-advance"))]
    {
        // One callback per result set
        let mut cursor = open(opener, &two_three);
        let (mut first, mut second) = (0, 0);
        cursor
            .for_each_result(&mut [
                &mut |_| {
                    first += 1;
                    Ok(())
                },
                &mut |_| {
                    second += 1;
                    Ok(())
                },
            ])
            .expect("Failed to walk the result sets");
        assert_eq!((first, second), (2, 3));
        assert!(cursor.is_closed());
        assert_eq!(cursor.closes(), 1);
    }

    #[cfg(not(feature = "disable-result-set-advance"))]
    {
        // Fewer callbacks than result sets, the rest is discarded
        let mut cursor = open(opener, &two_three);
        let mut found = Vec::<Letter>::new();
        cursor
            .for_each_result(&mut [&mut |c| {
                Ok(found.extend(c.fill_object::<Letter>(false, false)?))
            }])
            .expect("Failed to walk the first result set");
        assert_eq!(found, [Letter::new(1, "a"), Letter::new(2, "b")]);
        assert_eq!(cursor.closes(), 1);
    }

    #[cfg(not(feature = "disable-result-set-advance"))]
    {
        // Statements without rows take a callback that is never invoked
        let mut cursor = open(
            opener,
            &Script::new([
                ResultSet::without_columns(),
                letters(&[(1, "a")]),
            ]),
        );
        let mut no_rows = 0;
        let mut names = Vec::<String>::new();
        cursor
            .for_each_result(&mut [
                &mut |_| {
                    no_rows += 1;
                    Ok(())
                },
                &mut |c| Ok(names.push(c.get("name")?)),
            ])
            .expect("Failed to walk the result sets");
        assert_eq!(no_rows, 0);
        assert_eq!(names, ["a"]);
    }

    #[cfg(not(feature = "disable-result-set-advance"))]
    {
        // More callbacks than result sets
        let mut cursor = open(opener, &two_three);
        let mut calls = [0; 3];
        let [first, second, third] = &mut calls;
        let error = cursor
            .for_each_result(&mut [
                &mut |_| Ok(*first += 1),
                &mut |_| Ok(*second += 1),
                &mut |_| Ok(*third += 1),
            ])
            .expect_err("Only two result sets are available");
        assert_eq!(
            error.downcast_ref::<CursorError>(),
            Some(&CursorError::ResultSetMismatch {
                declared: 3,
                available: 2
            })
        );
        assert_eq!(calls, [2, 3, 0]);
        assert!(cursor.is_closed());
        assert_eq!(cursor.closes(), 1);
    }

    {
        // A cursor unable to move between result sets
        let mut cursor = open(opener, &two_three).single_result();
        let mut calls = 0;
        let error = cursor
            .for_each_result(&mut [
                &mut |_| {
                    calls += 1;
                    Ok(())
                },
                &mut |_| panic!("The second result set cannot be reached"),
            ])
            .expect_err("The second result set cannot be reached");
        assert!(matches!(
            error.downcast_ref::<CursorError>(),
            Some(CursorError::ResultSetMismatch {
                declared: 2,
                available: 1
            })
        ));
        assert_eq!(calls, 2);
        assert_eq!(cursor.result_set_advances(), 1);
        assert_eq!(cursor.closes(), 1);
    }

    {
        // A failing callback stops the walk
        let mut cursor = open(opener, &two_three);
        let mut visited = 0;
        let error = cursor
            .for_each_result(&mut [
                &mut |_| {
                    visited += 1;
                    Err(Error::msg("First set rejected"))
                },
                &mut |_| panic!("The walk must stop at the first failure"),
            ])
            .expect_err("The first callback fails");
        assert_eq!(error.to_string(), "First set rejected");
        assert_eq!(visited, 1);
        assert_eq!(cursor.result_set_advances(), 0);
        assert_eq!(cursor.closes(), 1);
    }

    #[cfg(not(feature = "disable-result-set-advance"))]
    {
        // Chaining single set walks by hand
        let mut cursor = open(opener, &two_three);
        let mut ids = Vec::<i64>::new();
        cursor
            .for_each_record(false, |c| Ok(ids.push(c.get("id")?)))
            .expect("Failed to walk the first result set")
            .next_result_safely()
            .for_each_record(true, |c| Ok(ids.push(c.get("id")?)))
            .expect("Failed to walk the second result set");
        assert_eq!(ids, [1, 2, 3, 4, 5]);
        assert_eq!(cursor.closes(), 1);
    }
}
