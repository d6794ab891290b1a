/// Splits off the longest prefix of `input` whose chars satisfy `predicate`.
pub fn consume_while<'s>(input: &mut &'s str, predicate: impl FnMut(&char) -> bool) -> &'s str {
    let len = input
        .chars()
        .take_while(predicate)
        .map(char::len_utf8)
        .sum::<usize>();
    if len == 0 {
        return "";
    }
    let result = &input[..len];
    *input = &input[len..];
    result
}

/// Longest prefix of `text` not exceeding `max` bytes that ends on a char boundary.
pub fn truncated(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

#[macro_export]
macro_rules! truncate_long {
    ($text:expr) => {
        format_args!(
            "{}{}",
            $crate::truncated(&$text, 497).trim_end(),
            if $text.len() > 497 { "..." } else { "" },
        )
    };
}

#[cfg(test)]
mod tests {
    use super::{consume_while, truncated};

    #[test]
    fn consume_while_splits_prefix() {
        let mut input = "123abc";
        assert_eq!(consume_while(&mut input, char::is_ascii_digit), "123");
        assert_eq!(input, "abc");
        assert_eq!(consume_while(&mut input, char::is_ascii_digit), "");
        assert_eq!(input, "abc");
        let mut input = "ééx";
        assert_eq!(consume_while(&mut input, |c| *c == 'é'), "éé");
        assert_eq!(input, "x");
    }

    #[test]
    fn truncated_respects_char_boundaries() {
        assert_eq!(truncated("hello", 10), "hello");
        assert_eq!(truncated("hello", 3), "hel");
        assert_eq!(truncated("aé", 2), "a");
    }
}
