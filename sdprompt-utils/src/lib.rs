use rand::{Rng, seq::SliceRandom};

pub const RANDOM_SAMPLE_SIZE: usize = 3;
pub const RANDOM_KEYWORD: &str = "random";
const QUOTE_CHARS: &[char] = &['\'', '"'];

/// Strips quote characters anywhere in the token, then surrounding whitespace.
pub fn clean_entry(input: &str) -> String {
    input.replace(QUOTE_CHARS, "").trim().to_string()
}

/// Splits comma separated freeform text into cleaned, non-empty entries.
pub fn split_entries(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(clean_entry)
        .filter(|entry| !entry.is_empty())
        .collect()
}

/// Resolves one line of selection input against `options`.
///
/// `random` (any case) samples up to [`RANDOM_SAMPLE_SIZE`] distinct options.
/// Otherwise every comma separated token is either a 1-based option number or
/// kept verbatim as a custom entry, in the order typed.
pub fn parse_selection<R, S>(input: &str, options: &[S], rng: &mut R) -> Vec<String>
where
    R: Rng + ?Sized,
    S: AsRef<str>,
{
    let trimmed = input.trim();
    if trimmed.eq_ignore_ascii_case(RANDOM_KEYWORD) {
        return sample_options(options, RANDOM_SAMPLE_SIZE, rng);
    }

    split_entries(trimmed)
        .into_iter()
        .map(|entry| match option_index(&entry, options.len()) {
            Some(index) => options[index].as_ref().to_string(),
            None => entry,
        })
        .collect()
}

/// Uniform sample without replacement of `min(count, options.len())` options.
pub fn sample_options<R, S>(options: &[S], count: usize, rng: &mut R) -> Vec<String>
where
    R: Rng + ?Sized,
    S: AsRef<str>,
{
    options
        .choose_multiple(rng, count.min(options.len()))
        .map(|option| option.as_ref().to_string())
        .collect()
}

/// Parses comma separated 1-based indices, keeping only those in `1..=len`.
///
/// The result is zero-based, deduplicated and ordered highest first so callers
/// can remove entries one by one without shifting the remaining positions.
pub fn parse_indices(input: &str, len: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = input
        .split(',')
        .filter_map(|token| option_index(token.trim(), len))
        .collect();
    indices.sort_unstable_by(|a, b| b.cmp(a));
    indices.dedup();
    indices
}

/// Splits options into display pages of `(1-based number, option)` pairs.
pub fn paginate<S>(options: &[S], page_size: usize) -> Vec<Vec<(usize, &str)>>
where
    S: AsRef<str>,
{
    let page_size = page_size.max(1);
    options
        .chunks(page_size)
        .enumerate()
        .map(|(page, chunk)| {
            chunk
                .iter()
                .enumerate()
                .map(|(offset, option)| (page * page_size + offset + 1, option.as_ref()))
                .collect()
        })
        .collect()
}

/// Maps an all-digit token to a zero-based index when it falls within `1..=len`.
fn option_index(token: &str, len: usize) -> Option<usize> {
    if token.is_empty() || !token.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    match token.parse::<usize>() {
        Ok(number) if (1..=len).contains(&number) => Some(number - 1),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn options(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn clean_entry_strips_quotes_and_whitespace() {
        assert_eq!(clean_entry("  \"oil 'painting'\"  "), "oil painting");
    }

    #[test]
    fn selection_mixes_numbers_and_custom_terms() {
        let mut rng = StdRng::seed_from_u64(7);
        let picked = parse_selection("2, foo, 1", &options(&["a", "b", "c"]), &mut rng);
        assert_eq!(picked, vec!["b", "foo", "a"]);
    }

    #[test]
    fn selection_keeps_out_of_range_numbers_verbatim() {
        let mut rng = StdRng::seed_from_u64(7);
        let picked = parse_selection("0, 4, -1, 2", &options(&["a", "b", "c"]), &mut rng);
        assert_eq!(picked, vec!["0", "4", "-1", "b"]);
    }

    #[test]
    fn selection_drops_empty_tokens() {
        let mut rng = StdRng::seed_from_u64(7);
        let picked = parse_selection(" , 'x',, \"\" ,", &options(&["a"]), &mut rng);
        assert_eq!(picked, vec!["x"]);
        assert!(parse_selection("", &options(&["a"]), &mut rng).is_empty());
    }

    #[test]
    fn random_keyword_samples_three_distinct_options() {
        let mut rng = StdRng::seed_from_u64(42);
        let pool = options(&["a", "b", "c", "d", "e"]);
        let mut picked = parse_selection("  RaNdOm ", &pool, &mut rng);
        assert_eq!(picked.len(), RANDOM_SAMPLE_SIZE);
        assert!(picked.iter().all(|item| pool.contains(item)));
        picked.sort();
        picked.dedup();
        assert_eq!(picked.len(), RANDOM_SAMPLE_SIZE);
    }

    #[test]
    fn random_keyword_caps_at_option_count() {
        let mut rng = StdRng::seed_from_u64(1);
        let picked = parse_selection("random", &options(&["only"]), &mut rng);
        assert_eq!(picked, vec!["only"]);
        let empty: Vec<String> = Vec::new();
        assert!(parse_selection("random", &empty, &mut rng).is_empty());
    }

    #[test]
    fn parse_indices_orders_highest_first_and_ignores_noise() {
        assert_eq!(parse_indices("3,1", 3), vec![2, 0]);
        assert_eq!(parse_indices(" 1 , x, 9, 2, 1", 3), vec![1, 0]);
        assert!(parse_indices("", 3).is_empty());
    }

    #[test]
    fn paginate_numbers_options_across_pages() {
        let pool = options(&["a", "b", "c", "d", "e"]);
        let pages = paginate(&pool, 2);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0], vec![(1, "a"), (2, "b")]);
        assert_eq!(pages[2], vec![(5, "e")]);
    }
}
