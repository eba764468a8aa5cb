/// Returns `true` when `a` can be turned into `b` with exactly one edit:
/// a single insertion, deletion, substitution or swap of two neighbouring
/// characters.
///
/// # Example
/// ```
/// use ka::util::text::one_edit_apart;
///
/// assert!(one_edit_apart("sqrt", "sqr"));
/// assert!(one_edit_apart("sin", "sine"));
/// assert!(one_edit_apart("cos", "cis"));
/// assert!(one_edit_apart("exp", "epx"));
/// assert!(!one_edit_apart("exp", "exp"));
/// assert!(!one_edit_apart("log", "gol"));
/// ```
#[must_use]
pub fn one_edit_apart(a: &str, b: &str) -> bool {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a == b {
        return false;
    }

    match a.len().abs_diff(b.len()) {
        0 => {
            let differing: Vec<usize> = (0..a.len()).filter(|&i| a[i] != b[i]).collect();
            match differing.as_slice() {
                [_] => true,
                [i, j] => *j == i + 1 && a[*i] == b[*j] && a[*j] == b[*i],
                _ => false,
            }
        },
        1 => {
            let (short, long) = if a.len() < b.len() { (&a, &b) } else { (&b, &a) };
            let split = short.iter().zip(long.iter()).take_while(|(x, y)| x == y).count();
            short[split..] == long[split + 1..]
        },
        _ => false,
    }
}

/// Collects every candidate one edit away from `name`, sorted and deduplicated.
pub fn close_matches<'a, I>(name: &str, candidates: I) -> Vec<String>
    where I: IntoIterator<Item = &'a str>
{
    let mut matches: Vec<String> = candidates.into_iter()
                                             .filter(|candidate| one_edit_apart(name, candidate))
                                             .map(str::to_string)
                                             .collect();
    matches.sort();
    matches.dedup();
    matches
}
