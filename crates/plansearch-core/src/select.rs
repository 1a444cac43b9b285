/// Return the first item with the highest score.
///
/// A later item only replaces the current best when it scores strictly higher,
/// so ties resolve to the earliest item. NaN scores never replace a best item.
pub(crate) fn first_max_by<T, I, F>(items: I, mut score: F) -> Option<(T, f64)>
where
    I: IntoIterator<Item = T>,
    F: FnMut(&T) -> f64,
{
    let mut best: Option<(T, f64)> = None;

    for item in items {
        let candidate = score(&item);
        let replace = match &best {
            None => true,
            Some((_, current)) => candidate > *current,
        };
        if replace {
            best = Some((item, candidate));
        }
    }

    best
}
