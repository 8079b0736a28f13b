//! Approximate text search.
//!
//! A term matches a field when some substring of the field is within a small
//! edit distance of the term. Scores are `errors / term_length` plus a
//! penalty for matching far from the start of the field; lower is better and
//! anything above the threshold is not a match.

/// Tuning for [`FuzzyMatcher`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOptions {
    /// Highest accepted score, between 0 (exact) and 1 (anything).
    pub threshold: f64,
    /// How many characters into a field a match may start before the
    /// position penalty alone reaches 1.0.
    pub distance: f64,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            threshold: 0.3,
            distance: 100.0,
        }
    }
}

/// Scores fields against one search term.
#[derive(Debug, Clone)]
pub struct FuzzyMatcher {
    pattern: Vec<char>,
    options: SearchOptions,
}

impl FuzzyMatcher {
    /// Returns `None` for a blank term, which disables the search.
    pub fn new(term: &str, options: SearchOptions) -> Option<Self> {
        let term = term.trim();
        if term.is_empty() {
            return None;
        }
        Some(Self {
            pattern: term.to_lowercase().chars().collect(),
            options,
        })
    }

    /// Score of the best match in `text`, or `None` if it is over the threshold.
    pub fn score(&self, text: &str) -> Option<f64> {
        let text: Vec<char> = text.to_lowercase().chars().collect();
        let m = self.pattern.len();

        // column[i] = (edits, start) of the best alignment of pattern[..i]
        // ending at the current text position.
        let mut column: Vec<(usize, usize)> = (0..=m).map(|i| (i, 0)).collect();
        let mut best = self.combine(column[m]);

        for (j, &c) in text.iter().enumerate() {
            let mut next = vec![(0, j + 1); m + 1];
            for i in 1..=m {
                let substitution = usize::from(self.pattern[i - 1] != c);
                let diagonal = (column[i - 1].0 + substitution, column[i - 1].1);
                let skip_pattern = (next[i - 1].0 + 1, next[i - 1].1);
                let skip_text = (column[i].0 + 1, column[i].1);
                next[i] = [diagonal, skip_pattern, skip_text]
                    .into_iter()
                    .min()
                    .unwrap_or(diagonal);
            }
            column = next;
            best = best.min(self.combine(column[m]));
        }

        (best <= self.options.threshold).then_some(best)
    }

    /// Best score over several fields.
    pub fn best_score<'a>(&self, fields: impl IntoIterator<Item = &'a str>) -> Option<f64> {
        fields
            .into_iter()
            .filter_map(|field| self.score(field))
            .min_by(f64::total_cmp)
    }

    fn combine(&self, (edits, start): (usize, usize)) -> f64 {
        let accuracy = edits as f64 / self.pattern.len() as f64;
        let proximity = if self.options.distance > 0.0 {
            start as f64 / self.options.distance
        } else if start == 0 {
            0.0
        } else {
            1.0
        };
        accuracy + proximity
    }
}

/// Keeps the items matching `term`, best matches first.
///
/// A blank term returns the input unchanged. Items with equal scores keep
/// their input order.
pub fn rank<'a, T>(
    items: Vec<&'a T>,
    term: &str,
    options: SearchOptions,
    fields: impl Fn(&'a T) -> Vec<&'a str>,
) -> Vec<&'a T> {
    let Some(matcher) = FuzzyMatcher::new(term, options) else {
        return items;
    };

    let mut scored: Vec<(f64, &'a T)> = items
        .into_iter()
        .filter_map(|item| matcher.best_score(fields(item)).map(|score| (score, item)))
        .collect();
    scored.sort_by(|(a, _), (b, _)| a.total_cmp(b));
    scored.into_iter().map(|(_, item)| item).collect()
}
