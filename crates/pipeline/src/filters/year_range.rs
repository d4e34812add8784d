//! Filter on release year.

use crate::traits::Filter;
use catalog::Movie;

/// Keeps movies released between `min_year` and `max_year`, inclusive.
pub struct YearRangeFilter {
    min_year: u16,
    max_year: u16,
}

impl YearRangeFilter {
    pub fn new(min_year: u16, max_year: u16) -> Self {
        Self { min_year, max_year }
    }
}

impl Filter for YearRangeFilter {
    fn name(&self) -> &str {
        "YearRangeFilter"
    }

    fn matches(&self, movie: &Movie) -> bool {
        (self.min_year..=self.max_year).contains(&movie.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::MovieRow;

    #[test]
    fn test_inclusive_bounds() {
        let filter = YearRangeFilter::new(1990, 1999);
        let year = |y| Movie::from_row(MovieRow::new(1, "X", y, 5.0));

        assert!(filter.matches(&year(1990)));
        assert!(filter.matches(&year(1999)));
        assert!(!filter.matches(&year(1989)));
        assert!(!filter.matches(&year(2000)));
    }

    #[test]
    fn test_inverted_range_matches_nothing() {
        let filter = YearRangeFilter::new(2000, 1990);
        assert!(!filter.matches(&Movie::from_row(MovieRow::new(1, "X", 1995, 5.0))));
    }
}
