//! # Catalog Query Engine
//!
//! Derives the visible, ordered course list from the full catalog and the
//! catalog page's filter/sort controls.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  &[Course] ──► search ∧ category ∧ level ∧ price ──► stable sort ──►   │
//! │  (catalog)         (all four must pass)              (by SortKey)      │
//! │                                                                         │
//! │                                              ──► Vec<&Course>           │
//! │                                                  (borrowed, new order)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The result borrows from the input slice, so the catalog is never cloned
//! and cannot be mutated by a query. Re-run it on every parameter change.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::Course;
use crate::{ALL, DEFAULT_MAX_PRICE_DOLLARS};

// =============================================================================
// Query Parameters
// =============================================================================

/// An exact-match filter with an "everything" option.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    /// Maps a UI parameter to a selection; the `"All"` sentinel means no filter.
    pub fn from_param(param: &str) -> Self {
        if param == ALL {
            Selection::All
        } else {
            Selection::Only(param.to_string())
        }
    }

    /// Whether `value` passes this filter.
    #[inline]
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => wanted == value,
        }
    }

    /// Returns the parameter string this selection came from.
    pub fn as_param(&self) -> &str {
        match self {
            Selection::All => ALL,
            Selection::Only(value) => value,
        }
    }
}

/// Result ordering of the catalog page.
///
/// Unknown keys deserialize to [`SortKey::Popular`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum SortKey {
    /// Most students first.
    #[default]
    Popular,
    /// Highest rating first.
    Rating,
    /// Cheapest first.
    PriceLow,
    /// Most expensive first.
    PriceHigh,
    /// Most recently updated first.
    Newest,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::Popular,
        SortKey::Rating,
        SortKey::PriceLow,
        SortKey::PriceHigh,
        SortKey::Newest,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            SortKey::Popular => "popular",
            SortKey::Rating => "rating",
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
            SortKey::Newest => "newest",
        }
    }

    /// Parses a sort key, falling back to `Popular` for anything unknown.
    pub fn from_param(param: &str) -> Self {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == param)
            .unwrap_or_default()
    }

    /// Orders two courses for this key. Equal courses keep catalog order
    /// because the caller uses a stable sort.
    fn compare(&self, a: &Course, b: &Course) -> Ordering {
        match self {
            SortKey::Popular => b.students.cmp(&a.students),
            SortKey::Rating => b.rating.total_cmp(&a.rating),
            SortKey::PriceLow => a.price.cmp(&b.price),
            SortKey::PriceHigh => b.price.cmp(&a.price),
            // None < Some, so undated courses land after every dated one
            SortKey::Newest => b.last_updated_date().cmp(&a.last_updated_date()),
        }
    }
}

impl From<String> for SortKey {
    fn from(param: String) -> Self {
        SortKey::from_param(&param)
    }
}

impl From<&str> for SortKey {
    fn from(param: &str) -> Self {
        SortKey::from_param(param)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter and sort parameters of one catalog view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    /// Case-insensitive substring of title, instructor or description.
    pub search: String,
    pub category: Selection,
    pub level: Selection,
    /// Inclusive price ceiling. The floor is always zero.
    pub max_price: Money,
    pub sort: SortKey,
}

impl Default for CatalogQuery {
    /// Everything, up to $500, most popular first.
    fn default() -> Self {
        CatalogQuery {
            search: String::new(),
            category: Selection::All,
            level: Selection::All,
            max_price: Money::from_dollars(DEFAULT_MAX_PRICE_DOLLARS),
            sort: SortKey::Popular,
        }
    }
}

impl CatalogQuery {
    /// Whether a course passes every filter of this query.
    pub fn matches(&self, course: &Course) -> bool {
        self.matches_search(course)
            && self.category.matches(&course.category)
            && self.level.matches(course.level.as_str())
            && self.matches_price(course)
    }

    fn matches_search(&self, course: &Course) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        [&course.title, &course.instructor, &course.description]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    #[inline]
    fn matches_price(&self, course: &Course) -> bool {
        !course.price.is_negative() && course.price <= self.max_price
    }
}

// =============================================================================
// Query Operations
// =============================================================================

/// Returns the courses passing every filter, in `params.sort` order.
///
/// Ties keep their catalog order. An empty result is not an error.
///
/// ```rust
/// use coursehub_core::catalog::{query, CatalogQuery, SortKey};
/// use coursehub_core::data::seed_courses;
///
/// let courses = seed_courses();
/// let cheapest_first = CatalogQuery {
///     sort: SortKey::PriceLow,
///     ..CatalogQuery::default()
/// };
///
/// let prices: Vec<i64> = query(&courses, &cheapest_first)
///     .iter()
///     .map(|c| c.price.dollars())
///     .collect();
/// assert_eq!(prices, vec![129, 149, 179, 199, 229, 299]);
/// ```
pub fn query<'a>(courses: &'a [Course], params: &CatalogQuery) -> Vec<&'a Course> {
    let mut visible: Vec<&Course> = courses.iter().filter(|c| params.matches(c)).collect();
    // slice::sort_by is stable
    visible.sort_by(|a, b| params.sort.compare(a, b));
    visible
}

/// Looks up one course for the detail page.
pub fn find_by_id(courses: &[Course], id: u32) -> Option<&Course> {
    courses.iter().find(|c| c.id == id)
}

/// Level filter options in display order, starting with the "All" sentinel.
pub const LEVELS: &[&str] = &[ALL, "Beginner", "Intermediate", "Advanced"];

/// Distinct categories in catalog order, preceded by the "All" sentinel.
pub fn categories(courses: &[Course]) -> Vec<&str> {
    let mut seen: Vec<&str> = vec![ALL];
    for course in courses {
        if !seen.contains(&course.category.as_str()) {
            seen.push(&course.category);
        }
    }
    seen
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::seed_courses;

    fn ids(result: &[&Course]) -> Vec<u32> {
        result.iter().map(|c| c.id).collect()
    }

    fn course(id: u32, students: u32, price_dollars: i64) -> Course {
        let mut c = seed_courses().remove(0);
        c.id = id;
        c.students = students;
        c.price = Money::from_dollars(price_dollars);
        c.original_price = Money::from_dollars(price_dollars);
        c
    }

    #[test]
    fn test_default_query_returns_all_by_students_desc() {
        let courses = seed_courses();
        let result = query(&courses, &CatalogQuery::default());

        // students: 15420, 8930, 12350, 6780, 5420, 9870
        assert_eq!(ids(&result), vec![1, 3, 6, 2, 4, 5]);
    }

    #[test]
    fn test_sort_examples() {
        let courses = vec![course(1, 10, 199), course(2, 50, 149), course(3, 30, 299)];

        let popular = query(&courses, &CatalogQuery::default());
        let students: Vec<u32> = popular.iter().map(|c| c.students).collect();
        assert_eq!(students, vec![50, 30, 10]);

        let params = CatalogQuery {
            sort: SortKey::PriceLow,
            ..CatalogQuery::default()
        };
        let prices: Vec<i64> = query(&courses, &params)
            .iter()
            .map(|c| c.price.dollars())
            .collect();
        assert_eq!(prices, vec![149, 199, 299]);
    }

    #[test]
    fn test_price_high_and_rating_sorts() {
        let courses = seed_courses();

        let params = CatalogQuery {
            sort: SortKey::PriceHigh,
            ..CatalogQuery::default()
        };
        assert_eq!(ids(&query(&courses, &params)), vec![4, 5, 1, 3, 2, 6]);

        // Ratings 4.9 tie between ids 2 and 4; catalog order wins
        let params = CatalogQuery {
            sort: SortKey::Rating,
            ..CatalogQuery::default()
        };
        assert_eq!(ids(&query(&courses, &params)), vec![2, 4, 1, 3, 5, 6]);
    }

    #[test]
    fn test_newest_sort_parses_dates_and_puts_undated_last() {
        let mut courses = seed_courses();
        courses[0].last_updated = "not a date".to_string();

        let params = CatalogQuery {
            sort: SortKey::Newest,
            ..CatalogQuery::default()
        };
        // 2024-01-12, 01-10, 01-08, 01-05, 01-03, then the undated one
        assert_eq!(ids(&query(&courses, &params)), vec![3, 2, 4, 5, 6, 1]);
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let courses = vec![course(7, 100, 10), course(8, 100, 10), course(9, 100, 10)];
        for sort in SortKey::ALL {
            let params = CatalogQuery {
                sort,
                ..CatalogQuery::default()
            };
            assert_eq!(ids(&query(&courses, &params)), vec![7, 8, 9], "{sort}");
        }
    }

    #[test]
    fn test_category_filter() {
        let courses = seed_courses();

        let design = CatalogQuery {
            category: Selection::from_param("Design"),
            ..CatalogQuery::default()
        };
        let result = query(&courses, &design);
        assert_eq!(ids(&result), vec![3]);

        let missing = CatalogQuery {
            category: Selection::from_param("NonExistent"),
            ..CatalogQuery::default()
        };
        assert!(query(&courses, &missing).is_empty());
    }

    #[test]
    fn test_level_filter_is_exact() {
        let courses = seed_courses();
        let params = CatalogQuery {
            level: Selection::from_param("Beginner"),
            ..CatalogQuery::default()
        };
        assert_eq!(ids(&query(&courses, &params)), vec![1, 3, 6]);

        let params = CatalogQuery {
            level: Selection::from_param("beginner"),
            ..CatalogQuery::default()
        };
        assert!(query(&courses, &params).is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive_over_three_fields() {
        let courses = seed_courses();

        for c in &courses {
            let prefix: String = c.instructor.to_lowercase().chars().take(3).collect();
            let params = CatalogQuery {
                search: prefix,
                ..CatalogQuery::default()
            };
            assert!(
                query(&courses, &params).iter().any(|hit| hit.id == c.id),
                "instructor prefix of course {} should match",
                c.id
            );
        }

        // "MONGODB" only appears in the bootcamp description
        let params = CatalogQuery {
            search: "MONGODB".to_string(),
            ..CatalogQuery::default()
        };
        assert_eq!(ids(&query(&courses, &params)), vec![1]);

        // Category text is not searched
        let params = CatalogQuery {
            search: "Mobile Development".to_string(),
            ..CatalogQuery::default()
        };
        assert!(query(&courses, &params).is_empty());
    }

    #[test]
    fn test_max_price_is_inclusive() {
        let courses = seed_courses();
        let params = CatalogQuery {
            max_price: Money::from_dollars(179),
            sort: SortKey::PriceLow,
            ..CatalogQuery::default()
        };
        assert_eq!(ids(&query(&courses, &params)), vec![6, 2, 3]);

        let params = CatalogQuery {
            max_price: Money::zero(),
            ..CatalogQuery::default()
        };
        assert!(query(&courses, &params).is_empty());
    }

    #[test]
    fn test_tightening_price_never_grows_result() {
        let courses = seed_courses();
        let mut previous = usize::MAX;
        for dollars in (0..=500).rev().step_by(10) {
            let params = CatalogQuery {
                max_price: Money::from_dollars(dollars),
                ..CatalogQuery::default()
            };
            let count = query(&courses, &params).len();
            assert!(count <= previous);
            previous = count;
        }
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let courses = seed_courses();
        let params = CatalogQuery {
            search: "development".to_string(),
            level: Selection::from_param("Intermediate"),
            ..CatalogQuery::default()
        };
        assert_eq!(ids(&query(&courses, &params)), vec![5]);
    }

    #[test]
    fn test_query_leaves_catalog_untouched() {
        let courses = seed_courses();
        let before = courses.clone();
        let params = CatalogQuery {
            sort: SortKey::PriceHigh,
            ..CatalogQuery::default()
        };
        let _ = query(&courses, &params);
        assert_eq!(courses, before);
    }

    #[test]
    fn test_empty_catalog() {
        assert!(query(&[], &CatalogQuery::default()).is_empty());
    }

    #[test]
    fn test_unknown_sort_key_falls_back_to_popular() {
        assert_eq!(SortKey::from_param("alphabetical"), SortKey::Popular);
        assert_eq!(SortKey::from_param("price-low"), SortKey::PriceLow);

        let parsed: SortKey = serde_json::from_str("\"by-vibes\"").unwrap();
        assert_eq!(parsed, SortKey::Popular);
        let parsed: SortKey = serde_json::from_str("\"newest\"").unwrap();
        assert_eq!(parsed, SortKey::Newest);
    }

    #[test]
    fn test_find_by_id_and_categories() {
        let courses = seed_courses();
        assert_eq!(
            find_by_id(&courses, 4).map(|c| c.title.as_str()),
            Some("Data Science & Machine Learning")
        );
        assert!(find_by_id(&courses, 99).is_none());

        assert_eq!(categories(&courses), crate::data::CATEGORIES.to_vec());
    }

    #[test]
    fn test_selection_param_round_trip() {
        assert_eq!(Selection::from_param("All"), Selection::All);
        assert_eq!(Selection::from_param("Design").as_param(), "Design");
    }
}
