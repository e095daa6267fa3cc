//! # Catalog Commands
//!
//! Listing, filtering and inspecting courses.
//!
//! ## Filter Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  coursehub courses --search react --level Beginner --sort price-low     │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  CoursesArgs ──► CatalogQuery { search, category, level, max, sort }    │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  catalog::query(&courses, &query) ──► Vec<&Course> (stable order)       │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  CourseListResponse { courses: [CourseSummary], total }                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt::Write as _;

use clap::Args;
use coursehub_core::catalog::{self, CatalogQuery, Selection, SortKey};
use coursehub_core::{Course, Level, Money};
use coursehub_store::KeyValueStore;
use serde::Serialize;
use tracing::debug;

use super::Render;
use crate::config::ConfigState;
use crate::error::ApiError;
use crate::state::AppContext;

/// Filters of the `courses` command.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct CoursesArgs {
    /// Case-insensitive text matched against title, instructor and description
    #[arg(long, short)]
    pub search: Option<String>,

    /// Exact category name, or "All"
    #[arg(long, short)]
    pub category: Option<String>,

    /// Beginner, Intermediate, Advanced, or "All"
    #[arg(long, short)]
    pub level: Option<String>,

    /// Highest price shown, in whole currency units
    #[arg(long)]
    pub max_price: Option<i64>,

    /// popular, rating, price-low, price-high or newest
    #[arg(long)]
    pub sort: Option<String>,
}

impl CoursesArgs {
    /// Builds the catalog query; omitted filters take their defaults.
    pub fn to_query(&self, config: &ConfigState) -> Result<CatalogQuery, ApiError> {
        let max_price = match self.max_price {
            Some(dollars) if dollars < 0 => {
                return Err(ApiError::validation("max price cannot be negative"))
            }
            Some(dollars) => Money::from_dollars(dollars),
            None => config.max_price_money(),
        };

        Ok(CatalogQuery {
            search: self.search.clone().unwrap_or_default(),
            category: selection(self.category.as_deref()),
            level: selection(self.level.as_deref()),
            max_price,
            sort: self
                .sort
                .as_deref()
                .map(SortKey::from_param)
                .unwrap_or_default(),
        })
    }
}

fn selection(param: Option<&str>) -> Selection {
    param.map(Selection::from_param).unwrap_or_default()
}

// =============================================================================
// Responses
// =============================================================================

/// One catalog card.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSummary {
    pub id: u32,
    pub title: String,
    pub instructor: String,
    pub price: Money,
    pub original_price: Money,
    pub discount_percent: i64,
    pub rating: f32,
    pub reviews: u32,
    pub students: u32,
    pub duration: String,
    pub level: Level,
    pub category: String,
    pub in_cart: bool,
}

impl CourseSummary {
    fn new(course: &Course, in_cart: bool) -> Self {
        CourseSummary {
            id: course.id,
            title: course.title.clone(),
            instructor: course.instructor.clone(),
            price: course.price,
            original_price: course.original_price,
            discount_percent: course.discount_percent(),
            rating: course.rating,
            reviews: course.reviews,
            students: course.students,
            duration: course.duration.clone(),
            level: course.level,
            category: course.category.clone(),
            in_cart,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseListResponse {
    pub courses: Vec<CourseSummary>,
    pub total: usize,
    pub sort: SortKey,
}

impl Render for CourseListResponse {
    fn render(&self, config: &ConfigState) -> String {
        if self.courses.is_empty() {
            return "No courses found. Try adjusting your filters.".to_string();
        }

        let mut out = format!("{} courses found (sorted by {})\n", self.total, self.sort);
        for course in &self.courses {
            let mut price = config.format_currency(course.price);
            if course.discount_percent > 0 {
                let _ = write!(
                    price,
                    " (was {}, -{}%)",
                    config.format_currency(course.original_price),
                    course.discount_percent
                );
            }
            let marker = if course.in_cart { " [in cart]" } else { "" };
            let _ = writeln!(
                out,
                "{:>3}  {}{marker}\n     {} | {} | {} | {:.1} ({} reviews) | {}",
                course.id,
                course.title,
                course.instructor,
                course.level,
                course.category,
                course.rating,
                course.reviews,
                price
            );
        }
        out.trim_end().to_string()
    }
}

/// The detail page of one course.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetailResponse {
    #[serde(flatten)]
    pub course: Course,
    pub discount_percent: i64,
    pub in_cart: bool,
}

impl Render for CourseDetailResponse {
    fn render(&self, config: &ConfigState) -> String {
        let c = &self.course;
        let mut out = format!(
            "{}\nby {}\n\n{}\n\n{}\n\n",
            c.title, c.instructor, c.description, c.long_description
        );
        let _ = writeln!(out, "Level:     {}", c.level);
        let _ = writeln!(out, "Category:  {}", c.category);
        let _ = writeln!(out, "Duration:  {}", c.duration);
        let _ = writeln!(out, "Rating:    {:.1} ({} reviews)", c.rating, c.reviews);
        let _ = writeln!(out, "Students:  {}", c.students);
        let _ = writeln!(out, "Updated:   {}", c.last_updated);
        let _ = write!(out, "Price:     {}", config.format_currency(c.price));
        if self.discount_percent > 0 {
            let _ = write!(
                out,
                " (was {}, save {}%)",
                config.format_currency(c.original_price),
                self.discount_percent
            );
        }
        out.push_str("\n\nCurriculum:\n");
        for (index, module) in c.modules.iter().enumerate() {
            let _ = writeln!(out, "  {}. {module}", index + 1);
        }
        if self.in_cart {
            out.push_str("\nAlready in your cart.");
        }
        out.trim_end().to_string()
    }
}

/// Filter options offered by the catalog page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
    pub levels: Vec<String>,
    pub sorts: Vec<SortKey>,
}

impl Render for CategoriesResponse {
    fn render(&self, _config: &ConfigState) -> String {
        let sorts: Vec<&str> = self.sorts.iter().map(SortKey::as_str).collect();
        format!(
            "Categories: {}\nLevels:     {}\nSort by:    {}",
            self.categories.join(", "),
            self.levels.join(", "),
            sorts.join(", ")
        )
    }
}

// =============================================================================
// Commands
// =============================================================================

pub fn list_courses<S: KeyValueStore>(
    ctx: &AppContext<S>,
    args: &CoursesArgs,
) -> Result<CourseListResponse, ApiError> {
    let params = args.to_query(&ctx.config)?;
    debug!(?params, "list_courses command");

    let cart = ctx.store.cart();
    let courses: Vec<CourseSummary> = catalog::query(&ctx.courses, &params)
        .into_iter()
        .map(|c| CourseSummary::new(c, cart.contains(c.id)))
        .collect();

    Ok(CourseListResponse {
        total: courses.len(),
        courses,
        sort: params.sort,
    })
}

pub fn get_course<S: KeyValueStore>(
    ctx: &AppContext<S>,
    id: u32,
) -> Result<CourseDetailResponse, ApiError> {
    debug!(id, "get_course command");
    let course = ctx.course(id)?;

    Ok(CourseDetailResponse {
        discount_percent: course.discount_percent(),
        in_cart: ctx.store.cart().contains(id),
        course: course.clone(),
    })
}

pub fn list_categories<S: KeyValueStore>(ctx: &AppContext<S>) -> CategoriesResponse {
    debug!("list_categories command");
    CategoriesResponse {
        categories: catalog::categories(&ctx.courses)
            .into_iter()
            .map(str::to_string)
            .collect(),
        levels: catalog::LEVELS.iter().map(|l| l.to_string()).collect(),
        sorts: SortKey::ALL.to_vec(),
    }
}
