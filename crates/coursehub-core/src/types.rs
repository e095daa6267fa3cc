//! # Domain Types
//!
//! Core domain types used throughout CourseHub.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Course       │   │     Level       │   │     Theme       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (u32)       │   │  Beginner       │   │  Light (default)│       │
//! │  │  title          │   │  Intermediate   │   │  Dark           │       │
//! │  │  price (Money)  │   │  Advanced       │   └─────────────────┘       │
//! │  │  students       │   └─────────────────┘                             │
//! │  │  lastUpdated    │   ┌─────────────────┐                             │
//! │  │  modules [..]   │   │     User        │                             │
//! │  └─────────────────┘   │  id, name,      │                             │
//! │                        │  email, avatar  │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Courses are loaded once and never mutated; nothing in this crate hands
//! out `&mut Course`.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

/// Date format of `Course::last_updated`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Level
// =============================================================================

/// Difficulty level of a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    /// All levels in display order.
    pub const ALL: [Level; 3] = [Level::Beginner, Level::Intermediate, Level::Advanced];

    /// Returns the label shown in the UI and used by the level filter.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Level::Beginner => "Beginner",
            Level::Intermediate => "Intermediate",
            Level::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: "level".to_string(),
            })
    }
}

// =============================================================================
// Course
// =============================================================================

/// A course listed in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Course {
    /// Unique positive identifier.
    pub id: u32,

    pub title: String,

    pub instructor: String,

    /// Instructor portrait URL.
    pub instructor_avatar: String,

    /// Current selling price.
    pub price: Money,

    /// List price before discount. Expected to be `>= price`; not enforced.
    pub original_price: Money,

    /// Average rating in [0, 5].
    pub rating: f32,

    pub reviews: u32,

    /// Free-text length, e.g. "40 hours".
    pub duration: String,

    pub level: Level,

    pub category: String,

    /// Cover image URL.
    pub image: String,

    /// Short blurb shown on catalog cards. Searched by the catalog query.
    pub description: String,

    /// Longer text shown on the course detail page.
    pub long_description: String,

    pub preview_video: String,

    /// Module names in teaching order.
    pub modules: Vec<String>,

    pub students: u32,

    /// Calendar date `YYYY-MM-DD`.
    pub last_updated: String,
}

impl Course {
    /// Parses `last_updated`, returning `None` if it is not a valid date.
    pub fn last_updated_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.last_updated, DATE_FORMAT).ok()
    }

    /// Whether the course is sold below its list price.
    #[inline]
    pub fn has_discount(&self) -> bool {
        self.original_price > self.price
    }

    /// Rounded discount percentage for the "% OFF" badge.
    ///
    /// Zero when there is no discount or the list price is zero.
    pub fn discount_percent(&self) -> i64 {
        if !self.has_discount() {
            return 0;
        }
        self.original_price
            .percentage(self.original_price - self.price)
    }
}

// =============================================================================
// Theme
// =============================================================================

/// Color theme preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Returns the other theme.
    #[inline]
    pub const fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Class the document root carries while this theme is active.
    pub const fn css_class(self) -> Option<&'static str> {
        match self {
            Theme::Light => None,
            Theme::Dark => Some("dark"),
        }
    }

    /// Value written to durable storage.
    pub const fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Reads a persisted theme value.
    ///
    /// Accepts `"light"` or `"dark"`. Anything else yields `None`.
    pub fn from_persisted(raw: &str) -> Option<Self> {
        match raw.trim() {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// User
// =============================================================================

/// A signed-in user. Only exists while authenticated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct User {
    pub id: u32,
    pub name: String,
    pub email: String,
    /// Avatar image URL.
    pub avatar: String,
}

// =============================================================================
// Unit Tests
// =============================================================================
