//! # Seed Catalog
//!
//! The static course list the marketplace ships with.
//!
//! The catalog is supplied whole at startup and never changes afterwards.
//! Prices are whole dollars here and converted to [`Money`] on load.

use crate::money::Money;
use crate::types::{Course, Level};

/// Category filter options in display order, starting with the "All" sentinel.
pub const CATEGORIES: &[&str] = &[
    crate::ALL,
    "Web Development",
    "Programming",
    "Design",
    "Data Science",
    "Mobile Development",
    "Marketing",
];

/// Compile-time row of the seed table.
struct CourseSeed {
    id: u32,
    title: &'static str,
    instructor: &'static str,
    instructor_avatar: &'static str,
    price_dollars: i64,
    original_price_dollars: i64,
    rating: f32,
    reviews: u32,
    duration: &'static str,
    level: Level,
    category: &'static str,
    image: &'static str,
    description: &'static str,
    long_description: &'static str,
    preview_video: &'static str,
    modules: &'static [&'static str],
    students: u32,
    last_updated: &'static str,
}

impl CourseSeed {
    fn to_course(&self) -> Course {
        Course {
            id: self.id,
            title: self.title.to_string(),
            instructor: self.instructor.to_string(),
            instructor_avatar: self.instructor_avatar.to_string(),
            price: Money::from_dollars(self.price_dollars),
            original_price: Money::from_dollars(self.original_price_dollars),
            rating: self.rating,
            reviews: self.reviews,
            duration: self.duration.to_string(),
            level: self.level,
            category: self.category.to_string(),
            image: self.image.to_string(),
            description: self.description.to_string(),
            long_description: self.long_description.to_string(),
            preview_video: self.preview_video.to_string(),
            modules: self.modules.iter().map(|m| m.to_string()).collect(),
            students: self.students,
            last_updated: self.last_updated.to_string(),
        }
    }
}

const SEED: &[CourseSeed] = &[
    CourseSeed {
        id: 1,
        title: "Complete Web Development Bootcamp",
        instructor: "Sarah Johnson",
        instructor_avatar: "https://images.unsplash.com/photo-1494790108755-2616b612b786?w=150&h=150&fit=crop&crop=face",
        price_dollars: 199,
        original_price_dollars: 299,
        rating: 4.8,
        reviews: 1250,
        duration: "40 hours",
        level: Level::Beginner,
        category: "Web Development",
        image: "https://images.unsplash.com/photo-1516321318423-f06f85e504b3?w=400&h=250&fit=crop",
        description: "Learn full-stack web development from scratch. Master HTML, CSS, JavaScript, React, Node.js, and MongoDB.",
        long_description: "This comprehensive bootcamp will take you from zero to hero in web development. You'll learn modern technologies and build real-world projects that will impress employers.",
        preview_video: "https://www.youtube.com/embed/dQw4w9WgXcQ",
        modules: &[
            "HTML & CSS Fundamentals",
            "JavaScript ES6+",
            "React Development",
            "Node.js & Express",
            "Database Design",
            "Deployment & DevOps",
        ],
        students: 15420,
        last_updated: "2024-01-15",
    },
    CourseSeed {
        id: 2,
        title: "Advanced Python Programming",
        instructor: "Michael Chen",
        instructor_avatar: "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=150&h=150&fit=crop&crop=face",
        price_dollars: 149,
        original_price_dollars: 199,
        rating: 4.9,
        reviews: 890,
        duration: "35 hours",
        level: Level::Intermediate,
        category: "Programming",
        image: "https://images.unsplash.com/photo-1526379095098-d400fd0bf935?w=400&h=250&fit=crop",
        description: "Master advanced Python concepts including OOP, data structures, algorithms, and frameworks.",
        long_description: "Take your Python skills to the next level with this comprehensive course covering advanced topics, best practices, and real-world applications.",
        preview_video: "https://www.youtube.com/embed/dQw4w9WgXcQ",
        modules: &[
            "Object-Oriented Programming",
            "Data Structures & Algorithms",
            "Django Framework",
            "Data Science Libraries",
            "Testing & Debugging",
            "Performance Optimization",
        ],
        students: 8930,
        last_updated: "2024-01-10",
    },
    CourseSeed {
        id: 3,
        title: "UI/UX Design Masterclass",
        instructor: "Emily Rodriguez",
        instructor_avatar: "https://images.unsplash.com/photo-1438761681033-6461ffad8d80?w=150&h=150&fit=crop&crop=face",
        price_dollars: 179,
        original_price_dollars: 249,
        rating: 4.7,
        reviews: 2100,
        duration: "30 hours",
        level: Level::Beginner,
        category: "Design",
        image: "https://images.unsplash.com/photo-1558655146-d09347e92766?w=400&h=250&fit=crop",
        description: "Learn modern UI/UX design principles, tools, and workflows to create stunning user experiences.",
        long_description: "From wireframing to prototyping, learn the complete design process using industry-standard tools like Figma and Adobe XD.",
        preview_video: "https://www.youtube.com/embed/dQw4w9WgXcQ",
        modules: &[
            "Design Principles",
            "User Research",
            "Wireframing & Prototyping",
            "Figma Mastery",
            "Design Systems",
            "Portfolio Development",
        ],
        students: 12350,
        last_updated: "2024-01-12",
    },
    CourseSeed {
        id: 4,
        title: "Data Science & Machine Learning",
        instructor: "Dr. Alex Kumar",
        instructor_avatar: "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=150&h=150&fit=crop&crop=face",
        price_dollars: 299,
        original_price_dollars: 399,
        rating: 4.9,
        reviews: 1560,
        duration: "50 hours",
        level: Level::Advanced,
        category: "Data Science",
        image: "https://images.unsplash.com/photo-1551288049-bebda4e38f71?w=400&h=250&fit=crop",
        description: "Comprehensive data science course covering statistics, machine learning, and deep learning.",
        long_description: "Master the complete data science pipeline from data collection to model deployment using Python, R, and modern ML frameworks.",
        preview_video: "https://www.youtube.com/embed/dQw4w9WgXcQ",
        modules: &[
            "Statistics & Probability",
            "Data Analysis with Pandas",
            "Machine Learning Algorithms",
            "Deep Learning with TensorFlow",
            "Data Visualization",
            "Model Deployment",
        ],
        students: 6780,
        last_updated: "2024-01-08",
    },
    CourseSeed {
        id: 5,
        title: "Mobile App Development with React Native",
        instructor: "David Park",
        instructor_avatar: "https://images.unsplash.com/photo-1500648767791-00dcc994a43e?w=150&h=150&fit=crop&crop=face",
        price_dollars: 229,
        original_price_dollars: 299,
        rating: 4.6,
        reviews: 980,
        duration: "45 hours",
        level: Level::Intermediate,
        category: "Mobile Development",
        image: "https://images.unsplash.com/photo-1512941937669-90a1b58e7e9c?w=400&h=250&fit=crop",
        description: "Build cross-platform mobile apps using React Native and modern development practices.",
        long_description: "Learn to create beautiful, performant mobile applications for both iOS and Android using React Native.",
        preview_video: "https://www.youtube.com/embed/dQw4w9WgXcQ",
        modules: &[
            "React Native Fundamentals",
            "Navigation & State Management",
            "Native Modules",
            "App Store Deployment",
            "Performance Optimization",
            "Testing & Debugging",
        ],
        students: 5420,
        last_updated: "2024-01-05",
    },
    CourseSeed {
        id: 6,
        title: "Digital Marketing Strategy",
        instructor: "Lisa Thompson",
        instructor_avatar: "https://images.unsplash.com/photo-1544005313-94ddf0286df2?w=150&h=150&fit=crop&crop=face",
        price_dollars: 129,
        original_price_dollars: 179,
        rating: 4.5,
        reviews: 1750,
        duration: "25 hours",
        level: Level::Beginner,
        category: "Marketing",
        image: "https://images.unsplash.com/photo-1460925895917-afdab827c52f?w=400&h=250&fit=crop",
        description: "Master digital marketing strategies including SEO, social media, and content marketing.",
        long_description: "Learn proven digital marketing strategies to grow your business and reach your target audience effectively.",
        preview_video: "https://www.youtube.com/embed/dQw4w9WgXcQ",
        modules: &[
            "SEO Fundamentals",
            "Social Media Marketing",
            "Content Strategy",
            "Email Marketing",
            "Analytics & Tracking",
            "Campaign Optimization",
        ],
        students: 9870,
        last_updated: "2024-01-03",
    },
];

/// Builds the seeded six-course catalog, in catalog order.
pub fn seed_courses() -> Vec<Course> {
    SEED.iter().map(CourseSeed::to_course).collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_has_six_unique_courses() {
        let courses = seed_courses();
        assert_eq!(courses.len(), 6);

        let ids: HashSet<u32> = courses.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), 6);
        assert!(courses.iter().all(|c| c.id > 0));
    }

    #[test]
    fn test_seed_prices_and_dates_are_well_formed() {
        for course in seed_courses() {
            assert!(course.price <= course.original_price, "{}", course.title);
            assert!((0.0..=5.0).contains(&course.rating));
            assert!(course.last_updated_date().is_some(), "{}", course.title);
            assert_eq!(course.modules.len(), 6);
        }
    }

    #[test]
    fn test_every_seed_category_is_a_filter_option() {
        for course in seed_courses() {
            assert!(CATEGORIES.contains(&course.category.as_str()));
            assert!(crate::catalog::LEVELS.contains(&course.level.as_str()));
        }
    }
}
