//! Builders for catalog and purchase fixtures.

use chrono::{DateTime, Utc};
use lectern_core::catalog::{Course, Lecture};
use lectern_core::purchase::PurchasedCourse;
use uuid::Uuid;

use crate::clock::fixed_now;

/// Builds a published course whose curriculum is `lecture_ids` in order.
#[must_use]
pub fn course_with_lectures(course_id: Uuid, lecture_ids: &[Uuid]) -> Course {
    Course {
        id: course_id,
        instructor_id: Uuid::nil(),
        instructor_name: "Grace Hopper".to_owned(),
        title: "Compilers from Scratch".to_owned(),
        category: "programming".to_owned(),
        level: "intermediate".to_owned(),
        primary_language: "english".to_owned(),
        subtitle: "Build one".to_owned(),
        description: "A hands-on course.".to_owned(),
        image: "https://cdn.example.com/compilers.png".to_owned(),
        pricing: 49.0,
        objectives: "lexing,parsing".to_owned(),
        is_published: true,
        created_at: fixed_now(),
        curriculum: lecture_ids
            .iter()
            .enumerate()
            .map(|(i, id)| Lecture {
                id: *id,
                title: format!("Lecture {}", i + 1),
                video_url: format!("https://cdn.example.com/{id}.mp4"),
                free_preview: i == 0,
            })
            .collect(),
    }
}

/// Builds the purchase record a checkout of `course` would produce.
#[must_use]
pub fn purchase_of(course: &Course, purchased_at: DateTime<Utc>) -> PurchasedCourse {
    PurchasedCourse {
        course_id: course.id,
        title: course.title.clone(),
        instructor_id: course.instructor_id,
        instructor_name: course.instructor_name.clone(),
        purchased_at,
        course_image: course.image.clone(),
    }
}
