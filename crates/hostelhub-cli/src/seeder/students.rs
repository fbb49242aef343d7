//! Category and student seeding.

use fake::Fake;
use fake::faker::name::en::Name;
use fake::faker::number::en::NumberWithFormat;
use rayon::prelude::*;
use sqlx::{PgPool, QueryBuilder};
use std::time::Instant;

use hostelhub_models::{OwnerId, StudentStatus};

use super::models::{CategorySeed, SeededCategory, SeededStudent, StudentSeed};
use crate::CliResult;

const BATCH_SIZE: usize = 1000;
const CATEGORY_TITLES: [&str; 5] = [
    "Single room",
    "Double room",
    "Triple room",
    "Dormitory",
    "Attached bath",
];

pub fn generate_categories(owner_ids: &[OwnerId], per_owner: usize) -> Vec<CategorySeed> {
    owner_ids
        .par_iter()
        .flat_map_iter(|owner_id| {
            (0..per_owner).map(move |i| CategorySeed {
                owner_id: *owner_id,
                title: CATEGORY_TITLES[i % CATEGORY_TITLES.len()].to_string(),
                rent_amount: (20..80).fake::<i64>() * 100,
                external_amount: (2..10).fake::<i64>() * 100,
            })
        })
        .collect()
}

pub async fn insert_categories(
    db: &PgPool,
    categories: &[CategorySeed],
) -> CliResult<Vec<SeededCategory>> {
    let start_time = Instant::now();
    println!("🏷️  Inserting {} categories...", categories.len());

    let mut tx = db.begin().await?;
    let mut seeded = Vec::with_capacity(categories.len());

    for chunk in categories.chunks(BATCH_SIZE) {
        let mut builder =
            QueryBuilder::new("INSERT INTO categories (owner_id, title, rent_amount, external_amount) ");
        builder.push_values(chunk, |mut row, category| {
            row.push_bind(category.owner_id)
                .push_bind(&category.title)
                .push_bind(category.rent_amount)
                .push_bind(category.external_amount);
        });
        builder.push(" RETURNING id, owner_id, rent_amount, external_amount");

        let rows: Vec<SeededCategory> = builder.build_query_as().fetch_all(&mut *tx).await?;
        seeded.extend(rows);
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} categories in {:?}",
        seeded.len(),
        start_time.elapsed()
    );

    Ok(seeded)
}

/// Generates students, spreading each owner's students over its categories.
pub fn generate_students(
    owner_ids: &[OwnerId],
    categories: &[SeededCategory],
    per_owner: usize,
) -> Vec<StudentSeed> {
    owner_ids
        .par_iter()
        .flat_map_iter(|owner_id| {
            let owned: Vec<&SeededCategory> = categories
                .iter()
                .filter(|c| c.owner_id == *owner_id)
                .collect();

            (0..per_owner)
                .map(|i| StudentSeed {
                    owner_id: *owner_id,
                    category_id: (!owned.is_empty()).then(|| owned[i % owned.len()].id),
                    name: Name().fake(),
                    phone: NumberWithFormat("018########").fake(),
                    booking_amount: (0..5).fake::<i64>() * 1000,
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

pub async fn insert_students(
    db: &PgPool,
    students: &[StudentSeed],
    password_hash: &str,
) -> CliResult<Vec<SeededStudent>> {
    let start_time = Instant::now();
    println!("🎓 Inserting {} students...", students.len());

    let mut tx = db.begin().await?;
    let mut seeded = Vec::with_capacity(students.len());
    let today = chrono::Utc::now().date_naive();

    for chunk in students.chunks(BATCH_SIZE) {
        let mut builder = QueryBuilder::new(
            "INSERT INTO students (owner_id, category_id, phone, password, name, status, joining_date, booking_amount) ",
        );
        builder.push_values(chunk, |mut row, student| {
            row.push_bind(student.owner_id)
                .push_bind(student.category_id)
                .push_bind(&student.phone)
                .push_bind(password_hash)
                .push_bind(&student.name)
                .push_bind(StudentStatus::Living)
                .push_bind(today)
                .push_bind(student.booking_amount);
        });
        builder.push(" ON CONFLICT DO NOTHING RETURNING id, owner_id, category_id");

        let rows: Vec<SeededStudent> = builder.build_query_as().fetch_all(&mut *tx).await?;
        seeded.extend(rows);
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} students in {:?}",
        seeded.len(),
        start_time.elapsed()
    );

    Ok(seeded)
}
