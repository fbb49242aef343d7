//! Current-month rent seeding.

use fake::Fake;
use rayon::prelude::*;
use sqlx::{PgPool, QueryBuilder};
use std::collections::HashMap;
use std::time::Instant;

use hostelhub_models::CategoryId;

use super::models::{RentSeed, SeededCategory, SeededStudent};
use crate::CliResult;

const BATCH_SIZE: usize = 1000;

/// One rent per student, priced from its category, with a random amount already paid.
pub fn generate_rents(students: &[SeededStudent], categories: &[SeededCategory]) -> Vec<RentSeed> {
    let prices: HashMap<CategoryId, (i64, i64)> = categories
        .iter()
        .map(|c| (c.id, (c.rent_amount, c.external_amount)))
        .collect();

    students
        .par_iter()
        .filter_map(|student| {
            let (rent_amount, external_amount) = *prices.get(&student.category_id?)?;
            Some(RentSeed {
                owner_id: student.owner_id,
                student_id: student.id,
                category_id: student.category_id,
                rent_amount,
                external_amount,
                rent_paid: (0..=rent_amount).fake(),
            })
        })
        .collect()
}

pub async fn insert_rents(db: &PgPool, rents: &[RentSeed]) -> CliResult<u64> {
    let start_time = Instant::now();
    println!("🧾 Inserting {} rents...", rents.len());

    let mut tx = db.begin().await?;
    let mut inserted = 0;

    for chunk in rents.chunks(BATCH_SIZE) {
        let mut builder = QueryBuilder::new(
            "INSERT INTO rents (owner_id, student_id, category_id, rent_amount, external_amount, rent_paid) ",
        );
        builder.push_values(chunk, |mut row, rent| {
            row.push_bind(rent.owner_id)
                .push_bind(rent.student_id)
                .push_bind(rent.category_id)
                .push_bind(rent.rent_amount)
                .push_bind(rent.external_amount)
                .push_bind(rent.rent_paid);
        });
        inserted += builder.build().execute(&mut *tx).await?.rows_affected();
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} rents in {:?}",
        inserted,
        start_time.elapsed()
    );

    Ok(inserted)
}
