//! Database seeding with generated owners, categories, students and rents.
//!
//! Data is generated in parallel with Rayon and inserted in batched
//! multi-row `INSERT`s. Every seeded account shares one password, hashed
//! once at a low bcrypt cost.
//!
//! Seeded owners are marked by a `seed-` subdomain prefix, so
//! [`clear_seed`] removes them and everything they own without touching
//! real tenants.

pub mod models;
pub mod owners;
pub mod rents;
pub mod students;

use sqlx::PgPool;
use std::time::Instant;

pub use models::{SEED_PASSWORD, SEED_SUBDOMAIN_PREFIX, SeedConfig};

use crate::CliResult;

/// Bcrypt cost for seeded secrets only; real accounts use the default cost.
const SEED_BCRYPT_COST: u32 = 4;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub owners: usize,
    pub categories: usize,
    pub students: usize,
    pub rents: u64,
}

pub async fn seed_all(db: &PgPool, config: SeedConfig) -> CliResult<SeedReport> {
    let start_time = Instant::now();

    println!("🌱 Starting database seeding...");
    println!("   - Owners: {}", config.num_owners);
    println!(
        "   - Per owner: {} categories, {} students",
        config.categories_per_owner, config.students_per_owner
    );

    let password_hash = bcrypt::hash(SEED_PASSWORD, SEED_BCRYPT_COST)?;

    let owner_seeds = owners::generate_owners(config.num_owners);
    let owner_ids = owners::insert_owners(db, &owner_seeds, &password_hash).await?;

    let category_seeds = students::generate_categories(&owner_ids, config.categories_per_owner);
    let categories = students::insert_categories(db, &category_seeds).await?;

    let student_seeds =
        students::generate_students(&owner_ids, &categories, config.students_per_owner);
    let seeded_students = students::insert_students(db, &student_seeds, &password_hash).await?;

    let rents = if config.with_rents {
        let rent_seeds = rents::generate_rents(&seeded_students, &categories);
        rents::insert_rents(db, &rent_seeds).await?
    } else {
        0
    };

    let report = SeedReport {
        owners: owner_ids.len(),
        categories: categories.len(),
        students: seeded_students.len(),
        rents,
    };

    println!("\n✅ Seeding completed in {:?}", start_time.elapsed());
    println!("   Login with any seeded phone and password '{}'", SEED_PASSWORD);

    Ok(report)
}

/// Deletes every seeded owner and all rows that reference them.
pub async fn clear_seed(db: &PgPool) -> CliResult<u64> {
    let start_time = Instant::now();
    println!("🗑️  Clearing seeded data...");

    let pattern = format!("{}%", SEED_SUBDOMAIN_PREFIX);
    let mut tx = db.begin().await?;

    for table in ["payments", "rents", "students", "categories"] {
        let sql = format!(
            "DELETE FROM {} WHERE owner_id IN (SELECT id FROM owners WHERE subdomain LIKE $1)",
            table
        );
        let deleted = sqlx::query(&sql)
            .bind(&pattern)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        println!("   ✓ Deleted {} {}", deleted, table);
    }

    let owners = sqlx::query("DELETE FROM owners WHERE subdomain LIKE $1")
        .bind(&pattern)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;

    println!(
        "   ✓ Deleted {} owners in {:?}",
        owners,
        start_time.elapsed()
    );

    Ok(owners)
}
