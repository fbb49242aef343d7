//! Owner seeding.

use fake::Fake;
use fake::faker::company::en::CompanyName;
use fake::faker::name::en::Name;
use fake::faker::number::en::NumberWithFormat;
use rayon::prelude::*;
use sqlx::{PgPool, QueryBuilder};
use std::time::Instant;

use hostelhub_models::{OwnerId, OwnerStatus};

use super::models::{OwnerSeed, SEED_SUBDOMAIN_PREFIX};
use crate::CliResult;

const BATCH_SIZE: usize = 500;

/// Generates owner data in parallel using Rayon
pub fn generate_owners(count: usize) -> Vec<OwnerSeed> {
    (0..count)
        .into_par_iter()
        .map(|i| {
            let name: String = Name().fake();
            let company: String = CompanyName().fake();
            let suffix: String = NumberWithFormat("####").fake();
            let slug: String = company
                .to_lowercase()
                .chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .take(20)
                .collect();

            OwnerSeed {
                name,
                phone: NumberWithFormat("019########").fake(),
                subdomain: format!("{}{}-{}-{}", SEED_SUBDOMAIN_PREFIX, slug, i, suffix),
            }
        })
        .collect()
}

/// Inserts owners as active accounts. Phone or subdomain collisions are skipped.
pub async fn insert_owners(
    db: &PgPool,
    owners: &[OwnerSeed],
    password_hash: &str,
) -> CliResult<Vec<OwnerId>> {
    let start_time = Instant::now();
    println!("🏠 Inserting {} owners...", owners.len());

    let mut tx = db.begin().await?;
    let mut ids = Vec::with_capacity(owners.len());

    for chunk in owners.chunks(BATCH_SIZE) {
        let mut builder = QueryBuilder::new(
            "INSERT INTO owners (phone, password_hash, name, status, subdomain) ",
        );
        builder.push_values(chunk, |mut row, owner| {
            row.push_bind(&owner.phone)
                .push_bind(password_hash)
                .push_bind(&owner.name)
                .push_bind(OwnerStatus::Active)
                .push_bind(&owner.subdomain);
        });
        builder.push(" ON CONFLICT DO NOTHING RETURNING id");

        let chunk_ids: Vec<OwnerId> = builder.build_query_scalar().fetch_all(&mut *tx).await?;
        ids.extend(chunk_ids);
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} owners in {:?}",
        ids.len(),
        start_time.elapsed()
    );

    Ok(ids)
}
