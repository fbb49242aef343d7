//! Configuration and row shapes for database seeding.

use hostelhub_models::{CategoryId, OwnerId, StudentId};

/// Subdomain prefix that marks an owner as seeded; `clear-seed` keys on it.
pub const SEED_SUBDOMAIN_PREFIX: &str = "seed-";

/// Password shared by every seeded owner and student.
pub const SEED_PASSWORD: &str = "password123";

pub struct OwnerSeed {
    pub name: String,
    pub phone: String,
    pub subdomain: String,
}

pub struct CategorySeed {
    pub owner_id: OwnerId,
    pub title: String,
    pub rent_amount: i64,
    pub external_amount: i64,
}

pub struct StudentSeed {
    pub owner_id: OwnerId,
    pub category_id: Option<CategoryId>,
    pub name: String,
    pub phone: String,
    pub booking_amount: i64,
}

pub struct RentSeed {
    pub owner_id: OwnerId,
    pub student_id: StudentId,
    pub category_id: Option<CategoryId>,
    pub rent_amount: i64,
    pub external_amount: i64,
    pub rent_paid: i64,
}

/// A seeded category as read back from the database.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SeededCategory {
    pub id: CategoryId,
    pub owner_id: OwnerId,
    pub rent_amount: i64,
    pub external_amount: i64,
}

/// A seeded student as read back from the database.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SeededStudent {
    pub id: StudentId,
    pub owner_id: OwnerId,
    pub category_id: Option<CategoryId>,
}

#[derive(Clone)]
pub struct SeedConfig {
    pub num_owners: usize,
    pub categories_per_owner: usize,
    pub students_per_owner: usize,
    /// Also bill every seeded student for the current month
    pub with_rents: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            num_owners: 5,
            categories_per_owner: 3,
            students_per_owner: 20,
            with_rents: true,
        }
    }
}

impl SeedConfig {
    pub fn new(num_owners: usize) -> Self {
        Self {
            num_owners,
            ..Default::default()
        }
    }

    pub fn with_categories(mut self, categories_per_owner: usize) -> Self {
        self.categories_per_owner = categories_per_owner;
        self
    }

    pub fn with_students(mut self, students_per_owner: usize) -> Self {
        self.students_per_owner = students_per_owner;
        self
    }

    pub fn with_rents(mut self, with_rents: bool) -> Self {
        self.with_rents = with_rents;
        self
    }

    pub fn total_students(&self) -> usize {
        self.num_owners * self.students_per_owner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_config_builder() {
        let config = SeedConfig::new(4).with_categories(2).with_students(10).with_rents(false);
        assert_eq!(config.num_owners, 4);
        assert_eq!(config.categories_per_owner, 2);
        assert_eq!(config.total_students(), 40);
        assert!(!config.with_rents);
    }
}
