//! Tenant resolution and the shared list predicate.
//!
//! Every owner-scoped list runs two queries, a `COUNT(*)` and a page, and
//! both take their `WHERE` clause from [`TenantFilter::push_where`]. When the
//! scope is a tenant, `owner_id = $tenant` is always the first predicate.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, TimeZone, Utc};
use sqlx::{Postgres, QueryBuilder};

use hostelhub_core::AppError;
use hostelhub_models::{Claims, OwnerId, StudentStatus};

/// Which owners' rows a query may touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Rows of one owner only
    Tenant(OwnerId),
    /// Cross-tenant access, super-admin routes only
    All,
}

impl Scope {
    pub fn owner_id(&self) -> Option<OwnerId> {
        match self {
            Scope::Tenant(owner_id) => Some(*owner_id),
            Scope::All => None,
        }
    }
}

/// Resolves the tenant of a session.
///
/// Super-admin claims carry no tenant and are refused with 403.
pub fn resolve_tenant(claims: &Claims) -> Result<OwnerId, AppError> {
    claims
        .tenant_id()
        .map(OwnerId::new)
        .ok_or_else(|| AppError::forbidden("This session is not bound to a tenant"))
}

#[derive(Debug, Clone)]
pub struct TenantFilter {
    alias: &'static str,
    owner_id: Option<OwnerId>,
    search: Option<(String, &'static [&'static str])>,
    category_id: Option<i64>,
    student_id: Option<i64>,
    student_status: Option<StudentStatus>,
    created_from: Option<DateTime<Utc>>,
    created_until: Option<DateTime<Utc>>,
}

impl TenantFilter {
    /// Filter over `alias`, the table alias whose `owner_id` and
    /// `created_at` columns are constrained.
    pub fn new(scope: Scope, alias: &'static str) -> Self {
        Self {
            alias,
            owner_id: scope.owner_id(),
            search: None,
            category_id: None,
            student_id: None,
            student_status: None,
            created_from: None,
            created_until: None,
        }
    }

    /// Narrows a cross-tenant filter to one owner. A tenant scope is never
    /// widened or moved by this.
    pub fn owner(mut self, owner_id: Option<i64>) -> Self {
        if self.owner_id.is_none() {
            self.owner_id = owner_id.map(OwnerId::new);
        }
        self
    }

    /// Case-insensitive substring match over any of `columns`.
    pub fn search(mut self, term: Option<&str>, columns: &'static [&'static str]) -> Self {
        self.search = term
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| (like_pattern(t), columns));
        self
    }

    pub fn category(mut self, category_id: Option<i64>) -> Self {
        self.category_id = category_id;
        self
    }

    pub fn student(mut self, student_id: Option<i64>) -> Self {
        self.student_id = student_id;
        self
    }

    pub fn status(mut self, status: Option<StudentStatus>) -> Self {
        self.student_status = status;
        self
    }

    /// Inclusive calendar-day range over `created_at`, in UTC.
    pub fn created_between(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.created_from = from.map(start_of_day);
        self.created_until = to.and_then(|d| d.checked_add_days(Days::new(1)).map(start_of_day));
        self
    }

    /// Half-open instant range `[start, end)` over `created_at`.
    pub fn created_within(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.created_from = Some(start);
        self.created_until = Some(end);
        self
    }

    pub fn push_where(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        let a = self.alias;

        match self.owner_id {
            Some(owner_id) => {
                builder.push(format!(" WHERE {a}.owner_id = "));
                builder.push_bind(owner_id);
            }
            None => {
                builder.push(" WHERE TRUE");
            }
        }

        if let Some((pattern, columns)) = &self.search {
            builder.push(" AND (");
            for (i, column) in columns.iter().enumerate() {
                if i > 0 {
                    builder.push(" OR ");
                }
                builder.push(format!("{column} ILIKE "));
                builder.push_bind(pattern.clone());
            }
            builder.push(")");
        }

        if let Some(category_id) = self.category_id {
            builder.push(format!(" AND {a}.category_id = "));
            builder.push_bind(category_id);
        }

        if let Some(student_id) = self.student_id {
            if a == "s" {
                builder.push(" AND s.id = ");
            } else {
                builder.push(format!(" AND {a}.student_id = "));
            }
            builder.push_bind(student_id);
        }

        if let Some(status) = self.student_status {
            builder.push(format!(" AND {a}.status = "));
            builder.push_bind(status);
        }

        if let Some(from) = self.created_from {
            builder.push(format!(" AND {a}.created_at >= "));
            builder.push_bind(from);
        }

        if let Some(until) = self.created_until {
            builder.push(format!(" AND {a}.created_at < "));
            builder.push_bind(until);
        }
    }
}

/// Appends `ORDER BY <alias>.id DESC LIMIT .. OFFSET ..`.
pub fn push_page(builder: &mut QueryBuilder<'_, Postgres>, alias: &str, limit: i64, offset: i64) {
    builder.push(format!(" ORDER BY {alias}.id DESC LIMIT "));
    builder.push_bind(limit);
    builder.push(" OFFSET ");
    builder.push_bind(offset);
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// Escapes LIKE wildcards so user input only ever matches literally.
pub fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}
