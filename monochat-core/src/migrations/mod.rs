//! Store database migrations - embedded SQL files
//!
//! Compiled in with include_str!. Each entry is (file name, sql) and the
//! list is applied in order.

/// All store migrations, in apply order.
///
/// When adding one, create `NNN_description.sql` next to this file and
/// append it here.
pub const MIGRATIONS: &[(&str, &str)] = &[
    ("000_migrations.sql", include_str!("000_migrations.sql")),
    ("001_initial_schema.sql", include_str!("001_initial_schema.sql")),
];
