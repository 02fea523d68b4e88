//! Log database migrations - embedded SQL files
//!
//! Kept apart from the store migrations because logs.duckdb is a separate
//! file that can be deleted without touching user data.

/// All log migrations, in apply order.
pub const LOG_MIGRATIONS: &[(&str, &str)] = &[
    ("000_migrations.sql", include_str!("000_migrations.sql")),
    (
        "001_initial_schema.sql",
        include_str!("001_initial_schema.sql"),
    ),
];
