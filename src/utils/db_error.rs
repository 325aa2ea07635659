/// Name of the primary key constraint on the `slugs` table.
pub const SLUG_KEY_CONSTRAINT: &str = "slugs_pkey";

pub fn is_unique_violation_on_slug(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(SLUG_KEY_CONSTRAINT))
}
