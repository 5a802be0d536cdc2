//! Owner scoping of list fetches.

use woundcare_auth::SessionManager;
use woundcare_core::traits::Record;
use woundcare_core::types::FilterField;

/// Filter restricting `E` to rows owned by the signed-in user.
///
/// Without a session (or when the session cannot be resolved) the fetch is
/// left unscoped and row visibility is up to the service's policies.
pub async fn owner_scope<E: Record>(sessions: &SessionManager) -> Vec<FilterField> {
    match (E::OWNER_COLUMN, sessions.current_user().await) {
        (Some(column), Ok(Some(ctx))) => vec![FilterField::eq(column, ctx.user_id)],
        _ => Vec::new(),
    }
}
