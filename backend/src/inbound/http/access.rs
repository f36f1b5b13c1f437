//! Admin gate for privileged handlers.

use crate::domain::ports::AccountsQuery;
use crate::domain::{Error, ErrorCode, UserAccount};
use crate::inbound::http::session::SessionContext;

/// Resolve the signed-in account and require its admin flag.
///
/// A session pointing at an account that no longer exists is treated as
/// signed out.
///
/// # Errors
///
/// `401` without a session, `403` for non-admins, otherwise whatever the
/// accounts port reports.
pub async fn require_admin(
    session: &SessionContext,
    accounts: &dyn AccountsQuery,
) -> Result<UserAccount, Error> {
    let account_id = session.require_account_id()?;
    let account = accounts
        .fetch_account(&account_id)
        .await
        .map_err(|error| match error.code() {
            ErrorCode::NotFound => Error::unauthorized("login required"),
            _ => error,
        })?;
    if account.is_admin() {
        Ok(account)
    } else {
        Err(Error::forbidden("admin access required"))
    }
}
