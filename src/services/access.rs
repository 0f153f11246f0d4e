use crate::error::{Error, Result};
use crate::models::user::{Principal, Role};

/// Single role gate for mutating use cases. Controls hidden in the UI are
/// cosmetic; this check is what actually refuses the operation.
pub fn require_role(principal: &Principal, minimum: Role) -> Result<()> {
    if principal.role.at_least(minimum) {
        return Ok(());
    }
    tracing::warn!(
        user_id = %principal.id,
        role = %principal.role,
        required = %minimum,
        "operation refused for insufficient role"
    );
    Err(Error::Forbidden(format!(
        "This action requires the {} role or higher",
        minimum
    )))
}
