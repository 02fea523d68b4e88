//! Account command - choose which account statements come from

use anyhow::Result;
use uuid::Uuid;

use super::{get_context, resolve_user};
use crate::output;

pub fn run(account: Option<String>, user: Option<Uuid>, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let user_id = resolve_user(&ctx, user)?;

    let Some(account) = account else {
        // No argument: show the current one
        let current = match ctx.user_service.get_account(user_id) {
            Ok(account) => Some(account),
            Err(e) if e.is_not_found() => None,
            Err(e) => return Err(e.into()),
        };
        if json {
            return output::json_ok(serde_json::json!({ "account": current }));
        }
        match current {
            Some(account) => println!("{}", account),
            None => output::warning("No account set. Run `monochat info` to list accounts."),
        }
        return Ok(());
    };

    ctx.user_service.set_account(user_id, &account)?;

    if json {
        return output::json_ok(serde_json::json!({ "account": account.trim() }));
    }
    output::success(&format!("Account set to {}", account.trim()));
    Ok(())
}
