//! Token command - store the Monobank personal token

use anyhow::Result;
use dialoguer::Password;
use uuid::Uuid;

use super::{get_context, resolve_user};
use crate::output;

pub fn run(token: Option<String>, user: Option<Uuid>, json: bool) -> Result<()> {
    let token = match token {
        Some(token) => token,
        None => Password::new()
            .with_prompt("Monobank personal token")
            .interact()?,
    };

    let ctx = get_context()?;
    let user_id = resolve_user(&ctx, user)?;
    ctx.user_service.set_token(user_id, &token)?;

    if json {
        return output::json_ok(serde_json::json!({ "user": user_id }));
    }
    output::success("Token saved");
    Ok(())
}
