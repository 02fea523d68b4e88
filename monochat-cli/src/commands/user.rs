//! User command - select the user CLI commands act for

use anyhow::Result;
use uuid::Uuid;

use super::{get_context, get_data_dir};
use crate::output;

/// Register `user` (or a fresh id) and make it the default
pub fn run(user: Option<Uuid>, chat_id: Option<i64>, json: bool) -> Result<()> {
    let mut ctx = get_context()?;
    let user_id = user.unwrap_or_else(Uuid::new_v4);

    if !ctx.user_service.exists(user_id)? {
        ctx.user_service.register(user_id)?;
    }
    if let Some(chat_id) = chat_id {
        ctx.user_service.link_chat(chat_id, user_id)?;
    }

    ctx.config.default_user = Some(user_id);
    ctx.config.save(&get_data_dir()?)?;

    if json {
        return output::json_ok(serde_json::json!({
            "user": user_id,
            "chatId": chat_id,
        }));
    }

    output::success(&format!("Default user: {}", user_id));
    if let Some(chat_id) = chat_id {
        output::info(&format!("Linked chat {}", chat_id));
    }
    Ok(())
}
