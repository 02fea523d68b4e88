//! Info command - list the accounts behind the stored token

use anyhow::Result;
use colored::Colorize;
use uuid::Uuid;

use super::{get_context, resolve_user};
use crate::output;

pub fn run(user: Option<Uuid>, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let user_id = resolve_user(&ctx, user)?;
    let accounts = ctx.client_info_service.summary(user_id)?;

    if json {
        return output::json_ok(accounts);
    }

    if accounts.is_empty() {
        println!("No accounts found.");
        return Ok(());
    }

    let selected = ctx.user_service.get_account(user_id).ok();

    let mut table = output::create_table();
    table.set_header(vec!["", "Account", "Currency", "Balance", "Type"]);
    for account in &accounts {
        let marker = if selected.as_deref() == Some(account.id.as_str()) {
            "*".green().to_string()
        } else {
            String::new()
        };
        table.add_row(vec![
            marker,
            account.id.clone(),
            account.currency_code.to_string(),
            account.balance.to_string(),
            account.account_type.clone(),
        ]);
    }
    println!("{}", table);
    Ok(())
}
