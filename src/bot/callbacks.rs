use std::sync::Arc;
use teloxide::prelude::*;

use crate::bot::{self, AppState};
use crate::error::{parse_amount, BotError};
use crate::leaderboard::WindowKind;

pub async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    state: Arc<AppState>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let data = match q.data.as_deref() {
        Some(d) => d,
        None => return Ok(()),
    };

    let user_id = q.from.id.0 as i64;
    let username = bot::display_name(&q.from);
    let chat_id = q.message.as_ref().map(|m| m.chat().id);

    // ── Quick-log buttons ──────────────────────────────────────────
    if let Some(raw_amount) = data.strip_prefix("log_") {
        let reply = match parse_amount(raw_amount) {
            Ok(amount) => bot::log_amount(&state, user_id, &username, amount).await?,
            Err(BotError::Validation(reason)) => {
                tracing::warn!(user_id, %reason, "malformed quick-log token");
                bot::USAGE_MESSAGE.to_string()
            }
            Err(e) => return Err(e.into()),
        };

        bot.answer_callback_query(&q.id).await?;
        if let Some(chat_id) = chat_id {
            bot.send_message(chat_id, reply).await?;
        }
        return Ok(());
    }

    // ── Custom amount ──────────────────────────────────────────────
    if data == "custom" {
        bot.answer_callback_query(&q.id).await?;
        if let Some(chat_id) = chat_id {
            bot.send_message(chat_id, bot::USAGE_MESSAGE).await?;
        }
        return Ok(());
    }

    // ── Leaderboards ───────────────────────────────────────────────
    let kind = match data {
        "lb_daily" => Some(WindowKind::Daily),
        "lb_weekly" => Some(WindowKind::Weekly),
        _ => None,
    };
    if let Some(kind) = kind {
        let text = bot::leaderboard_text(&state, kind).await?;
        bot.answer_callback_query(&q.id).await?;
        if let Some(chat_id) = chat_id {
            bot.send_message(chat_id, text).await?;
        }
        return Ok(());
    }

    // Unknown token: just clear the client spinner.
    bot.answer_callback_query(&q.id).await?;
    Ok(())
}
