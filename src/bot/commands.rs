use std::sync::Arc;
use teloxide::macros::BotCommands;
use teloxide::prelude::*;

use crate::bot::{self, AppState};
use crate::error::{parse_amount, BotError};
use crate::leaderboard::WindowKind;

#[derive(BotCommands, Clone)]
#[command(rename_rule = "snake_case", description = "Available commands:")]
pub enum BotCommand {
    #[command(description = "Show welcome message and quick actions")]
    Start,
    #[command(description = "Log water consumption, e.g. /log 0.5")]
    Log(String),
    #[command(description = "Show today's leaderboard")]
    LeaderboardDaily,
    #[command(description = "Show this week's leaderboard (since Monday)")]
    LeaderboardWeekly,
}

pub async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: BotCommand,
    state: Arc<AppState>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let user = match msg.from.as_ref() {
        Some(user) => user,
        None => return Ok(()),
    };
    let user_id = user.id.0 as i64;
    let username = bot::display_name(user);

    match cmd {
        BotCommand::Start => {
            bot.send_message(
                msg.chat.id,
                "Welcome to the Water Tracker Bot!\n\
                 Use /log <amount in liters> to record your water consumption.\n\
                 For example: /log 0.5\n\
                 Use /leaderboard_daily or /leaderboard_weekly to see where you \
                 stand against your friends.",
            )
            .reply_markup(bot::quick_actions_keyboard())
            .await?;
        }

        BotCommand::Log(raw) => {
            let reply = match parse_amount(&raw) {
                Ok(amount) => bot::log_amount(&state, user_id, &username, amount).await?,
                Err(BotError::Validation(reason)) => {
                    tracing::debug!(user_id, %reason, "rejected /log argument");
                    bot::USAGE_MESSAGE.to_string()
                }
                Err(e) => return Err(e.into()),
            };
            bot.send_message(msg.chat.id, reply).await?;
        }

        BotCommand::LeaderboardDaily => {
            let text = bot::leaderboard_text(&state, WindowKind::Daily).await?;
            bot.send_message(msg.chat.id, text).await?;
        }

        BotCommand::LeaderboardWeekly => {
            let text = bot::leaderboard_text(&state, WindowKind::Weekly).await?;
            bot.send_message(msg.chat.id, text).await?;
        }
    }

    Ok(())
}
