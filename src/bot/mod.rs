pub mod callbacks;
pub mod commands;

use chrono::Utc;
use teloxide::dispatching::UpdateFilterExt;
use teloxide::dptree;
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, User};

use crate::db::Database;
use crate::error::BotError;
use crate::leaderboard::{self, Window, WindowKind};

/// Shared application state, accessible from all handlers.
pub struct AppState {
    pub db: Database,
}

/// Build the teloxide update handler tree.
pub fn build_handler(
) -> teloxide::dispatching::UpdateHandler<Box<dyn std::error::Error + Send + Sync>> {
    let command_handler = Update::filter_message()
        .filter_command::<commands::BotCommand>()
        .endpoint(commands::handle_command);

    let callback_handler = Update::filter_callback_query()
        .endpoint(callbacks::handle_callback);

    dptree::entry()
        .branch(command_handler)
        .branch(callback_handler)
}

/// Telegram username if set, else the user's first name.
pub fn display_name(user: &User) -> String {
    user.username
        .clone()
        .unwrap_or_else(|| user.first_name.clone())
}

/// Quick-action keyboard sent with /start.
pub fn quick_actions_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![
            InlineKeyboardButton::callback("💧 0.25 L", "log_0.25"),
            InlineKeyboardButton::callback("💧 0.5 L", "log_0.5"),
            InlineKeyboardButton::callback("💧 1.0 L", "log_1.0"),
        ],
        vec![InlineKeyboardButton::callback("✏️ Custom amount", "custom")],
        vec![
            InlineKeyboardButton::callback("📊 Daily", "lb_daily"),
            InlineKeyboardButton::callback("📊 Weekly", "lb_weekly"),
        ],
    ])
}

pub const USAGE_MESSAGE: &str = "Usage: /log <amount in liters>";

/// Append one record stamped now and return the confirmation text.
pub async fn log_amount(
    state: &AppState,
    user_id: i64,
    username: &str,
    amount: f64,
) -> Result<String, BotError> {
    let record_id = state
        .db
        .append_consumption(user_id, username, amount, Utc::now())
        .await?;
    tracing::debug!(record_id, user_id, amount, "consumption logged");

    Ok(format!("Logged {} liters for {}.", amount, username))
}

/// Query the window, rank, and format the leaderboard text.
pub async fn leaderboard_text(state: &AppState, kind: WindowKind) -> Result<String, BotError> {
    let window = Window::of(kind, Utc::now());
    let records = state.db.consumption_between(window.start, window.end).await?;
    let ranked = leaderboard::rank(&records);

    Ok(leaderboard::format_leaderboard(&ranked, kind))
}
