// SPDX-FileCopyrightText: 2026 Pawbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telegram front end: dialogue state machine, keyboards, rendering and
//! the dptree dispatch schema.

pub mod callback;
pub mod handlers;
pub mod keyboards;
pub mod limiter;
pub mod render;
pub mod state;

use std::sync::Arc;

use pawbot_core::PawbotError;
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::dispatching::{dialogue, UpdateHandler};
use teloxide::dptree;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::handlers::BotContext;
use crate::state::State;

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    /// Open the main menu.
    Start,
    /// Reset the conversation and open the main menu.
    Restart,
    /// Show the help categories.
    Help,
}

/// The full update routing tree. Commands work from any state; everything
/// else is routed by the current dialogue state.
pub fn schema() -> UpdateHandler<PawbotError> {
    use dptree::case;

    let command_handler = teloxide::filter_command::<Command, _>()
        .branch(case![Command::Start].endpoint(handlers::on_start_command))
        .branch(case![Command::Restart].endpoint(handlers::on_start_command))
        .branch(case![Command::Help].endpoint(handlers::on_help_command));

    let message_handler = Update::filter_message()
        .branch(command_handler)
        .branch(case![State::Start].endpoint(handlers::on_main_menu))
        .branch(case![State::PostView(view)].endpoint(handlers::on_post_view_text))
        .branch(case![State::Filter(dlg)].endpoint(handlers::on_filter_text))
        .branch(case![State::About].endpoint(handlers::on_about_text))
        .branch(case![State::EasterEgg].endpoint(handlers::on_easter_egg));

    let callback_handler = Update::filter_callback_query()
        .branch(case![State::PostView(view)].endpoint(handlers::on_post_view_callback))
        .branch(case![State::Filter(dlg)].endpoint(handlers::on_filter_callback))
        .branch(case![State::EasterEgg].endpoint(handlers::on_photo_subscription_callback));

    dialogue::enter::<Update, InMemStorage<State>, State, _>()
        .branch(message_handler)
        .branch(callback_handler)
}

/// Run the dispatcher until shutdown.
pub async fn run(bot: Bot, ctx: Arc<BotContext>) {
    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![InMemStorage::<State>::new(), ctx])
        .default_handler(|_| async {})
        .error_handler(LoggingErrorHandler::with_custom_text("update handler error"))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}
