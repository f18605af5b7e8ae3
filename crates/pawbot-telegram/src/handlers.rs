// SPDX-FileCopyrightText: 2026 Pawbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Update handlers: map inbound messages and callbacks, plus the current
//! dialogue state, onto engine queries and outbound messages.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use pawbot_config::model::PawbotConfig;
use pawbot_core::types::Category;
use pawbot_core::PawbotError;
use pawbot_engine::{BrowseEngine, Catalog, CatalogSnapshot};
use pawbot_storage::queries::users::NewUser;
use pawbot_storage::SqliteStore;
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::prelude::*;
use teloxide::types::{FileId, InputFile, MessageId, ParseMode};
use tracing::{debug, warn};

use crate::callback::CallbackData;
use crate::keyboards;
use crate::limiter::UploadLimiter;
use crate::render;
use crate::state::{FilterDialog, FilterParam, State, View};

pub type PawDialogue = Dialogue<State, InMemStorage<State>>;
pub type HandlerResult = Result<(), PawbotError>;

/// Shared per-process context injected into every handler.
pub struct BotContext {
    pub engine: BrowseEngine<SqliteStore>,
    pub catalog: Catalog,
    pub config: PawbotConfig,
    pub limiter: UploadLimiter,
}

impl BotContext {
    fn store(&self) -> &SqliteStore {
        self.engine.store()
    }
}

/// How long the "no such location" notice stays on screen.
const TRANSIENT_NOTICE: Duration = Duration::from_secs(3);

fn tg_err(e: teloxide::RequestError) -> PawbotError {
    PawbotError::Channel {
        message: format!("telegram request failed: {e}"),
        source: Some(Box::new(e)),
    }
}

fn dlg_err<E: std::fmt::Display>(e: E) -> PawbotError {
    PawbotError::Internal(format!("dialogue storage: {e}"))
}

/// Map a Telegram sender to a registration row.
fn new_user(user: &teloxide::types::User) -> NewUser {
    NewUser {
        id: user.id.0 as i64,
        username: user.username.clone(),
        first_name: Some(user.first_name.clone()),
        last_name: user.last_name.clone(),
        language_code: user.language_code.clone(),
        app_version: Some(env!("CARGO_PKG_VERSION").to_string()),
    }
}

/// The file id of the largest variant of an attached photo.
fn photo_file_id(msg: &Message) -> Option<String> {
    // Telegram orders sizes ascending; the last one is the largest.
    msg.photo().and_then(|sizes| sizes.last()).map(|size| size.file.id.0.clone())
}

// --- Commands ---

/// `/start` and `/restart`: register the sender and show the main menu.
pub async fn on_start_command(
    bot: Bot,
    dialogue: PawDialogue,
    msg: Message,
    ctx: Arc<BotContext>,
) -> HandlerResult {
    if let Some(user) = msg.from.as_ref() {
        let created = ctx.store().register_user(&new_user(user)).await?;
        if created {
            debug!(user_id = user.id.0, "registered new user");
        }
    }
    show_main_menu(&bot, &dialogue, msg.chat.id, &ctx).await
}

pub async fn on_help_command(bot: Bot, msg: Message, ctx: Arc<BotContext>) -> HandlerResult {
    let snapshot = ctx.catalog.snapshot();
    bot.send_message(msg.chat.id, snapshot.texts.message("help"))
        .parse_mode(ParseMode::Html)
        .reply_markup(keyboards::help_keyboard(&snapshot))
        .await
        .map_err(tg_err)?;
    Ok(())
}

async fn show_main_menu(
    bot: &Bot,
    dialogue: &PawDialogue,
    chat_id: ChatId,
    ctx: &BotContext,
) -> HandlerResult {
    let snapshot = ctx.catalog.snapshot();
    bot.send_message(chat_id, snapshot.texts.message("greeting"))
        .parse_mode(ParseMode::Html)
        .reply_markup(keyboards::start_keyboard(
            &snapshot,
            ctx.config.telegram.easter_egg_enabled,
        ))
        .await
        .map_err(tg_err)?;
    dialogue.update(State::Start).await.map_err(dlg_err)?;
    Ok(())
}

// --- Main menu (Start state) ---

pub async fn on_main_menu(
    bot: Bot,
    dialogue: PawDialogue,
    msg: Message,
    ctx: Arc<BotContext>,
) -> HandlerResult {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let snapshot = ctx.catalog.snapshot();

    if text == snapshot.texts.button("need_home") {
        bot.send_message(msg.chat.id, snapshot.texts.message("choose_pet_type"))
            .reply_markup(keyboards::pet_type_keyboard(&snapshot))
            .await
            .map_err(tg_err)?;
        dialogue
            .update(State::PostView(View::for_category(Category::NeedHome)))
            .await
            .map_err(dlg_err)?;
        return Ok(());
    }
    if text == snapshot.texts.button("help") {
        bot.send_message(msg.chat.id, snapshot.texts.message("help"))
            .parse_mode(ParseMode::Html)
            .reply_markup(keyboards::help_keyboard(&snapshot))
            .await
            .map_err(tg_err)?;
        return Ok(());
    }
    for category in [Category::NeedMoney, Category::NeedTemp, Category::NeedOther] {
        if text == snapshot.texts.button(&category.to_string()) {
            let view = View::for_category(category);
            return show_post_view(&bot, &dialogue, msg.chat.id, view, &ctx).await;
        }
    }
    if text == snapshot.texts.button("support_us") {
        bot.send_message(msg.chat.id, snapshot.texts.message("support_us"))
            .parse_mode(ParseMode::Html)
            .await
            .map_err(tg_err)?;
        return Ok(());
    }
    if text == snapshot.texts.button("volunteers") {
        bot.send_message(msg.chat.id, snapshot.texts.message("volunteers"))
            .parse_mode(ParseMode::Html)
            .await
            .map_err(tg_err)?;
        return Ok(());
    }
    if text == snapshot.texts.button("about") {
        bot.send_message(msg.chat.id, snapshot.texts.message("about"))
            .parse_mode(ParseMode::Html)
            .reply_markup(keyboards::back_keyboard(&snapshot))
            .await
            .map_err(tg_err)?;
        dialogue.update(State::About).await.map_err(dlg_err)?;
        return Ok(());
    }
    if ctx.config.telegram.easter_egg_enabled && text == snapshot.texts.button("easter_egg") {
        bot.send_message(msg.chat.id, snapshot.texts.message("easter_egg"))
            .reply_markup(keyboards::easter_egg_keyboard(&snapshot))
            .await
            .map_err(tg_err)?;
        dialogue.update(State::EasterEgg).await.map_err(dlg_err)?;
        return Ok(());
    }

    if text == snapshot.texts.button("back") {
        return show_main_menu(&bot, &dialogue, msg.chat.id, &ctx).await;
    }

    bot.send_message(msg.chat.id, snapshot.texts.message("use_buttons"))
        .await
        .map_err(tg_err)?;
    Ok(())
}

// --- Post view ---

/// Run the browse query for the view and show the result, editing the
/// existing view message when there is one.
async fn show_post_view(
    bot: &Bot,
    dialogue: &PawDialogue,
    chat_id: ChatId,
    mut view: View,
    ctx: &BotContext,
) -> HandlerResult {
    let snapshot = ctx.catalog.snapshot();
    let filter = view.filter();
    match ctx.engine.query(&filter, None).await? {
        None => {
            bot.send_message(chat_id, render::zero_results_text(&snapshot, &filter))
                .parse_mode(ParseMode::Html)
                .await
                .map_err(tg_err)?;
        }
        Some(page) => {
            let text = render::render_post(&snapshot, &page.card);
            let markup = keyboards::post_view_keyboard(&snapshot, &view, &page);
            view.view_message_id =
                Some(send_or_edit(bot, chat_id, view.view_message_id, &text, markup).await?);
        }
    }
    dialogue
        .update(State::PostView(view))
        .await
        .map_err(dlg_err)?;
    Ok(())
}

/// Edit the message in place; a failed edit (view message deleted by the
/// user) falls back to sending fresh.
async fn send_or_edit(
    bot: &Bot,
    chat_id: ChatId,
    message_id: Option<MessageId>,
    text: &str,
    markup: teloxide::types::InlineKeyboardMarkup,
) -> Result<MessageId, PawbotError> {
    if let Some(message_id) = message_id {
        let result = bot
            .edit_message_text(chat_id, message_id, text)
            .parse_mode(ParseMode::Html)
            .reply_markup(markup.clone())
            .await;
        match result {
            Ok(_) => return Ok(message_id),
            Err(e) if e.to_string().contains("message is not modified") => {
                return Ok(message_id);
            }
            Err(e) => {
                warn!(error = %e, "edit failed, sending a fresh view message");
            }
        }
    }
    let sent = bot
        .send_message(chat_id, text)
        .parse_mode(ParseMode::Html)
        .reply_markup(markup)
        .await
        .map_err(tg_err)?;
    Ok(sent.id)
}

pub async fn on_post_view_text(
    bot: Bot,
    dialogue: PawDialogue,
    msg: Message,
    view: View,
    ctx: Arc<BotContext>,
) -> HandlerResult {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let snapshot = ctx.catalog.snapshot();

    if text == snapshot.texts.button("back") {
        return show_main_menu(&bot, &dialogue, msg.chat.id, &ctx).await;
    }
    if let Some(pet_type) = snapshot.pet_type_by_button(text) {
        let mut view = view;
        view.pet_type = Some(pet_type.id);
        // Reply-keyboard presses start a fresh view message.
        view.view_message_id = None;
        return show_post_view(&bot, &dialogue, msg.chat.id, view, &ctx).await;
    }
    if let Some(location) = snapshot.location_by_button(text) {
        let mut view = view;
        view.location = Some(location.id);
        return show_post_view(&bot, &dialogue, msg.chat.id, view, &ctx).await;
    }

    // Unknown text in a browse screen reads as a location attempt.
    let notice = bot
        .send_message(msg.chat.id, snapshot.texts.message("no_such_location"))
        .await
        .map_err(tg_err)?;
    let bot = bot.clone();
    tokio::spawn(async move {
        tokio::time::sleep(TRANSIENT_NOTICE).await;
        if let Err(e) = bot.delete_message(notice.chat.id, notice.id).await {
            debug!(error = %e, "transient notice already gone");
        }
    });
    Ok(())
}

pub async fn on_post_view_callback(
    bot: Bot,
    dialogue: PawDialogue,
    q: CallbackQuery,
    view: View,
    ctx: Arc<BotContext>,
) -> HandlerResult {
    let snapshot = ctx.catalog.snapshot();
    let Some(raw) = q.data.as_deref() else {
        bot.answer_callback_query(q.id.clone()).await.map_err(tg_err)?;
        return Ok(());
    };

    let data = match CallbackData::from_str(raw) {
        Ok(data) => data,
        Err(e) => {
            warn!(error = %e, "rejecting callback payload");
            bot.answer_callback_query(q.id.clone())
                .text(snapshot.texts.message("stale_keyboard"))
                .show_alert(true)
                .await
                .map_err(tg_err)?;
            return Ok(());
        }
    };

    let Some((chat_id, message_id)) = callback_message(&q) else {
        bot.answer_callback_query(q.id.clone()).await.map_err(tg_err)?;
        return Ok(());
    };

    match data {
        CallbackData::Nav { .. } => {
            let Some((filter, cursor)) = data.nav_query() else {
                return Ok(());
            };
            match ctx.engine.query(&filter, Some(cursor)).await? {
                None => {
                    bot.answer_callback_query(q.id.clone())
                        .text(render::zero_results_text(&snapshot, &filter))
                        .show_alert(true)
                        .await
                        .map_err(tg_err)?;
                }
                Some(page) => {
                    // The payload's filters are authoritative; they may
                    // come from an older view message than the state.
                    let view = View {
                        category: filter.category,
                        location: filter.location,
                        pet_type: filter.pet_type,
                        view_message_id: Some(message_id),
                    };
                    let text = render::render_post(&snapshot, &page.card);
                    let markup = keyboards::post_view_keyboard(&snapshot, &view, &page);
                    send_or_edit(&bot, chat_id, Some(message_id), &text, markup).await?;
                    dialogue
                        .update(State::PostView(view))
                        .await
                        .map_err(dlg_err)?;
                    bot.answer_callback_query(q.id.clone()).await.map_err(tg_err)?;
                }
            }
        }
        CallbackData::OpenLocationFilter => {
            bot.edit_message_reply_markup(chat_id, message_id)
                .reply_markup(keyboards::location_filter_keyboard(&snapshot))
                .await
                .map_err(tg_err)?;
            dialogue
                .update(State::Filter(FilterDialog {
                    view: View {
                        view_message_id: Some(message_id),
                        ..view
                    },
                    param: FilterParam::Location,
                }))
                .await
                .map_err(dlg_err)?;
            bot.answer_callback_query(q.id.clone()).await.map_err(tg_err)?;
        }
        CallbackData::OpenPetTypeFilter => {
            bot.edit_message_reply_markup(chat_id, message_id)
                .reply_markup(keyboards::pet_type_filter_keyboard(&snapshot))
                .await
                .map_err(tg_err)?;
            dialogue
                .update(State::Filter(FilterDialog {
                    view: View {
                        view_message_id: Some(message_id),
                        ..view
                    },
                    param: FilterParam::PetType,
                }))
                .await
                .map_err(dlg_err)?;
            bot.answer_callback_query(q.id.clone()).await.map_err(tg_err)?;
        }
        _ => {
            bot.answer_callback_query(q.id.clone()).await.map_err(tg_err)?;
        }
    }
    Ok(())
}

// --- Filter screen ---

pub async fn on_filter_callback(
    bot: Bot,
    dialogue: PawDialogue,
    q: CallbackQuery,
    dlg: FilterDialog,
    ctx: Arc<BotContext>,
) -> HandlerResult {
    let snapshot = ctx.catalog.snapshot();
    let Some(raw) = q.data.as_deref() else {
        bot.answer_callback_query(q.id.clone()).await.map_err(tg_err)?;
        return Ok(());
    };

    let mut view = dlg.view;
    let selection = match (CallbackData::from_str(raw), dlg.param) {
        (Ok(CallbackData::SetLocation(id)), FilterParam::Location) => {
            view.location = id;
            true
        }
        (Ok(CallbackData::SetPetType(id)), FilterParam::PetType) => {
            view.pet_type = id;
            true
        }
        _ => false,
    };

    if !selection {
        warn!(payload = raw, "unexpected callback on filter screen");
        bot.answer_callback_query(q.id.clone())
            .text(snapshot.texts.message("stale_keyboard"))
            .show_alert(true)
            .await
            .map_err(tg_err)?;
        return Ok(());
    }

    let chat_id = callback_message(&q).map(|(chat, _)| chat);
    bot.answer_callback_query(q.id.clone()).await.map_err(tg_err)?;
    let Some(chat_id) = chat_id else {
        return Ok(());
    };

    let filter = view.filter();
    match ctx.engine.query(&filter, None).await? {
        None => {
            // Leave the old post on screen; explain below it.
            bot.send_message(chat_id, render::zero_results_text(&snapshot, &filter))
                .parse_mode(ParseMode::Html)
                .await
                .map_err(tg_err)?;
            dialogue
                .update(State::PostView(dlg.view))
                .await
                .map_err(dlg_err)?;
        }
        Some(page) => {
            let text = render::render_post(&snapshot, &page.card);
            let markup = keyboards::post_view_keyboard(&snapshot, &view, &page);
            view.view_message_id =
                Some(send_or_edit(&bot, chat_id, view.view_message_id, &text, markup).await?);
            dialogue
                .update(State::PostView(view))
                .await
                .map_err(dlg_err)?;
        }
    }
    Ok(())
}

/// Free text while the filter selector is open is treated as a location
/// name, matching the original keyboard-less entry path.
pub async fn on_filter_text(
    bot: Bot,
    dialogue: PawDialogue,
    msg: Message,
    dlg: FilterDialog,
    ctx: Arc<BotContext>,
) -> HandlerResult {
    on_post_view_text(bot, dialogue, msg, dlg.view, ctx).await
}

// --- About ---

pub async fn on_about_text(
    bot: Bot,
    dialogue: PawDialogue,
    msg: Message,
    ctx: Arc<BotContext>,
) -> HandlerResult {
    let snapshot = ctx.catalog.snapshot();
    if msg.text() == Some(snapshot.texts.button("back").as_str()) {
        return show_main_menu(&bot, &dialogue, msg.chat.id, &ctx).await;
    }
    bot.send_message(msg.chat.id, snapshot.texts.message("about"))
        .parse_mode(ParseMode::Html)
        .reply_markup(keyboards::back_keyboard(&snapshot))
        .await
        .map_err(tg_err)?;
    Ok(())
}

// --- Easter egg: funny photos ---

pub async fn on_easter_egg(
    bot: Bot,
    dialogue: PawDialogue,
    msg: Message,
    ctx: Arc<BotContext>,
) -> HandlerResult {
    let snapshot = ctx.catalog.snapshot();

    if let Some(file_id) = photo_file_id(&msg) {
        return accept_photo_upload(&bot, &msg, file_id, &snapshot, &ctx).await;
    }

    let Some(text) = msg.text() else {
        return Ok(());
    };
    if text == snapshot.texts.button("back") {
        return show_main_menu(&bot, &dialogue, msg.chat.id, &ctx).await;
    }
    if text == snapshot.texts.button("get_pic") {
        return serve_random_photo(&bot, &msg, &snapshot, &ctx).await;
    }
    bot.send_message(msg.chat.id, snapshot.texts.message("easter_egg"))
        .reply_markup(keyboards::easter_egg_keyboard(&snapshot))
        .await
        .map_err(tg_err)?;
    Ok(())
}

async fn accept_photo_upload(
    bot: &Bot,
    msg: &Message,
    file_id: String,
    snapshot: &CatalogSnapshot,
    ctx: &BotContext,
) -> HandlerResult {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };
    let user_id = user.id.0 as i64;

    if let Some(remaining) = ctx.limiter.check(user_id) {
        let wait = remaining.as_secs().max(1).to_string();
        bot.send_message(
            msg.chat.id,
            render::fill(&snapshot.texts.message("upload_cooldown"), &[&wait]),
        )
        .await
        .map_err(tg_err)?;
        return Ok(());
    }

    if let Some(stock_chat) = ctx.config.telegram.photo_stock_chat_id {
        bot.forward_message(ChatId(stock_chat), msg.chat.id, msg.id)
            .await
            .map_err(tg_err)?;
    }
    let stored = ctx
        .store()
        .insert_photo(&file_id, user_id, msg.caption())
        .await?;
    debug!(user_id, stored, "funny photo submitted");

    bot.send_message(msg.chat.id, snapshot.texts.message("upload_received"))
        .await
        .map_err(tg_err)?;
    Ok(())
}

async fn serve_random_photo(
    bot: &Bot,
    msg: &Message,
    snapshot: &CatalogSnapshot,
    ctx: &BotContext,
) -> HandlerResult {
    let Some(photo) = ctx.store().random_approved_photo().await? else {
        bot.send_message(msg.chat.id, snapshot.texts.message("no_photos"))
            .await
            .map_err(tg_err)?;
        return Ok(());
    };

    let subscribed = match msg.from.as_ref() {
        Some(user) => ctx
            .store()
            .get_user(user.id.0 as i64)
            .await?
            .map(|u| u.photos_subscribed)
            .unwrap_or(false),
        None => false,
    };
    let markup = keyboards::photo_subscription_keyboard(snapshot, subscribed);

    let request = bot.send_photo(msg.chat.id, InputFile::file_id(FileId(photo.file_id)));
    let request = match photo.caption {
        Some(caption) => request.caption(caption),
        None => request,
    };
    request.reply_markup(markup).await.map_err(tg_err)?;
    Ok(())
}

pub async fn on_photo_subscription_callback(
    bot: Bot,
    q: CallbackQuery,
    ctx: Arc<BotContext>,
) -> HandlerResult {
    let snapshot = ctx.catalog.snapshot();
    let Some(Ok(CallbackData::SubscribePhotos(subscribe))) =
        q.data.as_deref().map(CallbackData::from_str)
    else {
        bot.answer_callback_query(q.id.clone()).await.map_err(tg_err)?;
        return Ok(());
    };

    let user_id = q.from.id.0 as i64;
    ctx.store().set_photos_subscribed(user_id, subscribe).await?;

    if let Some((chat_id, message_id)) = callback_message(&q) {
        // Flip the toggle in place.
        bot.edit_message_reply_markup(chat_id, message_id)
            .reply_markup(keyboards::photo_subscription_keyboard(&snapshot, subscribe))
            .await
            .map_err(tg_err)?;
    }
    let confirmation = if subscribe {
        snapshot.texts.message("pics_subscribed")
    } else {
        snapshot.texts.message("pics_unsubscribed")
    };
    bot.answer_callback_query(q.id.clone())
        .text(confirmation)
        .await
        .map_err(tg_err)?;
    Ok(())
}

/// Chat and message id the callback's keyboard hangs off, when Telegram
/// still lets us see it.
fn callback_message(q: &CallbackQuery) -> Option<(ChatId, MessageId)> {
    q.message.as_ref().map(|m| (m.chat().id, m.id()))
}
