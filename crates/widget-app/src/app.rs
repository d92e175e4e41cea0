//! Main egui application — composes the panels and owns the store.

use std::cell::RefCell;
use std::rc::Rc;

use egui::{self, CentralPanel, RichText, SidePanel, TopBottomPanel};

use widget_core::event_bus::EventBus;
use widget_core::exchange::{run_exchange, run_regeneration};
use widget_core::ports::ChatPort;
use widget_core::store::ConversationStore;
use widget_platform::chat::ChatbaseClient;
use widget_platform::download;
use widget_platform::storage::auto_detect_storage;
use widget_types::config::WidgetConfig;
use widget_types::{Result, WidgetError};
use widget_ui::panels::chat::{chat_panel, ChatAction};
use widget_ui::panels::conversations::{conversations_panel, ManagerAction};
use widget_ui::state::{NoticeLevel, UiState};
use widget_ui::theme;

/// The main application state
pub struct ChatWidgetApp {
    store: Rc<RefCell<ConversationStore>>,
    chat: Rc<dyn ChatPort>,
    event_bus: EventBus,
    ui_state: UiState,
    config_ok: bool,
    first_frame: bool,
}

impl ChatWidgetApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let config = WidgetConfig::from_env();
        let config_ok = config.is_complete();
        if !config_ok {
            log::error!(
                "Missing CHATBASE_API_KEY or CHATBOT_ID; chat requests will fail at send time"
            );
        }

        let storage = auto_detect_storage();
        let store = ConversationStore::load(storage);
        let chat: Rc<dyn ChatPort> = Rc::new(ChatbaseClient::new(config));

        Self {
            store: Rc::new(RefCell::new(store)),
            chat,
            event_bus: EventBus::new(),
            ui_state: UiState::new(),
            config_ok,
            first_frame: true,
        }
    }

    /// Send a user message through the exchange pipeline (async)
    fn dispatch_send(&mut self, text: String, ctx: &egui::Context) {
        let conversation_id = self.store.borrow().selected_id().to_string();
        self.ui_state.is_sending = true;

        let store = self.store.clone();
        let chat = self.chat.clone();
        let bus = self.event_bus.clone();
        let ctx = ctx.clone();

        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = run_exchange(store, chat, conversation_id, text, bus).await {
                log::error!("Send failed: {}", e);
            }
            ctx.request_repaint();
        });
    }

    /// Commit a message edit and regenerate the reply (async)
    fn dispatch_regeneration(&mut self, message_id: String, content: String, ctx: &egui::Context) {
        let conversation_id = self.store.borrow().selected_id().to_string();
        self.ui_state.is_sending = true;

        let store = self.store.clone();
        let chat = self.chat.clone();
        let bus = self.event_bus.clone();
        let ctx = ctx.clone();

        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) =
                run_regeneration(store, chat, conversation_id, message_id, content, bus).await
            {
                log::error!("Regeneration failed: {}", e);
            }
            ctx.request_repaint();
        });
    }

    fn handle_chat_action(&mut self, action: ChatAction, now: f64, ctx: &egui::Context) {
        match action {
            ChatAction::Send(text) => self.dispatch_send(text, ctx),
            ChatAction::SubmitEdit {
                message_id,
                content,
            } => self.dispatch_regeneration(message_id, content, ctx),
            ChatAction::DeleteMessage(message_id) => {
                let selected = self.store.borrow().selected_id().to_string();
                let result = self.store.borrow_mut().delete_message(&selected, &message_id);
                self.report(result, None, now);
            }
        }
    }

    fn handle_manager_action(&mut self, action: ManagerAction, now: f64) {
        match action {
            ManagerAction::Select(id) => {
                self.store.borrow_mut().select(&id);
            }
            ManagerAction::Create(name) => {
                let result = self.store.borrow_mut().create(&name).map(|_| ());
                self.report(result, Some("New conversation created"), now);
            }
            ManagerAction::Rename { id, name } => {
                let result = self.store.borrow_mut().rename(&id, &name);
                self.report(result, Some("Conversation renamed"), now);
            }
            ManagerAction::Delete(id) => {
                self.ui_state.checked.remove(&id);
                let result = self.store.borrow_mut().delete(&id);
                self.report(result, Some("Conversation deleted"), now);
            }
            ManagerAction::TogglePin(id) => {
                let result = self.store.borrow_mut().toggle_pinned(&id);
                self.report(result, None, now);
            }
            ManagerAction::ToggleArchive(id) => {
                let result = self.store.borrow_mut().toggle_archived(&id);
                self.report(result, None, now);
            }
            ManagerAction::AddTag { id, tag } => {
                let result = self.store.borrow_mut().add_tag(&id, &tag);
                self.report(result, None, now);
            }
            ManagerAction::RemoveTag { id, tag } => {
                let result = self.store.borrow_mut().remove_tag(&id, &tag);
                self.report(result, None, now);
            }
            ManagerAction::Import(json) => {
                let result = self.store.borrow_mut().import(&json).map(|_| ());
                self.report(result, Some("Conversation imported successfully"), now);
            }
            ManagerAction::Export(id) => {
                let result = self.export_one(&id);
                self.report(result, Some("Chat exported successfully"), now);
            }
            ManagerAction::BulkExport(ids) => {
                let count = ids.len();
                let result = self.export_bulk(&ids);
                let text = format!("{} conversations exported successfully", count);
                match result {
                    Ok(()) => self
                        .ui_state
                        .push_notice(NoticeLevel::Success, text, now),
                    Err(e) => self
                        .ui_state
                        .push_notice(NoticeLevel::Error, e.to_string(), now),
                }
            }
            ManagerAction::BulkDelete(ids) => {
                let result = self.store.borrow_mut().bulk_delete(&ids);
                match result {
                    Ok(removed) => {
                        self.ui_state.checked.clear();
                        self.ui_state.push_notice(
                            NoticeLevel::Success,
                            format!("{} conversations deleted", removed),
                            now,
                        );
                    }
                    Err(e) => self
                        .ui_state
                        .push_notice(NoticeLevel::Error, e.to_string(), now),
                }
            }
        }
    }

    fn export_one(&self, id: &str) -> Result<()> {
        let doc = self.store.borrow().export(id)?;
        let json = serde_json::to_string_pretty(&doc)?;
        download::save_json(&doc.file_name(), &json)
    }

    fn export_bulk(&self, ids: &[String]) -> Result<()> {
        let doc = self.store.borrow().bulk_export(ids)?;
        let json = serde_json::to_string_pretty(&doc)?;
        download::save_json(&doc.file_name(), &json)
    }

    /// Surface an operation outcome as a notice. Errors always get one;
    /// successes only when a message is given.
    fn report(
        &mut self,
        result: std::result::Result<(), WidgetError>,
        success: Option<&str>,
        now: f64,
    ) {
        match result {
            Ok(()) => {
                if let Some(text) = success {
                    self.ui_state.push_notice(NoticeLevel::Success, text, now);
                }
            }
            Err(e) => self
                .ui_state
                .push_notice(NoticeLevel::Error, e.to_string(), now),
        }
    }

    fn render_notices(&self, ctx: &egui::Context) {
        if self.ui_state.notices.is_empty() {
            return;
        }
        egui::Area::new(egui::Id::new("widget_notices"))
            .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-12.0, -12.0))
            .show(ctx, |ui| {
                for notice in &self.ui_state.notices {
                    let color = match notice.level {
                        NoticeLevel::Success => theme::SUCCESS,
                        NoticeLevel::Info => theme::TEXT_SECONDARY,
                        NoticeLevel::Error => theme::ERROR,
                    };
                    egui::Frame::default()
                        .fill(theme::BG_SECONDARY)
                        .corner_radius(theme::PANEL_ROUNDING)
                        .inner_margin(8.0)
                        .show(ui, |ui| {
                            ui.label(RichText::new(&notice.text).color(color));
                        });
                    ui.add_space(4.0);
                }
            });
    }
}

impl eframe::App for ChatWidgetApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.first_frame {
            theme::apply_theme(ctx);
            self.first_frame = false;
        }

        let now = ctx.input(|i| i.time);

        // Drain events from the exchange pipeline
        let events = self.event_bus.drain();
        if !events.is_empty() {
            self.ui_state.process_events(events, now);
            ctx.request_repaint();
        }
        self.ui_state.prune_notices(now);

        if self.ui_state.is_sending {
            ctx.request_repaint();
        }

        // ── Top bar ──────────────────────────────────────────
        TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new("Chat")
                        .strong()
                        .color(theme::ACCENT)
                        .size(16.0),
                );
                ui.separator();
                ui.label(
                    RichText::new(self.store.borrow().selected().name.clone())
                        .color(theme::TEXT_SECONDARY)
                        .small(),
                );
                if !self.config_ok {
                    ui.label(
                        RichText::new("API not configured")
                            .color(theme::WARNING)
                            .small(),
                    );
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .selectable_label(self.ui_state.show_manager, "Conversations")
                        .clicked()
                    {
                        self.ui_state.show_manager = !self.ui_state.show_manager;
                    }
                });
            });
        });

        // ── Conversation manager side panel ──────────────────
        let mut manager_action = None;
        if self.ui_state.show_manager {
            SidePanel::right("conversations_panel")
                .min_width(280.0)
                .max_width(380.0)
                .show(ctx, |ui| {
                    let store = self.store.borrow();
                    manager_action = conversations_panel(ui, &mut self.ui_state, &store);
                });
        }

        // ── Chat panel ───────────────────────────────────────
        let mut chat_action = None;
        CentralPanel::default().show(ctx, |ui| {
            let store = self.store.borrow();
            chat_action = chat_panel(ui, &mut self.ui_state, store.selected());
        });

        if let Some(action) = manager_action {
            self.handle_manager_action(action, now);
        }
        if let Some(action) = chat_action {
            self.handle_chat_action(action, now, ctx);
        }

        self.render_notices(ctx);
    }
}
