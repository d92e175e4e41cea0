//! Chat panel — message list, search, typing indicator, and input field.

use egui::{self, Align, Layout, RichText, ScrollArea, Vec2};

use widget_core::search;
use widget_types::conversation::Conversation;
use widget_types::message::{Message, Role};

use crate::state::{format_duration, EditDraft, UiState};
use crate::theme::*;

/// What the composition root should do after rendering the chat panel
pub enum ChatAction {
    /// Send a new user message
    Send(String),
    /// Commit an edit of a user message and regenerate the reply
    SubmitEdit { message_id: String, content: String },
    /// Remove one message
    DeleteMessage(String),
}

/// Render the chat panel. Returns Some(action) when the user acted.
pub fn chat_panel(
    ui: &mut egui::Ui,
    state: &mut UiState,
    conversation: &Conversation,
) -> Option<ChatAction> {
    let mut action = None;

    egui::Frame::default()
        .fill(BG_PRIMARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                render_header(ui, state, conversation);
                ui.separator();

                // Rebuilt per frame; fine at this data scale
                let visible = search::filter_messages(&conversation.messages, &state.search_query);
                let filtering = !state.search_query.trim().is_empty();

                let available_height = ui.available_height() - 60.0;
                ScrollArea::vertical()
                    .max_height(available_height)
                    .auto_shrink([false, false])
                    .stick_to_bottom(!filtering)
                    .show(ui, |ui| {
                        if visible.is_empty() && filtering {
                            ui.label(
                                RichText::new("No messages match the search")
                                    .color(TEXT_SECONDARY)
                                    .italics(),
                            );
                        }
                        for message in &visible {
                            if let Some(a) = render_message_row(ui, state, message) {
                                action = Some(a);
                            }
                            ui.add_space(4.0);
                        }

                        if state.is_sending {
                            egui::Frame::default()
                                .fill(ASSISTANT_BUBBLE)
                                .corner_radius(PANEL_ROUNDING)
                                .inner_margin(8.0)
                                .show(ui, |ui| {
                                    ui.label(
                                        RichText::new("Assistant is typing...")
                                            .color(TEXT_SECONDARY)
                                            .italics(),
                                    );
                                });
                        }
                    });

                ui.add_space(8.0);

                if let Some(text) = render_input_row(ui, state) {
                    action = Some(ChatAction::Send(text));
                }
            });
        });

    action
}

fn render_header(ui: &mut egui::Ui, state: &mut UiState, conversation: &Conversation) {
    ui.horizontal(|ui| {
        ui.heading(
            RichText::new(&conversation.name)
                .color(TEXT_PRIMARY)
                .strong(),
        );
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            let (status, color) = if state.is_sending {
                ("Waiting for reply...", WARNING)
            } else {
                ("Ready", SUCCESS)
            };
            ui.label(RichText::new(status).color(color).small());
        });
    });

    let stats = &conversation.stats;
    ui.label(
        RichText::new(format!(
            "{} messages · avg response {}",
            stats.message_count,
            format_duration(stats.average_response_time)
        ))
        .color(TEXT_SECONDARY)
        .small(),
    );

    ui.add_space(2.0);
    ui.add(
        egui::TextEdit::singleline(&mut state.search_query)
            .hint_text("Search messages...")
            .desired_width(f32::INFINITY),
    );
}

fn render_message_row(
    ui: &mut egui::Ui,
    state: &mut UiState,
    message: &Message,
) -> Option<ChatAction> {
    let mut action = None;

    let editing_this = state
        .editing
        .as_ref()
        .is_some_and(|e| e.message_id == message.id);

    let (label, label_color, bg) = match message.role {
        Role::User => ("You", ACCENT, USER_BUBBLE),
        Role::Assistant => ("Assistant", SUCCESS, ASSISTANT_BUBBLE),
    };

    egui::Frame::default()
        .fill(bg)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(label).color(label_color).strong().small());
                ui.label(
                    RichText::new(&message.timestamp)
                        .color(TEXT_SECONDARY)
                        .small(),
                );
                if message.is_edited {
                    ui.label(RichText::new("(edited)").color(TEXT_SECONDARY).small());
                }
            });

            if editing_this {
                let mut save = false;
                let mut cancel = false;
                if let Some(draft) = state.editing.as_mut() {
                    ui.text_edit_multiline(&mut draft.text);
                    ui.horizontal(|ui| {
                        save = ui.small_button("Save").clicked();
                        cancel = ui.small_button("Cancel").clicked();
                    });
                }
                if save {
                    if let Some(draft) = state.editing.take() {
                        let content = draft.text.trim().to_string();
                        if !content.is_empty() {
                            action = Some(ChatAction::SubmitEdit {
                                message_id: draft.message_id,
                                content,
                            });
                        }
                    }
                } else if cancel {
                    state.editing = None;
                }
            } else {
                ui.label(RichText::new(&message.content).color(TEXT_PRIMARY));
                ui.horizontal(|ui| {
                    if ui.small_button("Copy").clicked() {
                        ui.ctx().copy_text(message.content.clone());
                    }
                    if message.role == Role::User
                        && !state.is_sending
                        && ui.small_button("Edit").clicked()
                    {
                        state.editing = Some(EditDraft {
                            message_id: message.id.clone(),
                            text: message.content.clone(),
                        });
                    }
                    if ui.small_button("Delete").clicked() {
                        action = Some(ChatAction::DeleteMessage(message.id.clone()));
                    }
                });
            }
        });

    action
}

/// Input field plus send button. Returns Some(text) on submit.
fn render_input_row(ui: &mut egui::Ui, state: &mut UiState) -> Option<String> {
    let mut submitted = None;

    ui.horizontal(|ui| {
        let input = egui::TextEdit::singleline(&mut state.input_text)
            .hint_text("Type a message...")
            .desired_width(ui.available_width() - 70.0)
            .font(egui::FontId::proportional(14.0));

        let response = ui.add(input);

        let send_enabled = !state.input_text.trim().is_empty() && !state.is_sending;
        let send_btn = ui.add_enabled(
            send_enabled,
            egui::Button::new(RichText::new("Send").color(TEXT_PRIMARY))
                .fill(if send_enabled { ACCENT } else { BG_SURFACE })
                .corner_radius(PANEL_ROUNDING)
                .min_size(Vec2::new(60.0, 0.0)),
        );

        // Submit on Enter or button click
        if (response.lost_focus()
            && ui.input(|i| i.key_pressed(egui::Key::Enter))
            && send_enabled)
            || send_btn.clicked()
        {
            let text = state.input_text.trim().to_string();
            submitted = Some(text);
            state.input_text.clear();
            response.request_focus();
        }
    });

    submitted
}
