//! Conversation manager panel — list, create, rename, pin, archive, tags,
//! bulk selection, and import/export affordances.

use egui::{self, RichText, ScrollArea};

use widget_core::store::{ConversationStore, DEFAULT_CONVERSATION_ID};
use widget_types::conversation::Conversation;

use crate::state::{format_duration, UiState};
use crate::theme::*;

/// What the composition root should do after rendering the manager panel
pub enum ManagerAction {
    Select(String),
    Create(String),
    Rename { id: String, name: String },
    Delete(String),
    TogglePin(String),
    ToggleArchive(String),
    AddTag { id: String, tag: String },
    RemoveTag { id: String, tag: String },
    Import(String),
    Export(String),
    BulkExport(Vec<String>),
    BulkDelete(Vec<String>),
}

/// Render the conversation manager. Returns Some(action) when the user acted.
pub fn conversations_panel(
    ui: &mut egui::Ui,
    state: &mut UiState,
    store: &ConversationStore,
) -> Option<ManagerAction> {
    let mut action = None;

    ui.heading(RichText::new("Conversations").color(TEXT_PRIMARY));
    ui.separator();

    // Filter row
    ui.add(
        egui::TextEdit::singleline(&mut state.conversation_query)
            .hint_text("Search conversations...")
            .desired_width(f32::INFINITY),
    );
    ui.checkbox(&mut state.show_archived, "Show archived");

    // New conversation row
    ui.horizontal(|ui| {
        ui.add(
            egui::TextEdit::singleline(&mut state.new_name_draft)
                .hint_text("Conversation name")
                .desired_width(ui.available_width() - 56.0),
        );
        if ui.button("New").clicked() && !state.new_name_draft.trim().is_empty() {
            action = Some(ManagerAction::Create(
                state.new_name_draft.trim().to_string(),
            ));
            state.new_name_draft.clear();
        }
    });

    // Import (pasted JSON)
    if ui
        .selectable_label(state.show_import, "Import conversation")
        .clicked()
    {
        state.show_import = !state.show_import;
    }
    if state.show_import {
        ui.add(
            egui::TextEdit::multiline(&mut state.import_draft)
                .hint_text("Paste an exported conversation document")
                .desired_rows(4)
                .desired_width(f32::INFINITY),
        );
        if ui.button("Import").clicked() && !state.import_draft.trim().is_empty() {
            action = Some(ManagerAction::Import(state.import_draft.clone()));
            state.import_draft.clear();
            state.show_import = false;
        }
    }

    // Bulk actions
    if !state.checked.is_empty() {
        ui.horizontal(|ui| {
            let ids: Vec<String> = {
                let mut ids: Vec<String> = state.checked.iter().cloned().collect();
                ids.sort();
                ids
            };
            if ui
                .button(format!("Export ({})", state.checked.len()))
                .clicked()
            {
                action = Some(ManagerAction::BulkExport(ids.clone()));
            }
            if ui
                .button(
                    RichText::new(format!("Delete ({})", state.checked.len())).color(ERROR),
                )
                .clicked()
            {
                action = Some(ManagerAction::BulkDelete(ids));
            }
        });
    }

    ui.separator();

    let query = state.conversation_query.clone();
    let show_archived = state.show_archived;
    let selected_id = store.selected_id().to_string();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for conv in store.list_filtered(&query, show_archived) {
                if let Some(a) = render_conversation_row(ui, state, conv, &selected_id) {
                    action = Some(a);
                }
                ui.add_space(4.0);
            }

            ui.separator();
            render_selected_stats(ui, store.selected());
        });

    action
}

fn render_conversation_row(
    ui: &mut egui::Ui,
    state: &mut UiState,
    conv: &Conversation,
    selected_id: &str,
) -> Option<ManagerAction> {
    let mut action = None;
    let is_selected = conv.id == selected_id;
    let bg = if is_selected { BG_SURFACE } else { BG_SECONDARY };

    egui::Frame::default()
        .fill(bg)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                let mut checked = state.checked.contains(&conv.id);
                if ui.checkbox(&mut checked, "").changed() {
                    if checked {
                        state.checked.insert(conv.id.clone());
                    } else {
                        state.checked.remove(&conv.id);
                    }
                }

                let name = if conv.pinned {
                    format!("{} [pinned]", conv.name)
                } else {
                    conv.name.clone()
                };
                if ui
                    .selectable_label(is_selected, RichText::new(name).color(TEXT_PRIMARY))
                    .clicked()
                {
                    action = Some(ManagerAction::Select(conv.id.clone()));
                }
            });

            // Preview of the latest message
            if let Some(last) = conv.messages.last() {
                ui.label(
                    RichText::new(preview(&last.content))
                        .color(TEXT_SECONDARY)
                        .small(),
                );
            } else {
                ui.label(RichText::new("No messages").color(TEXT_SECONDARY).small());
            }

            // Tags with inline removal
            if !conv.tags.is_empty() {
                ui.horizontal_wrapped(|ui| {
                    for tag in &conv.tags {
                        if ui
                            .small_button(format!("{} x", tag))
                            .on_hover_text("Remove tag")
                            .clicked()
                        {
                            action = Some(ManagerAction::RemoveTag {
                                id: conv.id.clone(),
                                tag: tag.clone(),
                            });
                        }
                    }
                });
            }

            ui.horizontal_wrapped(|ui| {
                if ui
                    .small_button(if conv.pinned { "Unpin" } else { "Pin" })
                    .clicked()
                {
                    action = Some(ManagerAction::TogglePin(conv.id.clone()));
                }
                if ui
                    .small_button(if conv.archived { "Restore" } else { "Archive" })
                    .clicked()
                {
                    action = Some(ManagerAction::ToggleArchive(conv.id.clone()));
                }
                if ui.small_button("Rename").clicked() {
                    state.renaming = Some(conv.id.clone());
                    state.rename_draft = conv.name.clone();
                }
                if ui.small_button("Tag").clicked() {
                    state.tagging = Some(conv.id.clone());
                    state.tag_draft.clear();
                }
                if ui.small_button("Export").clicked() {
                    action = Some(ManagerAction::Export(conv.id.clone()));
                }
                if conv.id != DEFAULT_CONVERSATION_ID
                    && ui
                        .small_button(RichText::new("Delete").color(ERROR))
                        .clicked()
                {
                    action = Some(ManagerAction::Delete(conv.id.clone()));
                }
            });

            // Inline rename editor
            if state.renaming.as_deref() == Some(conv.id.as_str()) {
                ui.horizontal(|ui| {
                    ui.text_edit_singleline(&mut state.rename_draft);
                    if ui.small_button("Save").clicked() {
                        let name = state.rename_draft.trim().to_string();
                        if !name.is_empty() {
                            action = Some(ManagerAction::Rename {
                                id: conv.id.clone(),
                                name,
                            });
                        }
                        state.renaming = None;
                    }
                    if ui.small_button("Cancel").clicked() {
                        state.renaming = None;
                    }
                });
            }

            // Inline tag editor
            if state.tagging.as_deref() == Some(conv.id.as_str()) {
                ui.horizontal(|ui| {
                    ui.add(
                        egui::TextEdit::singleline(&mut state.tag_draft).hint_text("Add tag"),
                    );
                    if ui.small_button("Add").clicked() {
                        let tag = state.tag_draft.trim().to_string();
                        if !tag.is_empty() {
                            action = Some(ManagerAction::AddTag {
                                id: conv.id.clone(),
                                tag,
                            });
                        }
                        state.tag_draft.clear();
                    }
                    if ui.small_button("Done").clicked() {
                        state.tagging = None;
                    }
                });
            }
        });

    action
}

fn render_selected_stats(ui: &mut egui::Ui, conv: &Conversation) {
    let stats = &conv.stats;
    ui.label(RichText::new(&conv.name).color(ACCENT).strong());
    ui.label(
        RichText::new(format!("Messages: {}", stats.message_count))
            .color(TEXT_SECONDARY)
            .small(),
    );
    ui.label(
        RichText::new(format!("User messages: {}", stats.user_message_count))
            .color(TEXT_SECONDARY)
            .small(),
    );
    ui.label(
        RichText::new(format!(
            "Assistant messages: {}",
            stats.assistant_message_count
        ))
        .color(TEXT_SECONDARY)
        .small(),
    );
    ui.label(
        RichText::new(format!(
            "Avg response time: {}",
            format_duration(stats.average_response_time)
        ))
        .color(TEXT_SECONDARY)
        .small(),
    );
    if let Some(last_active) = &stats.last_active {
        ui.label(
            RichText::new(format!("Last active: {}", last_active))
                .color(TEXT_SECONDARY)
                .small(),
        );
    }
}

fn preview(content: &str) -> String {
    const MAX: usize = 30;
    if content.chars().count() <= MAX {
        content.to_string()
    } else {
        let truncated: String = content.chars().take(MAX).collect();
        format!("{}...", truncated)
    }
}
