#[cfg(test)]
mod tests {
    use crate::config::*;
    use crate::conversation::*;
    use crate::error::*;
    use crate::event::*;
    use crate::export::*;
    use crate::message::*;

    // ─── Message Tests ───────────────────────────────────────

    #[test]
    fn test_message_user() {
        let msg = Message::user("Hello");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "Hello");
        assert!(!msg.is_edited);
        assert!(!msg.id.is_empty());
        assert!(!msg.timestamp.is_empty());
    }

    #[test]
    fn test_message_assistant() {
        let msg = Message::assistant("I can help");
        assert_eq!(msg.role, Role::Assistant);
        assert_eq!(msg.content, "I can help");
    }

    #[test]
    fn test_message_ids_are_unique() {
        let a = Message::user("one");
        let b = Message::user("two");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_message_timestamp_is_rfc3339() {
        let msg = Message::user("hi");
        assert!(chrono::DateTime::parse_from_rfc3339(&msg.timestamp).is_ok());
    }

    #[test]
    fn test_message_serialization_roundtrip() {
        let msg = Message::user("test input");
        let json = serde_json::to_string(&msg).unwrap();
        let deserialized: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, msg);
    }

    #[test]
    fn test_message_edited_flag_serialization() {
        let mut msg = Message::user("v1");
        // unedited messages omit the flag entirely
        let json = serde_json::to_string(&msg).unwrap();
        assert!(!json.contains("isEdited"));

        msg.is_edited = true;
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains(r#""isEdited":true"#));
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), r#""user""#);
        assert_eq!(
            serde_json::to_string(&Role::Assistant).unwrap(),
            r#""assistant""#
        );
    }

    #[test]
    fn test_role_deserialization() {
        let role: Role = serde_json::from_str(r#""assistant""#).unwrap();
        assert_eq!(role, Role::Assistant);
    }

    // ─── Conversation Tests ──────────────────────────────────

    #[test]
    fn test_conversation_new() {
        let conv = Conversation::new("c1".to_string(), "Trip Planning");
        assert_eq!(conv.id, "c1");
        assert_eq!(conv.name, "Trip Planning");
        assert!(conv.messages.is_empty());
        assert!(!conv.pinned);
        assert!(!conv.archived);
        assert!(conv.tags.is_empty());
        assert_eq!(conv.stats, ConversationStats::default());
    }

    #[test]
    fn test_conversation_last_activity() {
        let mut conv = Conversation::new("c1".to_string(), "Chat");
        assert!(conv.last_activity().is_none());

        conv.messages.push(Message::user("hi"));
        let ts = conv.messages[0].timestamp.clone();
        assert_eq!(conv.last_activity(), Some(ts.as_str()));
    }

    #[test]
    fn test_conversation_serialization_roundtrip() {
        let mut conv = Conversation::new("c1".to_string(), "Chat");
        conv.messages.push(Message::user("hello"));
        conv.tags.push("travel".to_string());
        conv.pinned = true;

        let json = serde_json::to_string(&conv).unwrap();
        let deserialized: Conversation = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.id, "c1");
        assert_eq!(deserialized.messages.len(), 1);
        assert_eq!(deserialized.tags, vec!["travel"]);
        assert!(deserialized.pinned);
    }

    #[test]
    fn test_conversation_deserializes_with_missing_flags() {
        // older persisted state may lack the optional fields
        let json = r#"{"id":"c1","name":"Chat","messages":[]}"#;
        let conv: Conversation = serde_json::from_str(json).unwrap();
        assert!(!conv.pinned);
        assert!(!conv.archived);
        assert!(conv.tags.is_empty());
        assert_eq!(conv.stats, ConversationStats::default());
    }

    // ─── Stats Tests ─────────────────────────────────────────

    #[test]
    fn test_stats_default_is_zeroed() {
        let stats = ConversationStats::default();
        assert_eq!(stats.message_count, 0);
        assert_eq!(stats.user_message_count, 0);
        assert_eq!(stats.assistant_message_count, 0);
        assert_eq!(stats.average_response_time, 0.0);
        assert!(stats.last_active.is_none());
    }

    #[test]
    fn test_stats_serialization_field_names() {
        let stats = ConversationStats {
            message_count: 2,
            user_message_count: 1,
            assistant_message_count: 1,
            average_response_time: 1000.0,
            last_active: Some("2026-08-06T12:00:00+00:00".to_string()),
        };
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains(r#""messageCount":2"#));
        assert!(json.contains(r#""userMessageCount":1"#));
        assert!(json.contains(r#""assistantMessageCount":1"#));
        assert!(json.contains(r#""averageResponseTime":1000.0"#));
        assert!(json.contains(r#""lastActive""#));
    }

    #[test]
    fn test_stats_last_active_omitted_when_absent() {
        let json = serde_json::to_string(&ConversationStats::default()).unwrap();
        assert!(!json.contains("lastActive"));
    }

    // ─── Export Document Tests ───────────────────────────────

    #[test]
    fn test_conversation_export_strips_ids() {
        let messages = vec![Message::user("hi"), Message::assistant("hello")];
        let doc = ConversationExport::new("Chat", &messages);

        assert_eq!(doc.name, "Chat");
        assert_eq!(doc.messages.len(), 2);
        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains(r#""exportDate""#));
        assert!(!json.contains(r#""id""#));
    }

    #[test]
    fn test_conversation_export_preserves_content() {
        let messages = vec![Message::user("Where should I go in Japan?")];
        let doc = ConversationExport::new("Trip Planning", &messages);
        assert_eq!(doc.messages[0].role, Role::User);
        assert_eq!(doc.messages[0].content, "Where should I go in Japan?");
        assert_eq!(doc.messages[0].timestamp, messages[0].timestamp);
    }

    #[test]
    fn test_export_file_name_sanitized() {
        let doc = ConversationExport {
            name: "Trip Planning!".to_string(),
            export_date: "2026-08-06T12:00:00+00:00".to_string(),
            messages: Vec::new(),
        };
        assert_eq!(doc.file_name(), "trip_planning__2026-08-06.json");
    }

    #[test]
    fn test_bulk_export_file_name() {
        let doc = BulkExport {
            export_date: "2026-08-06T12:00:00+00:00".to_string(),
            conversations: Vec::new(),
        };
        assert_eq!(doc.file_name(), "conversations_export_2026-08-06.json");
    }

    #[test]
    fn test_bulk_export_serialization_roundtrip() {
        let entry = BulkExportEntry {
            name: "Chat".to_string(),
            messages: vec![Message::user("hi")],
            tags: vec!["t1".to_string()],
            stats: ConversationStats::default(),
        };
        let doc = BulkExport::new(vec![entry]);
        let json = serde_json::to_string(&doc).unwrap();
        let deserialized: BulkExport = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.conversations.len(), 1);
        assert_eq!(deserialized.conversations[0].name, "Chat");
        assert_eq!(deserialized.conversations[0].tags, vec!["t1"]);
    }

    // ─── Config Tests ────────────────────────────────────────

    #[test]
    fn test_config_default_is_incomplete() {
        let config = WidgetConfig::default();
        assert!(!config.is_complete());
        assert_eq!(config.temperature, DEFAULT_TEMPERATURE);
    }

    #[test]
    fn test_config_complete() {
        let config = WidgetConfig {
            api_key: "key".to_string(),
            chatbot_id: "bot".to_string(),
            temperature: DEFAULT_TEMPERATURE,
        };
        assert!(config.is_complete());
    }

    #[test]
    fn test_config_incomplete_with_only_key() {
        let config = WidgetConfig {
            api_key: "key".to_string(),
            chatbot_id: String::new(),
            temperature: DEFAULT_TEMPERATURE,
        };
        assert!(!config.is_complete());
    }

    // ─── Event Tests ─────────────────────────────────────────

    #[test]
    fn test_event_serialization() {
        let event = WidgetEvent::ReplyReceived {
            conversation_id: "c1".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("ReplyReceived"));
        assert!(json.contains("c1"));
    }

    #[test]
    fn test_event_send_failed_roundtrip() {
        let event = WidgetEvent::SendFailed {
            conversation_id: "c1".to_string(),
            message: "HTTP 500".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        let deserialized: WidgetEvent = serde_json::from_str(&json).unwrap();
        if let WidgetEvent::SendFailed {
            conversation_id,
            message,
        } = deserialized
        {
            assert_eq!(conversation_id, "c1");
            assert_eq!(message, "HTTP 500");
        } else {
            panic!("Wrong variant");
        }
    }

    // ─── Error Tests ─────────────────────────────────────────

    #[test]
    fn test_error_display() {
        assert_eq!(
            WidgetError::Validation("bad name".to_string()).to_string(),
            "Invalid data: bad name"
        );
        assert_eq!(
            WidgetError::ProtectedConversation.to_string(),
            "The default conversation cannot be deleted"
        );
        assert_eq!(
            WidgetError::EmptyConversation.to_string(),
            "No messages to export"
        );
        assert_eq!(
            WidgetError::Remote("HTTP 502".to_string()).to_string(),
            "Chat service error: HTTP 502"
        );
    }

    #[test]
    fn test_error_from_serde() {
        let bad_json = "{{invalid}}";
        let serde_err = serde_json::from_str::<serde_json::Value>(bad_json).unwrap_err();
        let err: WidgetError = serde_err.into();
        assert!(matches!(err, WidgetError::Serialization(_)));
    }

    #[test]
    fn test_error_clone() {
        let err = WidgetError::Network("timeout".to_string());
        let cloned = err.clone();
        assert_eq!(err.to_string(), cloned.to_string());
    }
}
