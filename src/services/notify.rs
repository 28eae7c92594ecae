//! Outbound Telegram notifications
//!
//! Strictly fire-and-forget: every failure is absorbed and logged here,
//! never surfaced to the caller. Dispatch happens only after the owning
//! transaction has committed.

use std::time::Duration;

use crate::db::cards::Card;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";
const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// A message queued during a mutation and dispatched post-commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub contact: String,
    pub text: String,
}

#[derive(Clone)]
pub struct TelegramNotifier {
    token: Option<String>,
    client: reqwest::Client,
}

impl TelegramNotifier {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token,
            client: reqwest::Client::new(),
        }
    }

    /// Send one message. Returns whether delivery succeeded; never errors.
    pub async fn notify(&self, contact: &str, text: &str) -> bool {
        let Some(token) = &self.token else {
            tracing::warn!("TELEGRAM_BOT_TOKEN not set, notification skipped");
            return false;
        };

        let url = format!("{TELEGRAM_API_BASE}/bot{token}/sendMessage");
        let payload = serde_json::json!({
            "chat_id": contact,
            "text": text,
            "parse_mode": "Markdown",
        });

        match self
            .client
            .post(&url)
            .json(&payload)
            .timeout(SEND_TIMEOUT)
            .send()
            .await
        {
            Ok(resp) if resp.status().is_success() => {
                tracing::info!(contact, "Telegram notification sent");
                true
            }
            Ok(resp) => {
                tracing::error!(contact, status = %resp.status(), "Telegram API rejected message");
                false
            }
            Err(e) => {
                tracing::error!(contact, error = %e, "Telegram request failed");
                false
            }
        }
    }

    /// Dispatch a post-commit notification batch, absorbing all failures.
    pub async fn dispatch_all(&self, notifications: &[Notification]) {
        for n in notifications {
            self.notify(&n.contact, &n.text).await;
        }
    }
}

pub fn approver_assigned_message(card: &Card) -> String {
    format!(
        "🔔 *New approval assignment*\n\n\
         📋 *Ticket:* {} {}\n\
         📝 *Description:* {}\n\
         ⭐ *Story points:* {}\n\n\
         You have been assigned as the approver for this ticket.",
        card.ticket_number,
        card.title,
        card.description.as_deref().unwrap_or("not set"),
        card.story_points
            .map_or_else(|| "not set".to_string(), |p| p.to_string()),
    )
}

pub fn approver_removed_message(card: &Card) -> String {
    format!(
        "ℹ️ *Assignment changed*\n\n\
         📋 *Ticket:* {} {}\n\n\
         You are no longer the approver for this ticket.",
        card.ticket_number, card.title,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_card() -> Card {
        Card {
            id: 7,
            title: "Lease renewal".to_string(),
            description: Some("Extend the office lease".to_string()),
            position: Some(0),
            story_points: Some(3),
            column_id: 1,
            assignee_id: None,
            approver_id: Some(2),
            created_by: Some(1),
            real_estate_type: None,
            rc_mk: None,
            rc_zm: None,
            ticket_number: "CMD-0000042".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_assigned_message_contents() {
        let msg = approver_assigned_message(&sample_card());
        assert!(msg.contains("CMD-0000042"));
        assert!(msg.contains("Lease renewal"));
        assert!(msg.contains("Extend the office lease"));
        assert!(msg.contains("3"));
    }

    #[test]
    fn test_assigned_message_optional_fields() {
        let mut card = sample_card();
        card.description = None;
        card.story_points = None;
        let msg = approver_assigned_message(&card);
        assert!(msg.contains("not set"));
    }

    #[test]
    fn test_removed_message_contents() {
        let msg = approver_removed_message(&sample_card());
        assert!(msg.contains("CMD-0000042"));
        assert!(msg.contains("no longer the approver"));
    }
}
