//! Card lifecycle service: create, update, move, delete
//!
//! Every mutation runs in one transaction (card row, tag bindings, history
//! entry all-or-nothing). Approver notifications are queued during the
//! mutation and dispatched only after the commit succeeds; their failure
//! never affects the operation's result.

use serde::{Deserialize, Deserializer, Serialize};

use crate::auth::AuthUser;
use crate::db::{self, cards::Card, cards::NewCard, tags::Tag, users::User, users::UserBrief};
use crate::domain::{RealEstateType, RegionalCenter};
use crate::error::{AppError, ServiceResult};
use crate::services::notify::{self, Notification};
use crate::services::{tags, wip};
use crate::state::AppState;

/// Fixed textual prefix of every ticket number
pub const TICKET_PREFIX: &str = "CMD";

/// Render a sequence value as a ticket number, e.g. `CMD-0000042`
pub fn format_ticket(seq: i64) -> String {
    format!("{TICKET_PREFIX}-{seq:07}")
}

/// Distinguishes an omitted field from an explicit `null` in partial updates
fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CreateCard {
    pub title: String,
    pub description: Option<String>,
    pub position: Option<i32>,
    pub story_points: Option<i32>,
    pub column_id: i64,
    pub assignee_id: Option<i64>,
    pub approver_id: Option<i64>,
    pub real_estate_type: Option<String>,
    pub rc_mk: Option<String>,
    pub rc_zm: Option<String>,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateCard {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub position: Option<i32>,
    #[serde(default, deserialize_with = "double_option")]
    pub story_points: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub assignee_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub approver_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub real_estate_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub rc_mk: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub rc_zm: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct MoveCard {
    /// Source column, informational only
    pub from_column: Option<i64>,
    pub to_column: i64,
    pub new_position: i32,
}

/// Card with resolved assignee/approver/tag detail attached
#[derive(Debug, Serialize)]
pub struct CardDetail {
    #[serde(flatten)]
    pub card: Card,
    pub assignee: Option<UserBrief>,
    pub approver: Option<UserBrief>,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Serialize)]
pub struct DeletedCard {
    pub id: i64,
    pub title: String,
}

fn translate_real_estate(name: &str) -> Result<&'static str, AppError> {
    RealEstateType::from_name(name)
        .map(|t| t.display())
        .ok_or_else(|| AppError::validation(format!("Unknown real_estate_type: {name}")))
}

fn translate_rc(field: &str, name: &str) -> Result<&'static str, AppError> {
    RegionalCenter::from_name(name)
        .map(|v| v.display())
        .ok_or_else(|| AppError::validation(format!("Unknown {field}: {name}")))
}

async fn resolve_user(
    state: &AppState,
    id: Option<i64>,
    resource: &str,
) -> ServiceResult<Option<User>> {
    match id {
        None => Ok(None),
        Some(id) => {
            let user = db::users::find_by_id(&state.pool, id)
                .await?
                .ok_or_else(|| AppError::not_found(resource))?;
            Ok(Some(user))
        }
    }
}

/// History details for an update: only the supplied fields, raw
/// pre-translation values.
fn update_details_json(req: &UpdateCard) -> String {
    use serde_json::json;
    let mut map = serde_json::Map::new();
    if let Some(v) = &req.title {
        map.insert("title".into(), json!(v));
    }
    if let Some(v) = &req.description {
        map.insert("description".into(), json!(v));
    }
    if let Some(v) = req.position {
        map.insert("position".into(), json!(v));
    }
    if let Some(v) = &req.story_points {
        map.insert("story_points".into(), json!(v));
    }
    if let Some(v) = &req.assignee_id {
        map.insert("assignee_id".into(), json!(v));
    }
    if let Some(v) = &req.approver_id {
        map.insert("approver_id".into(), json!(v));
    }
    if let Some(v) = &req.real_estate_type {
        map.insert("real_estate_type".into(), json!(v));
    }
    if let Some(v) = &req.rc_mk {
        map.insert("rc_mk".into(), json!(v));
    }
    if let Some(v) = &req.rc_zm {
        map.insert("rc_zm".into(), json!(v));
    }
    if let Some(v) = &req.tags {
        map.insert("tags".into(), json!(v));
    }
    serde_json::Value::Object(map).to_string()
}

/// Notifications for an approver hand-over. The caller only invokes this
/// when the approver actually changed.
fn approver_change_notifications(
    old: Option<&User>,
    new: Option<&User>,
    card: &Card,
) -> Vec<Notification> {
    let mut out = Vec::new();
    if let Some(old) = old {
        out.push(Notification {
            contact: old.telegram.clone(),
            text: notify::approver_removed_message(card),
        });
    }
    if let Some(new) = new {
        out.push(Notification {
            contact: new.telegram.clone(),
            text: notify::approver_assigned_message(card),
        });
    }
    out
}

pub async fn create(state: &AppState, actor: &AuthUser, req: CreateCard) -> ServiceResult<CardDetail> {
    let column = db::columns::find_by_id(&state.pool, req.column_id)
        .await?
        .ok_or_else(|| AppError::not_found("Column"))?;

    if !wip::column_accepts_card(&state.pool, column.id).await {
        return Err(AppError::conflict(format!(
            "Column '{}' is at its WIP limit",
            column.title
        ))
        .into());
    }

    let assignee = resolve_user(state, req.assignee_id, "Assignee").await?;
    let approver = resolve_user(state, req.approver_id, "Approver").await?;

    let real_estate_type = req
        .real_estate_type
        .as_deref()
        .map(translate_real_estate)
        .transpose()?;
    let rc_mk = req
        .rc_mk
        .as_deref()
        .map(|n| translate_rc("rc_mk", n))
        .transpose()?;
    let rc_zm = req
        .rc_zm
        .as_deref()
        .map(|n| translate_rc("rc_zm", n))
        .transpose()?;

    let details = serde_json::to_string(&req).unwrap_or_default();

    let mut tx = state.pool.begin().await?;

    let ticket_number = format_ticket(db::cards::next_ticket_value(&mut *tx).await?);
    let card = db::cards::insert(
        &mut *tx,
        NewCard {
            title: &req.title,
            description: req.description.as_deref(),
            position: req.position,
            story_points: req.story_points,
            column_id: column.id,
            assignee_id: req.assignee_id,
            approver_id: req.approver_id,
            created_by: actor.id,
            real_estate_type,
            rc_mk,
            rc_zm,
            ticket_number: &ticket_number,
        },
    )
    .await?;

    let card_tags = match &req.tags {
        Some(raw) => tags::set_card_tags(&mut tx, card.id, raw).await?,
        None => Vec::new(),
    };

    db::history::append(&mut *tx, card.id, "created", Some(&details)).await?;

    tx.commit().await?;

    tracing::info!(
        card_id = card.id,
        ticket = %card.ticket_number,
        actor = %actor.username,
        "Card created"
    );

    if let Some(approver) = &approver {
        state
            .notifier
            .dispatch_all(&approver_change_notifications(None, Some(approver), &card))
            .await;
    }

    Ok(CardDetail {
        assignee: assignee.as_ref().map(UserBrief::from),
        approver: approver.as_ref().map(UserBrief::from),
        tags: card_tags,
        card,
    })
}

pub async fn update(
    state: &AppState,
    actor: &AuthUser,
    card_id: i64,
    req: UpdateCard,
) -> ServiceResult<CardDetail> {
    let current = db::cards::find_by_id(&state.pool, card_id)
        .await?
        .ok_or_else(|| AppError::not_found("Card"))?;

    // Resolve referenced users and translate enums before writing anything
    let assignee_override = match req.assignee_id {
        None => None,
        Some(None) => Some(None),
        Some(Some(id)) => Some(resolve_user(state, Some(id), "Assignee").await?),
    };
    let approver_override = match req.approver_id {
        None => None,
        Some(None) => Some(None),
        Some(Some(id)) => Some(resolve_user(state, Some(id), "Approver").await?),
    };
    let real_estate_override = match &req.real_estate_type {
        None => None,
        Some(None) => Some(None),
        Some(Some(name)) => Some(Some(translate_real_estate(name)?.to_string())),
    };
    let rc_mk_override = match &req.rc_mk {
        None => None,
        Some(None) => Some(None),
        Some(Some(name)) => Some(Some(translate_rc("rc_mk", name)?.to_string())),
    };
    let rc_zm_override = match &req.rc_zm {
        None => None,
        Some(None) => Some(None),
        Some(Some(name)) => Some(Some(translate_rc("rc_zm", name)?.to_string())),
    };

    let mut next = current.clone();
    if let Some(title) = &req.title {
        next.title = title.clone();
    }
    if let Some(description) = &req.description {
        next.description = description.clone();
    }
    if let Some(position) = req.position {
        next.position = Some(position);
    }
    if let Some(story_points) = req.story_points {
        next.story_points = story_points;
    }
    if let Some(assignee) = &assignee_override {
        next.assignee_id = assignee.as_ref().map(|u| u.id);
    }
    if let Some(approver) = &approver_override {
        next.approver_id = approver.as_ref().map(|u| u.id);
    }
    if let Some(value) = &real_estate_override {
        next.real_estate_type = value.clone();
    }
    if let Some(value) = &rc_mk_override {
        next.rc_mk = value.clone();
    }
    if let Some(value) = &rc_zm_override {
        next.rc_zm = value.clone();
    }

    let details = update_details_json(&req);

    let mut tx = state.pool.begin().await?;

    let updated = db::cards::update(&mut *tx, &next).await?;

    if let Some(raw) = &req.tags {
        tags::set_card_tags(&mut tx, updated.id, raw).await?;
    }

    db::history::append(&mut *tx, updated.id, "updated", Some(&details)).await?;

    tx.commit().await?;

    tracing::info!(card_id = updated.id, actor = %actor.username, "Card updated");

    // Approver diff against the pre-update row, dispatched post-commit
    if approver_override.is_some() && current.approver_id != updated.approver_id {
        let old_approver = match current.approver_id {
            Some(id) => db::users::find_by_id(&state.pool, id).await?,
            None => None,
        };
        let new_approver = approver_override.as_ref().and_then(|o| o.as_ref());
        state
            .notifier
            .dispatch_all(&approver_change_notifications(
                old_approver.as_ref(),
                new_approver,
                &updated,
            ))
            .await;
    }

    load_detail(state, updated).await
}

pub async fn move_card(
    state: &AppState,
    actor: &AuthUser,
    card_id: i64,
    req: MoveCard,
) -> ServiceResult<Card> {
    let card = db::cards::find_by_id(&state.pool, card_id)
        .await?
        .ok_or_else(|| AppError::not_found("Card"))?;

    let target = db::columns::find_by_id(&state.pool, req.to_column)
        .await?
        .ok_or_else(|| AppError::not_found("Target column"))?;

    if target.id != card.column_id && !wip::column_accepts_card(&state.pool, target.id).await {
        return Err(AppError::conflict(format!(
            "Column '{}' is at its WIP limit",
            target.title
        ))
        .into());
    }

    let mut tx = state.pool.begin().await?;

    db::history::append(
        &mut *tx,
        card.id,
        "move",
        Some(&format!(
            "Moved from column {} to column {}",
            card.column_id, target.id
        )),
    )
    .await?;
    db::cards::set_column(&mut *tx, card.id, target.id, req.new_position).await?;

    tx.commit().await?;

    tracing::info!(
        card_id = card.id,
        from = card.column_id,
        to = target.id,
        actor = %actor.username,
        "Card moved"
    );

    let moved = db::cards::find_by_id(&state.pool, card.id)
        .await?
        .ok_or_else(AppError::internal)?;
    Ok(moved)
}

pub async fn delete(state: &AppState, actor: &AuthUser, card_id: i64) -> ServiceResult<DeletedCard> {
    let card = db::cards::find_by_id(&state.pool, card_id)
        .await?
        .ok_or_else(|| AppError::not_found("Card"))?;

    let mut tx = state.pool.begin().await?;

    // Tag associations removed explicitly; comments and history rows go
    // with the card via FK cascade.
    db::tags::clear_card_tags(&mut *tx, card.id).await?;
    db::cards::delete(&mut *tx, card.id).await?;

    tx.commit().await?;

    tracing::info!(
        card_id = card.id,
        ticket = %card.ticket_number,
        actor = %actor.username,
        "Card deleted"
    );

    Ok(DeletedCard {
        id: card.id,
        title: card.title,
    })
}

/// Attach resolved assignee/approver/tag detail to a card row
pub async fn load_detail(state: &AppState, card: Card) -> ServiceResult<CardDetail> {
    let assignee = match card.assignee_id {
        Some(id) => db::users::find_by_id(&state.pool, id).await?,
        None => None,
    };
    let approver = match card.approver_id {
        Some(id) => db::users::find_by_id(&state.pool, id).await?,
        None => None,
    };
    let tags = db::tags::list_for_card(&state.pool, card.id).await?;
    Ok(CardDetail {
        assignee: assignee.as_ref().map(UserBrief::from),
        approver: approver.as_ref().map(UserBrief::from),
        tags,
        card,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_ticket_format() {
        assert_eq!(format_ticket(1), "CMD-0000001");
        assert_eq!(format_ticket(42), "CMD-0000042");
        assert_eq!(format_ticket(9_999_999), "CMD-9999999");
        // past seven digits the number keeps growing, no truncation
        assert_eq!(format_ticket(12_345_678), "CMD-12345678");
    }

    fn user(id: i64, username: &str, telegram: &str) -> User {
        User {
            id,
            username: username.to_string(),
            email: None,
            hashed_password: String::new(),
            telegram: telegram.to_string(),
            role: "USER".to_string(),
            is_active: true,
            created_at: Utc::now(),
        }
    }

    fn card() -> Card {
        Card {
            id: 1,
            title: "Ticket".to_string(),
            description: None,
            position: None,
            story_points: None,
            column_id: 1,
            assignee_id: None,
            approver_id: None,
            created_by: None,
            real_estate_type: None,
            rc_mk: None,
            rc_zm: None,
            ticket_number: "CMD-0000001".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_approver_handover_notifies_both_sides() {
        let old = user(1, "alice", "@alice");
        let new = user(2, "bob", "@bob");
        let ns = approver_change_notifications(Some(&old), Some(&new), &card());
        assert_eq!(ns.len(), 2);
        assert_eq!(ns[0].contact, "@alice");
        assert!(ns[0].text.contains("no longer"));
        assert_eq!(ns[1].contact, "@bob");
        assert!(ns[1].text.contains("assigned as the approver"));
    }

    #[test]
    fn test_approver_set_from_empty_notifies_new_only() {
        let new = user(2, "bob", "@bob");
        let ns = approver_change_notifications(None, Some(&new), &card());
        assert_eq!(ns.len(), 1);
        assert_eq!(ns[0].contact, "@bob");
    }

    #[test]
    fn test_approver_cleared_notifies_old_only() {
        let old = user(1, "alice", "@alice");
        let ns = approver_change_notifications(Some(&old), None, &card());
        assert_eq!(ns.len(), 1);
        assert_eq!(ns[0].contact, "@alice");
    }

    #[test]
    fn test_update_details_keeps_raw_supplied_fields_only() {
        let req = UpdateCard {
            title: Some("New title".to_string()),
            approver_id: Some(Some(5)),
            real_estate_type: Some(Some("OFFICE".to_string())),
            ..UpdateCard::default()
        };
        let details: serde_json::Value = serde_json::from_str(&update_details_json(&req)).unwrap();
        assert_eq!(details["title"], "New title");
        assert_eq!(details["approver_id"], 5);
        // pre-translation symbolic name, not the display value
        assert_eq!(details["real_estate_type"], "OFFICE");
        assert!(details.get("description").is_none());
        assert!(details.get("tags").is_none());
    }

    #[test]
    fn test_update_details_records_explicit_nulls() {
        let req = UpdateCard {
            approver_id: Some(None),
            ..UpdateCard::default()
        };
        let details: serde_json::Value = serde_json::from_str(&update_details_json(&req)).unwrap();
        assert!(details.get("approver_id").is_some());
        assert_eq!(details["approver_id"], serde_json::Value::Null);
    }

    #[test]
    fn test_partial_update_distinguishes_missing_from_null() {
        let req: UpdateCard =
            serde_json::from_str(r#"{"title": "T", "approver_id": null}"#).unwrap();
        assert_eq!(req.title.as_deref(), Some("T"));
        assert_eq!(req.approver_id, Some(None));
        assert_eq!(req.assignee_id, None);

        let req: UpdateCard = serde_json::from_str(r#"{"approver_id": 3}"#).unwrap();
        assert_eq!(req.approver_id, Some(Some(3)));
    }
}
