//! Tag normalizer: canonical names, lookup-or-create, replace-all binding

use sqlx::{Postgres, Transaction};

use crate::db;
use crate::error::{AppError, ServiceResult};

/// Marker character every canonical tag name starts with
pub const TAG_MARKER: char = '#';
/// Maximum length of a canonical tag name, marker included
pub const MAX_TAG_LEN: usize = 50;
/// Maximum number of tags a card may carry
pub const MAX_TAGS_PER_CARD: usize = 5;

/// Canonicalize one raw tag name: strip all leading markers, prepend
/// exactly one.
pub fn normalize(raw: &str) -> Result<String, AppError> {
    let stripped = raw.trim().trim_start_matches(TAG_MARKER);
    if stripped.is_empty() {
        return Err(AppError::validation("Tag name must not be empty"));
    }
    let canonical = format!("{TAG_MARKER}{stripped}");
    if canonical.chars().count() > MAX_TAG_LEN {
        return Err(AppError::validation(format!(
            "Tag name exceeds {MAX_TAG_LEN} characters"
        )));
    }
    Ok(canonical)
}

/// Normalize a raw tag list: canonical forms, duplicates dropped (first
/// occurrence wins), cap enforced after de-duplication.
pub fn canonicalize_all(raw: &[String]) -> Result<Vec<String>, AppError> {
    let mut names: Vec<String> = Vec::with_capacity(raw.len());
    for r in raw {
        let canonical = normalize(r)?;
        if !names.contains(&canonical) {
            names.push(canonical);
        }
    }
    if names.len() > MAX_TAGS_PER_CARD {
        return Err(AppError::validation(format!(
            "A card may carry at most {MAX_TAGS_PER_CARD} tags"
        )));
    }
    Ok(names)
}

/// Replace the card's tag set with the supplied raw list, creating missing
/// tags inside the caller's transaction so later lookups in the same
/// operation see them.
pub async fn set_card_tags(
    tx: &mut Transaction<'_, Postgres>,
    card_id: i64,
    raw: &[String],
) -> ServiceResult<Vec<db::tags::Tag>> {
    let names = canonicalize_all(raw)?;

    db::tags::clear_card_tags(&mut **tx, card_id).await?;

    let mut bound = Vec::with_capacity(names.len());
    for name in &names {
        let tag = match db::tags::find_by_name(&mut **tx, name).await? {
            Some(tag) => tag,
            None => db::tags::insert(&mut **tx, name).await?,
        };
        db::tags::bind_to_card(&mut **tx, card_id, tag.id).await?;
        bound.push(tag);
    }
    Ok(bound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_normalize_prepends_single_marker() {
        assert_eq!(normalize("foo").unwrap(), "#foo");
        assert_eq!(normalize("#foo").unwrap(), "#foo");
        assert_eq!(normalize("###foo").unwrap(), "#foo");
        assert_eq!(normalize("  bar  ").unwrap(), "#bar");
    }

    #[test]
    fn test_normalize_rejects_empty() {
        assert!(normalize("").is_err());
        assert!(normalize("   ").is_err());
        assert!(normalize("###").is_err());
    }

    #[test]
    fn test_normalize_length_cap() {
        // 49 chars + marker = 50: ok
        let ok = "a".repeat(49);
        assert_eq!(normalize(&ok).unwrap().chars().count(), 50);
        // 50 chars + marker = 51: rejected
        let too_long = "a".repeat(50);
        let err = normalize(&too_long).unwrap_err();
        assert_eq!(err.code, ErrorCode::Validation);
    }

    #[test]
    fn test_canonicalize_deduplicates_after_normalization() {
        let raw = vec!["foo".to_string(), "#foo".to_string(), "bar".to_string()];
        assert_eq!(canonicalize_all(&raw).unwrap(), vec!["#foo", "#bar"]);
    }

    #[test]
    fn test_canonicalize_cap_names_limit() {
        let raw: Vec<String> = (0..6).map(|i| format!("tag{i}")).collect();
        let err = canonicalize_all(&raw).unwrap_err();
        assert_eq!(err.code, ErrorCode::Validation);
        assert!(err.message.contains('5'));
    }

    #[test]
    fn test_canonicalize_cap_counts_distinct_only() {
        // six raw entries collapsing to five canonical names pass
        let raw = vec![
            "a".to_string(),
            "#a".to_string(),
            "b".to_string(),
            "c".to_string(),
            "d".to_string(),
            "e".to_string(),
        ];
        assert_eq!(canonicalize_all(&raw).unwrap().len(), 5);
    }
}
