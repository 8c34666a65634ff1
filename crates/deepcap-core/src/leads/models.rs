//! Lead data model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A publishing or authoring organization known to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    pub title: String,
}

/// Raw page metadata returned by the serverless extractor.
///
/// Publisher and author are free-text names at this stage; resolving them
/// into [`Organization`] records is a separate call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawWebInfo {
    pub title: Option<String>,
    pub date: Option<String>,
    pub country: Option<String>,
    pub website: Option<String>,
    pub url: Option<String>,
    pub source_raw: Option<String>,
    pub author_raw: Option<String>,
}

/// Page metadata with publisher/author resolved into organization records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WebInfo {
    pub title: Option<String>,
    pub date: Option<String>,
    pub website: Option<String>,
    pub url: Option<String>,
    pub source: Option<Organization>,
    pub author: Option<Organization>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeadPriority {
    #[default]
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeadConfidentiality {
    #[default]
    Unprotected,
    Confidential,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeadSourceType {
    #[default]
    Website,
    Text,
}

/// A lead record under construction, before submission to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadDraft {
    pub client_id: String,
    pub url: Option<String>,
    pub title: Option<String>,
    pub website: Option<String>,
    pub published_on: Option<NaiveDate>,
    pub source: Option<Organization>,
    pub authors: Vec<Organization>,
    pub source_type: LeadSourceType,
    pub priority: LeadPriority,
    pub confidentiality: LeadConfidentiality,
    pub is_assessment_lead: bool,
}

impl LeadDraft {
    /// Fresh draft for a page URL, with the defaults a new capture starts
    /// from.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client_id: Uuid::new_v4().to_string(),
            url: Some(url.into()),
            title: None,
            website: None,
            published_on: None,
            source: None,
            authors: Vec::new(),
            source_type: LeadSourceType::Website,
            priority: LeadPriority::Low,
            confidentiality: LeadConfidentiality::Unprotected,
            is_assessment_lead: false,
        }
    }

    /// Fold extracted metadata into the draft.
    ///
    /// Only fields the extractor actually produced overwrite the draft;
    /// absent fields leave whatever is already there. Authors accumulate,
    /// skipping organizations already present.
    pub fn auto_fill(&mut self, info: &WebInfo) {
        if let Some(title) = non_empty(&info.title) {
            self.title = Some(title);
        }
        if let Some(website) = non_empty(&info.website) {
            self.website = Some(website);
        }
        if let Some(url) = non_empty(&info.url) {
            self.url = Some(url);
        }
        if let Some(date) = non_empty(&info.date)
            && let Some(published_on) = parse_published_on(&date)
        {
            self.published_on = Some(published_on);
        }
        if let Some(source) = &info.source {
            self.source = Some(source.clone());
        }
        if let Some(author) = &info.author
            && !self.authors.iter().any(|existing| existing.id == author.id)
        {
            self.authors.push(author.clone());
        }
    }
}

/// Published dates arrive as free text; anything that is not an ISO date is
/// left unset rather than guessed at.
pub fn parse_published_on(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_ref()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn org(id: &str, title: &str) -> Organization {
        Organization {
            id: id.to_string(),
            title: title.to_string(),
        }
    }

    #[test]
    fn test_new_draft_defaults() {
        let draft = LeadDraft::new("https://example.org/report");

        assert_eq!(draft.url.as_deref(), Some("https://example.org/report"));
        assert_eq!(draft.source_type, LeadSourceType::Website);
        assert_eq!(draft.priority, LeadPriority::Low);
        assert_eq!(draft.confidentiality, LeadConfidentiality::Unprotected);
        assert!(!draft.is_assessment_lead);
        assert!(!draft.client_id.is_empty());
    }

    #[test]
    fn test_auto_fill_overwrites_only_extracted_fields() {
        let mut draft = LeadDraft::new("https://example.org/report");
        draft.title = Some("Working title".to_string());
        draft.website = Some("example.org".to_string());

        let info = WebInfo {
            title: Some("Extracted title".to_string()),
            ..WebInfo::default()
        };
        draft.auto_fill(&info);

        assert_eq!(draft.title.as_deref(), Some("Extracted title"));
        // Untouched: the extractor produced no website.
        assert_eq!(draft.website.as_deref(), Some("example.org"));
    }

    #[test]
    fn test_auto_fill_skips_empty_strings() {
        let mut draft = LeadDraft::new("https://example.org/report");
        draft.title = Some("Working title".to_string());

        let info = WebInfo {
            title: Some("   ".to_string()),
            ..WebInfo::default()
        };
        draft.auto_fill(&info);

        assert_eq!(draft.title.as_deref(), Some("Working title"));
    }

    #[test]
    fn test_auto_fill_parses_published_date() {
        let mut draft = LeadDraft::new("https://example.org/report");

        let info = WebInfo {
            date: Some("2023-11-05".to_string()),
            ..WebInfo::default()
        };
        draft.auto_fill(&info);

        assert_eq!(
            draft.published_on,
            NaiveDate::from_ymd_opt(2023, 11, 5)
        );
    }

    #[test]
    fn test_auto_fill_leaves_unparseable_date_unset() {
        let mut draft = LeadDraft::new("https://example.org/report");

        let info = WebInfo {
            date: Some("last Tuesday".to_string()),
            ..WebInfo::default()
        };
        draft.auto_fill(&info);

        assert!(draft.published_on.is_none());
    }

    #[test]
    fn test_auto_fill_accumulates_authors_without_duplicates() {
        let mut draft = LeadDraft::new("https://example.org/report");

        let first = WebInfo {
            author: Some(org("12", "Relief Agency")),
            ..WebInfo::default()
        };
        draft.auto_fill(&first);
        draft.auto_fill(&first);

        let second = WebInfo {
            author: Some(org("34", "Field Office")),
            ..WebInfo::default()
        };
        draft.auto_fill(&second);

        assert_eq!(
            draft.authors,
            vec![org("12", "Relief Agency"), org("34", "Field Office")]
        );
    }

    #[test]
    fn test_raw_web_info_uses_camel_case_wire_names() {
        let raw: RawWebInfo = serde_json::from_str(
            r#"{
                "title": "Flood report",
                "sourceRaw": "Relief Agency",
                "authorRaw": "Field Office"
            }"#,
        )
        .unwrap();

        assert_eq!(raw.title.as_deref(), Some("Flood report"));
        assert_eq!(raw.source_raw.as_deref(), Some("Relief Agency"));
        assert_eq!(raw.author_raw.as_deref(), Some("Field Office"));
    }

    #[test]
    fn test_lead_draft_serializes_enums_screaming() {
        let draft = LeadDraft::new("https://example.org/report");
        let json = serde_json::to_value(&draft).unwrap();

        assert_eq!(json["sourceType"], "WEBSITE");
        assert_eq!(json["priority"], "LOW");
        assert_eq!(json["confidentiality"], "UNPROTECTED");
        assert_eq!(json["isAssessmentLead"], false);
    }
}
