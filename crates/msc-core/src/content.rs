//! Content records served by the backend.
//!
//! All records are immutable snapshots: the client only ever replaces them
//! wholesale by re-fetching. Fields use `#[serde(default)]` so a record with
//! a missing optional column still renders.

use serde::{Deserialize, Serialize};

/// A training program (course).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Program {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub duration: String,
    pub students: String,
    pub level: String,
    pub price: String,
    pub image: String,
    pub description: String,
    pub detailed_content: String,
    pub updated_at: String,
    pub highlights: Vec<String>,
    pub category: String,
}

/// Mentor reference embedded in a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectMentor {
    pub name: String,
    pub avatar: String,
}

/// A delivered training or consulting project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub image: String,
    pub category: String,
    pub status: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub mentors: Vec<ProjectMentor>,
    pub created_at: String,
    pub updated_at: String,
}

/// A blog post / alumni story.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogPost {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub image: String,
    pub author: String,
    pub author_avatar: String,
    pub publish_date: String,
    pub category: String,
    pub details_blog: String,
    pub read_time: String,
    pub views: u64,
    pub likes: u64,
}

/// Paginated collection as nested inside the `data` field of list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Paginated<T> {
    #[serde(default = "Vec::new", deserialize_with = "null_as_empty")]
    pub data: Vec<T>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub total_pages: u32,
}

impl<T> Paginated<T> {
    /// Splits the page into its items and the pagination metadata.
    pub fn into_parts(self) -> (Vec<T>, PageInfo) {
        let info = PageInfo {
            total: self.total,
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
        };
        (self.data, info)
    }
}

/// Pagination metadata of a fetched page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl PageInfo {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// Optional filters for list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub category: Option<String>,
}

impl ContentQuery {
    pub fn page(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
            category: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Query-string pairs in a stable order. Blank categories are dropped.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(category) = self.category.as_deref().filter(|c| !c.trim().is_empty()) {
            pairs.push(("category", category.to_string()));
        }
        pairs
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginated_projects_parse() {
        let json = r#"{
            "data": [{"id":"p1","slug":"alpha","title":"Alpha","mentors":null}],
            "total": 21, "page": 2, "limit": 9, "total_pages": 3
        }"#;
        let page: Paginated<Project> = serde_json::from_str(json).unwrap();
        let (items, info) = page.into_parts();
        assert_eq!(items.len(), 1);
        assert!(items[0].mentors.is_empty());
        assert_eq!(info.total_pages, 3);
        assert!(info.has_next());
        assert!(info.has_previous());
    }

    #[test]
    fn test_program_with_missing_fields() {
        let program: Program =
            serde_json::from_str(r#"{"id":"x","title":"Leadership","highlights":["a","b"]}"#)
                .unwrap();
        assert_eq!(program.highlights.len(), 2);
        assert_eq!(program.category, "");
    }

    #[test]
    fn test_query_pairs_skip_blank_category() {
        let query = ContentQuery::page(2, 9).with_category(" ");
        assert_eq!(
            query.to_pairs(),
            vec![("page", "2".to_string()), ("limit", "9".to_string())]
        );

        let query = ContentQuery::default().with_category("kinh-te");
        assert_eq!(query.to_pairs(), vec![("category", "kinh-te".to_string())]);
    }
}
