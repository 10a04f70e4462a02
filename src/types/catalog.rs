use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::ops::classify::classify;
use crate::ops::versioning::{draft_title, next_draft_version};
use crate::types::course::{Course, CourseId, CourseStatus, FileName};
use crate::types::media::Content;

/// Drafts and published courses, kept in two disjoint lists.
///
/// Every mutation computes the new record before touching either list, so a
/// failed call leaves the catalog exactly as it was.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    drafts: Vec<Course>,
    published: Vec<Course>,
}

/// Read-only copy of the catalog handed to the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogSnapshot {
    pub drafts: Vec<Course>,
    pub published: Vec<Course>,
}

impl CatalogSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Catalog {
    pub fn new() -> Self {
        Catalog::default()
    }

    /// Classifies an uploaded file and stores it as a first-generation draft.
    pub fn ingest(&mut self, file_name: &str, content: Content) -> Result<Course> {
        let kind = match classify(file_name) {
            Ok(kind) => kind,
            Err(err) => {
                warn!(file_name, "rejected upload");
                return Err(err);
            }
        };

        let draft = Course {
            id: self.fresh_id(),
            title: file_name.to_string(),
            kind,
            status: CourseStatus::Draft,
            created_at: Utc::now(),
            content,
            original_id: None,
            draft_version: None,
            root_name: FileName::parse(file_name),
        };
        info!(id = %draft.id, %kind, title = %draft.title, "ingested draft");
        self.drafts.push(draft.clone());
        Ok(draft)
    }

    /// Stores `edited` as the next versioned draft in `source`'s lineage.
    ///
    /// The lineage is keyed by the root upload, so saving from a derived draft
    /// (or from a published copy) keeps counting on the same sequence and the
    /// title is always built from the root's file name. While the catalog
    /// still holds the source, its stored record decides kind and lineage.
    pub fn save_as_draft(&mut self, source: &Course, edited: Content) -> Course {
        let source = self.get(source.id).unwrap_or(source);
        let root = source.lineage_root();
        let version = next_draft_version(&self.drafts, root);

        let draft = Course {
            id: self.fresh_id(),
            title: draft_title(&source.root_name, version),
            kind: source.kind,
            status: CourseStatus::Draft,
            created_at: Utc::now(),
            content: edited,
            original_id: Some(root),
            draft_version: Some(version),
            root_name: source.root_name.clone(),
        };
        info!(id = %draft.id, %root, version, title = %draft.title, "saved draft version");
        self.drafts.push(draft.clone());
        draft
    }

    /// Publishes a copy of the course with the given id.
    ///
    /// Drafts are searched before published courses; publishing an already
    /// published course adds another published copy. The source is kept.
    pub fn publish(&mut self, id: CourseId) -> Result<Course> {
        let source = self.lookup(id)?;
        let content = source.content.clone();
        self.publish_from(id, content)
    }

    /// Publishes the course with the given id using content produced by an
    /// editing session instead of the stored payload.
    pub fn publish_edited(&mut self, id: CourseId, edited: Content) -> Result<Course> {
        self.publish_from(id, edited)
    }

    /// Removes the course from whichever list holds it. Unknown ids are ignored.
    pub fn delete(&mut self, id: CourseId) -> Option<Course> {
        let removed = Self::remove_from(&mut self.drafts, id)
            .or_else(|| Self::remove_from(&mut self.published, id));
        match &removed {
            Some(course) => info!(%id, status = ?course.status, "deleted course"),
            None => debug!(%id, "delete of unknown course ignored"),
        }
        removed
    }

    pub fn get(&self, id: CourseId) -> Option<&Course> {
        self.drafts
            .iter()
            .chain(self.published.iter())
            .find(|c| c.id == id)
    }

    pub fn drafts(&self) -> &[Course] {
        &self.drafts
    }

    pub fn published(&self) -> &[Course] {
        &self.published
    }

    /// Drafts derived from `root`, oldest version first.
    pub fn lineage(&self, root: CourseId) -> Vec<&Course> {
        let mut drafts: Vec<&Course> = self
            .drafts
            .iter()
            .filter(|d| d.original_id == Some(root))
            .collect();
        drafts.sort_by_key(|d| d.draft_version);
        drafts
    }

    pub fn snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            drafts: self.drafts.clone(),
            published: self.published.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.drafts.len() + self.published.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty() && self.published.is_empty()
    }

    fn publish_from(&mut self, id: CourseId, content: Content) -> Result<Course> {
        let source = self.lookup(id)?;
        let published = Course {
            id: self.fresh_id(),
            title: source.title.clone(),
            kind: source.kind,
            status: CourseStatus::Published,
            created_at: Utc::now(),
            content,
            original_id: Some(source.lineage_root()),
            draft_version: source.draft_version,
            root_name: source.root_name.clone(),
        };
        info!(source = %id, id = %published.id, title = %published.title, "published course");
        self.published.push(published.clone());
        Ok(published)
    }

    fn lookup(&self, id: CourseId) -> Result<&Course> {
        self.drafts
            .iter()
            .find(|c| c.id == id)
            .or_else(|| self.published.iter().find(|c| c.id == id))
            .ok_or_else(|| {
                warn!(%id, "course not found");
                Error::NotFound(id)
            })
    }

    // v4 collisions are not expected, but an id must never be reused while the
    // catalog is alive.
    fn fresh_id(&self) -> CourseId {
        loop {
            let id = CourseId::new();
            if self.get(id).is_none() {
                return id;
            }
        }
    }

    fn remove_from(list: &mut Vec<Course>, id: CourseId) -> Option<Course> {
        let idx = list.iter().position(|c| c.id == id)?;
        Some(list.remove(idx))
    }
}
