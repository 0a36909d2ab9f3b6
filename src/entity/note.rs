// src/entity/note.rs
use serde::{Deserialize, Serialize};

/// A personal note. Only its author may see or change it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub slug: String,
    pub author_id: i64,
}

impl Note {
    pub fn is_authored_by(&self, user_id: i64) -> bool {
        self.author_id == user_id
    }

    /// Path of the detail page
    pub fn detail_path(&self) -> String {
        format!("/note/{}/", self.slug)
    }

    pub fn edit_path(&self) -> String {
        format!("/edit/{}/", self.slug)
    }

    pub fn delete_path(&self) -> String {
        format!("/delete/{}/", self.slug)
    }
}
