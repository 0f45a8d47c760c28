//! Wire types shared by the posts service and the screen.

use serde::{Deserialize, Serialize};

/// A post as returned by the posts API.
///
/// The API also sends `userId`; it is not displayed and is ignored on decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Service-assigned identifier
    pub id: i64,
    pub title: String,
    pub body: String,
}

/// Request body for creating a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub body: String,
}

impl NewPost {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Both fields carry content. Whitespace counts as content.
    pub fn is_complete(&self) -> bool {
        !self.title.is_empty() && !self.body.is_empty()
    }
}
