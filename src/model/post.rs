use chrono::{DateTime, Utc};

use super::Snowflake;

pub type Id = Snowflake;

pub const MAX_CONTENT_LEN: usize = 500;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Id,
    /// Author display name. A denormalized copy, not a reference to a user
    /// record.
    pub name: String,
    pub content: String,
    pub date: DateTime<Utc>,
    pub likes: i64,
    pub liked_by: Vec<String>,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Comment {
    pub text: String,
    pub author: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct NewPost {
    pub name: String,
    pub content: String,
}

impl Post {
    pub fn is_liked_by(&self, user_id: &str) -> bool {
        self.liked_by.iter().any(|id| id == user_id)
    }

    /// Toggle `user_id`'s like. Liking twice in a row unlikes; the counter
    /// never drops below zero.
    pub fn toggle_like(&mut self, user_id: &str) {
        if let Some(pos) = self.liked_by.iter().position(|id| id == user_id) {
            self.liked_by.remove(pos);
            self.likes = (self.likes - 1).max(0);
        } else {
            self.liked_by.push(user_id.to_owned());
            self.likes += 1;
        }
    }

    pub fn add_comment(&mut self, text: String, author: String) {
        self.comments.push(Comment {
            text,
            author,
            timestamp: Utc::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post() -> Post {
        Post {
            id: Snowflake::try_from(4302655488_i64).expect("valid snowflake"),
            name: "Alice".to_owned(),
            content: "hello world".to_owned(),
            date: Utc::now(),
            likes: 0,
            liked_by: Vec::new(),
            comments: Vec::new(),
        }
    }

    #[test]
    fn toggle_like_twice_restores_state() {
        let mut post = post();

        post.toggle_like("u1");
        assert_eq!(post.likes, 1);
        assert!(post.is_liked_by("u1"));

        post.toggle_like("u1");
        assert_eq!(post.likes, 0);
        assert!(!post.is_liked_by("u1"));
    }

    #[test]
    fn likes_from_distinct_users_accumulate() {
        let mut post = post();

        post.toggle_like("u1");
        post.toggle_like("u2");
        assert_eq!(post.likes, 2);

        post.toggle_like("u1");
        assert_eq!(post.likes, 1);
        assert!(post.is_liked_by("u2"));
    }

    #[test]
    fn counter_never_goes_negative() {
        let mut post = post();
        // Cache state fetched from elsewhere can list a liker without a
        // matching count.
        post.liked_by.push("u1".to_owned());

        post.toggle_like("u1");
        assert_eq!(post.likes, 0);
    }

    #[test]
    fn comments_append_in_order() {
        let mut post = post();

        post.add_comment("first".to_owned(), "Bob".to_owned());
        post.add_comment("second".to_owned(), "Carol".to_owned());

        assert_eq!(post.comments.len(), 2);
        assert_eq!(post.comments[0].text, "first");
        assert_eq!(post.comments[1].author, "Carol");
    }
}
