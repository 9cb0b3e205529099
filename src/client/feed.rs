use chrono::{DateTime, Utc};

use crate::model::{post::Comment, Post};

/// A post as the view layer holds it.
#[derive(Debug, Clone)]
pub struct CachedPost {
    pub id: String,
    pub name: String,
    pub content: String,
    pub date: DateTime<Utc>,
    pub likes: i64,
    pub liked_by: Vec<String>,
    pub comments: Vec<CachedComment>,
}

/// Comments fetched from the server have no id; comments added locally get
/// a millisecond-timestamp one.
#[derive(Debug, Clone)]
pub struct CachedComment {
    pub id: Option<String>,
    pub text: String,
    pub author: String,
    pub timestamp: DateTime<Utc>,
}

impl From<Post> for CachedPost {
    fn from(post: Post) -> Self {
        CachedPost {
            id: post.id.to_string(),
            name: post.name,
            content: post.content,
            date: post.date,
            likes: post.likes,
            liked_by: post.liked_by,
            comments: post.comments.into_iter().map(CachedComment::from).collect(),
        }
    }
}

impl From<Comment> for CachedComment {
    fn from(comment: Comment) -> Self {
        CachedComment {
            id: None,
            text: comment.text,
            author: comment.author,
            timestamp: comment.timestamp,
        }
    }
}

/// In-memory feed, the port of the original app's post context.
///
/// `like` and `add_comment` mutate only this cache; the server is not told.
/// Every mutation made here is therefore lost on the next [`reload`].
/// Callers that want persistence
/// use [`ApiClient::like_post`](crate::client::ApiClient::like_post) and
/// [`ApiClient::add_comment`](crate::client::ApiClient::add_comment)
/// instead.
#[derive(Debug, Default)]
pub struct FeedCache {
    posts: Vec<CachedPost>,
}

impl FeedCache {
    pub fn new() -> FeedCache {
        FeedCache::default()
    }

    /// Replace the cache with a freshly fetched list, dropping any local
    /// mutations.
    pub fn reload(&mut self, posts: Vec<Post>) {
        self.posts = posts.into_iter().map(CachedPost::from).collect();
    }

    pub fn posts(&self) -> &[CachedPost] {
        &self.posts
    }

    pub fn get(&self, post_id: &str) -> Option<&CachedPost> {
        self.posts.iter().find(|post| post.id == post_id)
    }

    /// Toggle `user_id`'s like on the cached post. Liking twice in a row
    /// unlikes; the counter never drops below zero.
    pub fn like(&mut self, post_id: &str, user_id: &str) {
        let Some(post) = self.posts.iter_mut().find(|post| post.id == post_id) else {
            return;
        };

        if let Some(pos) = post.liked_by.iter().position(|id| id == user_id) {
            post.liked_by.remove(pos);
            post.likes = (post.likes - 1).max(0);
        } else {
            post.liked_by.push(user_id.to_owned());
            post.likes += 1;
        }
    }

    /// Append a comment with a client-generated timestamp id.
    pub fn add_comment(&mut self, post_id: &str, text: &str, author: &str) {
        let Some(post) = self.posts.iter_mut().find(|post| post.id == post_id) else {
            return;
        };

        let now = Utc::now();
        post.comments.push(CachedComment {
            id: Some(now.timestamp_millis().to_string()),
            text: text.to_owned(),
            author: author.to_owned(),
            timestamp: now,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Snowflake;

    fn feed_with_one_post() -> (FeedCache, String) {
        let post = Post {
            id: Snowflake::try_from(4302655488_i64).expect("valid snowflake"),
            name: "Alice".to_owned(),
            content: "hello world".to_owned(),
            date: Utc::now(),
            likes: 0,
            liked_by: Vec::new(),
            comments: Vec::new(),
        };
        let id = post.id.to_string();

        let mut feed = FeedCache::new();
        feed.reload(vec![post]);
        (feed, id)
    }

    #[test]
    fn like_toggled_twice_restores_the_post() {
        let (mut feed, id) = feed_with_one_post();

        feed.like(&id, "u1");
        let post = feed.get(&id).expect("post cached");
        assert_eq!(post.likes, 1);
        assert_eq!(post.liked_by, vec!["u1".to_owned()]);

        feed.like(&id, "u1");
        let post = feed.get(&id).expect("post cached");
        assert_eq!(post.likes, 0);
        assert!(post.liked_by.is_empty());
    }

    #[test]
    fn local_comment_gets_a_generated_id() {
        let (mut feed, id) = feed_with_one_post();

        feed.add_comment(&id, "nice post", "Bob");

        let post = feed.get(&id).expect("post cached");
        assert_eq!(post.comments.len(), 1);
        assert_eq!(post.comments[0].author, "Bob");
        assert!(post.comments[0].id.is_some());
    }

    #[test]
    fn local_mutations_are_lost_on_reload() {
        let (mut feed, id) = feed_with_one_post();

        feed.like(&id, "u1");
        feed.add_comment(&id, "nice post", "Bob");

        // Refetch returns the server's view, which never saw the mutations.
        let server_copy = Post {
            id: Snowflake::try_from(4302655488_i64).expect("valid snowflake"),
            name: "Alice".to_owned(),
            content: "hello world".to_owned(),
            date: Utc::now(),
            likes: 0,
            liked_by: Vec::new(),
            comments: Vec::new(),
        };
        feed.reload(vec![server_copy]);

        let post = feed.get(&id).expect("post cached");
        assert_eq!(post.likes, 0);
        assert!(post.liked_by.is_empty());
        assert!(post.comments.is_empty());
    }

    #[test]
    fn mutating_an_unknown_post_is_a_no_op() {
        let (mut feed, _id) = feed_with_one_post();
        feed.like("999", "u1");
        feed.add_comment("999", "text", "Bob");
        assert_eq!(feed.posts().len(), 1);
    }
}
