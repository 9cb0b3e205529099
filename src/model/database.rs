use chrono::{DateTime, Utc};
use log::{debug, info, trace};
use rusqlite::{Connection, OptionalExtension, Result as SqlResult, Row};

use super::{post, Post, User};

pub struct Database {
    conn: Connection,
}

/// Build the database.
impl Database {
    pub fn build(path: &str) -> SqlResult<Database> {
        let conn = Database::init_db(path)?;
        let db = Database { conn };
        Ok(db)
    }

    fn init_db(path: &str) -> SqlResult<Connection> {
        let conn = Connection::open(path)?;

        trace!("Opened database connection.");
        trace!("Initializing database...");

        conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                id         INTEGER PRIMARY KEY,
                name       TEXT NOT NULL,
                email      TEXT NOT NULL UNIQUE,
                password   TEXT NOT NULL,
                created_at TEXT NOT NULL
            )",
            (),
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS posts (
                id       INTEGER PRIMARY KEY,
                name     TEXT NOT NULL,
                content  TEXT NOT NULL,
                date     TEXT NOT NULL,
                likes    INTEGER NOT NULL DEFAULT 0,
                liked_by TEXT NOT NULL DEFAULT '[]',
                comments TEXT NOT NULL DEFAULT '[]'
            )",
            (),
        )?;

        info!("Finished initializing database");

        Ok(conn)
    }
}

/// User stuff
impl Database {
    pub fn add_user(&self, user: &User) -> SqlResult<()> {
        debug!("Adding user {} to database", user.id.id());
        self.conn.execute(
            "INSERT INTO users (id, name, email, password, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
            (
                user.id.id(),
                user.name.as_str(),
                user.email.as_str(),
                user.password.as_str(),
                user.created_at.to_rfc3339(),
            ),
        )?;
        Ok(())
    }

    /// Emails are stored lowercased, so lookups are case-insensitive as long
    /// as callers lowercase the needle.
    pub fn get_user_by_email(&self, email: &str) -> SqlResult<Option<User>> {
        debug!("Getting user (email: {})", email);
        self.conn
            .query_row("SELECT * FROM users WHERE email=?1", (email,), |row| {
                Ok(User {
                    id: get_snowflake_column(row, 0)?,
                    name: row.get(1)?,
                    email: row.get(2)?,
                    password: row.get(3)?,
                    created_at: get_datetime_column(row, 4)?,
                })
            })
            .optional()
    }
}

/// Post stuff
impl Database {
    pub fn add_post(&self, post: &Post) -> SqlResult<()> {
        debug!("Adding post {} to database", post.id.id());

        self.conn.execute(
            "INSERT INTO posts (id, name, content, date, likes, liked_by, comments)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            (
                post.id.id(),
                post.name.as_str(),
                post.content.as_str(),
                post.date.to_rfc3339(),
                post.likes,
                to_json(&post.liked_by)?,
                to_json(&post.comments)?,
            ),
        )?;

        debug!("Added post {} to database", post.id.id());

        Ok(())
    }

    pub fn get_post(&self, id: &post::Id) -> SqlResult<Option<Post>> {
        debug!("Getting post {}", id.id());
        self.conn
            .query_row("SELECT * FROM posts WHERE id=?1", (id.id(),), map_post)
            .optional()
    }

    /// All posts, newest first. The id breaks ties between posts created in
    /// the same instant.
    pub fn get_posts(&self) -> SqlResult<Vec<Post>> {
        trace!("Getting all posts");

        let mut stmt = self
            .conn
            .prepare("SELECT * FROM posts ORDER BY date DESC, id DESC")?;
        let posts = stmt
            .query_map((), map_post)?
            .collect::<SqlResult<Vec<_>>>();

        trace!("Got all posts");

        posts
    }

    /// Write back the mutable engagement fields after a like toggle or a
    /// comment append.
    pub fn update_post_engagement(&self, post: &Post) -> SqlResult<()> {
        debug!("Updating engagement for post {}", post.id.id());

        self.conn.execute(
            "UPDATE posts SET likes=?1, liked_by=?2, comments=?3 WHERE id=?4",
            (
                post.likes,
                to_json(&post.liked_by)?,
                to_json(&post.comments)?,
                post.id.id(),
            ),
        )?;
        Ok(())
    }
}

fn map_post(row: &Row) -> SqlResult<Post> {
    trace!("Mapping db row to post");

    Ok(Post {
        id: get_snowflake_column(row, 0)?,
        name: row.get(1)?,
        content: row.get(2)?,
        date: get_datetime_column(row, 3)?,
        likes: row.get(4)?,
        liked_by: get_json_column(row, 5)?,
        comments: get_json_column(row, 6)?,
    })
}

/// Column helpers for the types sqlite has no native representation for.
fn get_snowflake_column(row: &Row, index: usize) -> SqlResult<super::Snowflake> {
    super::Snowflake::try_from(row.get::<usize, i64>(index)?).map_err(|err| {
        rusqlite::Error::FromSqlConversionFailure(
            index,
            rusqlite::types::Type::Integer,
            Box::new(err),
        )
    })
}

fn get_datetime_column(row: &Row, index: usize) -> SqlResult<DateTime<Utc>> {
    let text: String = row.get(index)?;
    DateTime::parse_from_rfc3339(&text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| {
            rusqlite::Error::FromSqlConversionFailure(
                index,
                rusqlite::types::Type::Text,
                Box::new(err),
            )
        })
}

fn get_json_column<T: serde::de::DeserializeOwned>(row: &Row, index: usize) -> SqlResult<T> {
    let text: String = row.get(index)?;
    serde_json::from_str(&text).map_err(|err| {
        rusqlite::Error::FromSqlConversionFailure(index, rusqlite::types::Type::Text, Box::new(err))
    })
}

fn to_json<T: serde::Serialize>(value: &T) -> SqlResult<String> {
    serde_json::to_string(value).map_err(|err| rusqlite::Error::ToSqlConversionFailure(Box::new(err)))
}
