use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::error::{DashError, DashResult};

const MAX_POST_CHARS: usize = 280;

#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: u64,
    pub author: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    liked_by: HashSet<String>,
}

impl Post {
    pub fn likes(&self) -> usize {
        self.liked_by.len()
    }

    pub fn liked_by(&self, user: &str) -> bool {
        self.liked_by.contains(user)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Feed {
    posts: Vec<Post>,
    next_id: u64,
}

impl Feed {
    pub fn post(&mut self, author: &str, body: &str) -> DashResult<u64> {
        let body = body.trim();
        if body.is_empty() {
            return Err(DashError::invalid("post body is empty"));
        }
        if body.chars().count() > MAX_POST_CHARS {
            return Err(DashError::invalid(format!(
                "post is longer than {MAX_POST_CHARS} characters"
            )));
        }
        self.next_id += 1;
        self.posts.push(Post {
            id: self.next_id,
            author: author.to_string(),
            body: body.to_string(),
            created_at: Utc::now(),
            liked_by: HashSet::new(),
        });
        Ok(self.next_id)
    }

    /// Toggles `user`'s like and returns the new like count.
    pub fn toggle_like(&mut self, post_id: u64, user: &str) -> DashResult<usize> {
        let post = self
            .posts
            .iter_mut()
            .find(|p| p.id == post_id)
            .ok_or_else(|| DashError::not_found(format!("post {post_id}")))?;
        if !post.liked_by.remove(user) {
            post.liked_by.insert(user.to_string());
        }
        Ok(post.likes())
    }

    pub fn recent(&self, n: usize) -> Vec<&Post> {
        self.posts.iter().rev().take(n).collect()
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn seed_demo(&mut self) {
        let seeds = [
            ("Coach Rivera", "Recovery day done right: pool session plus 9 hours of sleep."),
            ("Amara Osei", "New 200m PB this weekend. Block starts are finally clicking."),
            ("Scout Network", "Open trials for U18 forwards next month. DM for details."),
        ];
        for (author, body) in seeds {
            let _ = self.post(author, body);
        }
    }
}
