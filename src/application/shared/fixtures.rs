use crate::domain::entities::{Comment, Post, PostList, User};
use crate::domain::value_objects::{CommentId, PostId, UserId};
use chrono::{DateTime, TimeZone, Utc};

pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
}

pub fn user_id(id: i64) -> UserId {
    UserId::new(id).unwrap()
}

pub fn post_id(id: i64) -> PostId {
    PostId::new(id).unwrap()
}

pub fn user(id: i64) -> User {
    User::new(user_id(id), format!("user{id}"))
}

pub fn post(id: i64) -> Post {
    Post {
        id: post_id(id),
        title: format!("title {id}"),
        content: format!("content {id}"),
        likes: 0,
        liked_by: Default::default(),
        author: user(100 + id),
        comments: Vec::new(),
        created_at: fixed_time(),
        updated_at: fixed_time(),
    }
}

pub fn posts(ids: &[i64]) -> PostList {
    ids.iter().copied().map(post).collect()
}

pub fn liked_post(id: i64, likes: u32, liked_by: &[i64]) -> Post {
    let mut post = post(id);
    post.likes = likes;
    post.liked_by = liked_by.iter().copied().map(user_id).collect();
    post
}

pub fn server_comment(id: i64, text: &str, author: User) -> Comment {
    Comment {
        id: CommentId::Server(id),
        text: text.to_string(),
        author,
        created_at: fixed_time(),
        updated_at: fixed_time(),
    }
}
