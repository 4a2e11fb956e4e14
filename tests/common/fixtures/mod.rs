use chrono::{DateTime, TimeZone, Utc};
use feed_sync::domain::entities::{Post, User};
use feed_sync::domain::value_objects::{PostId, UserId};

pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
}

pub fn user_id(id: i64) -> UserId {
    UserId::new(id).expect("valid user id")
}

pub fn post_id(id: i64) -> PostId {
    PostId::new(id).expect("valid post id")
}

pub fn user(id: i64) -> User {
    User::new(user_id(id), format!("user{id}"))
}

pub fn post(id: i64, author: i64, likes: u32, liked_by: &[i64]) -> Post {
    Post {
        id: post_id(id),
        title: "Not applicable".to_string(),
        content: format!("post {id}"),
        likes,
        liked_by: liked_by.iter().copied().map(user_id).collect(),
        author: user(author),
        comments: Vec::new(),
        created_at: fixed_time(),
        updated_at: fixed_time(),
    }
}

pub fn ids(posts: &[Post]) -> Vec<i64> {
    posts.iter().map(|p| p.id.value()).collect()
}
