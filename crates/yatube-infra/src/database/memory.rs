//! In-memory storage - used as fallback when PostgreSQL is unavailable and
//! as the backing store for route tests.
//!
//! All three repositories share one store behind an async `RwLock`, because
//! referential rules cross entity boundaries: deleting a user removes their
//! posts, deleting a group detaches its posts.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use yatube_core::domain::{Group, NewPost, Post, User};
use yatube_core::error::RepoError;
use yatube_core::ports::{
    BaseRepository, GroupRepository, PostRepository, UserRepository,
};

#[derive(Default)]
struct StoreInner {
    users: HashMap<Uuid, User>,
    groups: HashMap<Uuid, Group>,
    posts: BTreeMap<i64, Post>,
    next_post_id: i64,
}

/// Shared in-memory store handing out per-entity repository handles.
///
/// Note: Data is lost on process restart.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> InMemoryUserRepository {
        InMemoryUserRepository {
            inner: self.inner.clone(),
        }
    }

    pub fn groups(&self) -> InMemoryGroupRepository {
        InMemoryGroupRepository {
            inner: self.inner.clone(),
        }
    }

    pub fn posts(&self) -> InMemoryPostRepository {
        InMemoryPostRepository {
            inner: self.inner.clone(),
        }
    }
}

/// In-memory user repository handle.
pub struct InMemoryUserRepository {
    inner: Arc<RwLock<StoreInner>>,
}

/// In-memory group repository handle.
pub struct InMemoryGroupRepository {
    inner: Arc<RwLock<StoreInner>>,
}

/// In-memory post repository handle.
pub struct InMemoryPostRepository {
    inner: Arc<RwLock<StoreInner>>,
}

fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| (b.pub_date, b.id).cmp(&(a.pub_date, a.id)));
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let store = self.inner.read().await;
        Ok(store.users.get(&id).cloned())
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        let mut store = self.inner.write().await;

        let taken = store
            .users
            .values()
            .any(|u| u.username == user.username && u.id != user.id);
        if taken {
            return Err(RepoError::Constraint(format!(
                "username '{}' already exists",
                user.username
            )));
        }

        store.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut store = self.inner.write().await;

        if store.users.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        // Author deletion cascades to the author's posts.
        store.posts.retain(|_, post| post.author_id != id);

        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let store = self.inner.read().await;
        Ok(store
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }
}

#[async_trait]
impl BaseRepository<Group, Uuid> for InMemoryGroupRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Group>, RepoError> {
        let store = self.inner.read().await;
        Ok(store.groups.get(&id).cloned())
    }

    async fn save(&self, group: Group) -> Result<Group, RepoError> {
        let mut store = self.inner.write().await;

        let taken = store
            .groups
            .values()
            .any(|g| g.slug == group.slug && g.id != group.id);
        if taken {
            return Err(RepoError::Constraint(format!(
                "slug '{}' already exists",
                group.slug
            )));
        }

        store.groups.insert(group.id, group.clone());
        Ok(group)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut store = self.inner.write().await;

        if store.groups.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        // Group deletion detaches posts instead of removing them.
        for post in store.posts.values_mut() {
            if post.group_id == Some(id) {
                post.group_id = None;
            }
        }

        Ok(())
    }
}

#[async_trait]
impl GroupRepository for InMemoryGroupRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, RepoError> {
        let store = self.inner.read().await;
        Ok(store.groups.values().find(|g| g.slug == slug).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Group>, RepoError> {
        let store = self.inner.read().await;
        let mut groups: Vec<Group> = store.groups.values().cloned().collect();
        groups.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(groups)
    }
}

#[async_trait]
impl BaseRepository<Post, i64> for InMemoryPostRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        let store = self.inner.read().await;
        Ok(store.posts.get(&id).cloned())
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        let mut store = self.inner.write().await;
        store.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut store = self.inner.write().await;
        if store.posts.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, draft: NewPost) -> Result<Post, RepoError> {
        let mut store = self.inner.write().await;

        store.next_post_id += 1;
        let post = Post {
            id: store.next_post_id,
            text: draft.text,
            pub_date: draft.pub_date,
            author_id: draft.author_id,
            group_id: draft.group_id,
        };

        store.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn list_recent(&self) -> Result<Vec<Post>, RepoError> {
        let store = self.inner.read().await;
        let mut posts: Vec<Post> = store.posts.values().cloned().collect();
        sort_newest_first(&mut posts);
        Ok(posts)
    }

    async fn list_by_group(&self, group_id: Uuid) -> Result<Vec<Post>, RepoError> {
        let store = self.inner.read().await;
        let mut posts: Vec<Post> = store
            .posts
            .values()
            .filter(|p| p.group_id == Some(group_id))
            .cloned()
            .collect();
        sort_newest_first(&mut posts);
        Ok(posts)
    }

    async fn list_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError> {
        let store = self.inner.read().await;
        let mut posts: Vec<Post> = store
            .posts
            .values()
            .filter(|p| p.author_id == author_id)
            .cloned()
            .collect();
        sort_newest_first(&mut posts);
        Ok(posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded_store() -> (InMemoryStore, User, Group) {
        let store = InMemoryStore::new();
        let user = store
            .users()
            .save(User::new("leo".to_string(), "hash".to_string()))
            .await
            .unwrap();
        let group = store
            .groups()
            .save(Group::new(
                "Cats".to_string(),
                "cats".to_string(),
                "About cats".to_string(),
            ))
            .await
            .unwrap();
        (store, user, group)
    }

    #[tokio::test]
    async fn create_assigns_increasing_ids() {
        let (store, user, _) = seeded_store().await;
        let posts = store.posts();

        let first = posts
            .create(NewPost::new(user.id, "one".to_string(), None))
            .await
            .unwrap();
        let second = posts
            .create(NewPost::new(user.id, "two".to_string(), None))
            .await
            .unwrap();

        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn listings_are_newest_first() {
        let (store, user, _) = seeded_store().await;
        let posts = store.posts();

        for n in 0..5 {
            posts
                .create(NewPost::new(user.id, format!("post {n}"), None))
                .await
                .unwrap();
        }

        let listed = posts.list_recent().await.unwrap();
        assert_eq!(listed.len(), 5);
        assert_eq!(listed[0].text, "post 4");
        assert_eq!(listed[4].text, "post 0");
    }

    #[tokio::test]
    async fn group_listing_filters_strictly_by_group() {
        let (store, user, cats) = seeded_store().await;
        let dogs = store
            .groups()
            .save(Group::new(
                "Dogs".to_string(),
                "dogs".to_string(),
                "About dogs".to_string(),
            ))
            .await
            .unwrap();
        let posts = store.posts();

        posts
            .create(NewPost::new(user.id, "meow".to_string(), Some(cats.id)))
            .await
            .unwrap();

        let cat_posts = posts.list_by_group(cats.id).await.unwrap();
        let dog_posts = posts.list_by_group(dogs.id).await.unwrap();

        assert_eq!(cat_posts.len(), 1);
        assert!(dog_posts.is_empty());
    }

    #[tokio::test]
    async fn deleting_group_detaches_posts_without_deleting_them() {
        let (store, user, group) = seeded_store().await;
        let posts = store.posts();

        let post = posts
            .create(NewPost::new(user.id, "keep me".to_string(), Some(group.id)))
            .await
            .unwrap();

        store.groups().delete(group.id).await.unwrap();

        let survivor = posts.find_by_id(post.id).await.unwrap().unwrap();
        assert_eq!(survivor.text, "keep me");
        assert!(survivor.group_id.is_none());
    }

    #[tokio::test]
    async fn deleting_user_cascades_to_their_posts() {
        let (store, user, _) = seeded_store().await;
        let posts = store.posts();

        let post = posts
            .create(NewPost::new(user.id, "gone soon".to_string(), None))
            .await
            .unwrap();

        store.users().delete(user.id).await.unwrap();

        assert!(posts.find_by_id(post.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let (store, _, _) = seeded_store().await;

        let result = store
            .users()
            .save(User::new("leo".to_string(), "other".to_string()))
            .await;

        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn duplicate_slug_is_rejected() {
        let (store, _, _) = seeded_store().await;

        let result = store
            .groups()
            .save(Group::new(
                "Other cats".to_string(),
                "cats".to_string(),
                String::new(),
            ))
            .await;

        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn find_by_slug_and_username() {
        let (store, user, group) = seeded_store().await;

        let by_slug = store.groups().find_by_slug("cats").await.unwrap().unwrap();
        assert_eq!(by_slug.id, group.id);
        assert!(store.groups().find_by_slug("nope").await.unwrap().is_none());

        let by_name = store
            .users()
            .find_by_username("leo")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_name.id, user.id);
    }
}
