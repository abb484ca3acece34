#[cfg(test)]
mod tests {
    use crate::database::entity::{group, post};
    use crate::database::postgres_repo::{PostgresGroupRepository, PostgresPostRepository};
    use yatube_core::domain::{Group, Post};
    use yatube_core::ports::{BaseRepository, GroupRepository, PostRepository};
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn post_row(id: i64, text: &str) -> post::Model {
        post::Model {
            id,
            text: text.to_owned(),
            pub_date: chrono::Utc::now().into(),
            author_id: uuid::Uuid::new_v4(),
            group_id: None,
        }
    }

    #[tokio::test]
    async fn test_find_post_by_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post_row(7, "Test post")]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(7).await.unwrap();

        assert!(result.is_some());
        let post = result.unwrap();
        assert_eq!(post.text, "Test post");
        assert_eq!(post.id, 7);
    }

    #[tokio::test]
    async fn test_find_group_by_slug() {
        let group_id = uuid::Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![group::Model {
                id: group_id,
                title: "Cats".to_owned(),
                slug: "cats".to_owned(),
                description: "About cats".to_owned(),
            }]])
            .into_connection();

        let repo = PostgresGroupRepository::new(db);

        let result: Option<Group> = repo.find_by_slug("cats").await.unwrap();

        assert!(result.is_some());
        let group = result.unwrap();
        assert_eq!(group.id, group_id);
        assert_eq!(group.slug, "cats");
    }

    #[tokio::test]
    async fn test_missing_group_maps_to_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<group::Model>::new()])
            .into_connection();

        let repo = PostgresGroupRepository::new(db);

        let result = repo.find_by_slug("missing").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_list_recent_maps_all_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post_row(2, "newer"), post_row(1, "older")]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let posts = repo.list_recent().await.unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].text, "newer");
        assert_eq!(posts[1].text, "older");
    }
}
