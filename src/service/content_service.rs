//! Blog posts and resources: admin-gated writes, public reads.
//! Rows are immutable after creation; there is no update or delete.

use sqlx::PgPool;

use crate::error::AppError;
use crate::models::blog_post::{BlogPost, NewBlogPost};
use crate::models::resource::{NewResource, Resource};

pub struct ContentService {
    pool: PgPool,
}

impl ContentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn blog_posts(&self) -> Result<Vec<BlogPost>, AppError> {
        let posts = sqlx::query_as::<_, BlogPost>("SELECT * FROM blog_posts ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(posts)
    }

    pub async fn blog_post(&self, id: i32) -> Result<Option<BlogPost>, AppError> {
        let post = sqlx::query_as::<_, BlogPost>("SELECT * FROM blog_posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(post)
    }

    pub async fn create_blog_post(
        &self,
        post: NewBlogPost,
        author_id: i32,
    ) -> Result<BlogPost, AppError> {
        let post = sqlx::query_as::<_, BlogPost>(
            r#"
                INSERT INTO blog_posts (title, content, author_id)
                VALUES ($1, $2, $3)
                RETURNING *
            "#,
        )
        .bind(&post.title)
        .bind(&post.content)
        .bind(author_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(post)
    }

    pub async fn resources(&self) -> Result<Vec<Resource>, AppError> {
        let resources = sqlx::query_as::<_, Resource>("SELECT * FROM resources ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(resources)
    }

    pub async fn resource(&self, id: i32) -> Result<Option<Resource>, AppError> {
        let resource = sqlx::query_as::<_, Resource>("SELECT * FROM resources WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(resource)
    }

    pub async fn create_resource(&self, resource: NewResource) -> Result<Resource, AppError> {
        let resource = sqlx::query_as::<_, Resource>(
            r#"
                INSERT INTO resources (title, description, file_url)
                VALUES ($1, $2, $3)
                RETURNING *
            "#,
        )
        .bind(&resource.title)
        .bind(&resource.description)
        .bind(&resource.file_url)
        .fetch_one(&self.pool)
        .await?;
        Ok(resource)
    }
}
