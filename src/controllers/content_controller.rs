//! Public reads and admin-only writes for blog posts and resources.

use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::error::AppError;
use crate::extractors::AdminUser;
use crate::models::blog_post::NewBlogPost;
use crate::models::resource::NewResource;
use crate::service::content_service::ContentService;

/// GET /api/blog
pub async fn list_blog_posts(
    content: web::Data<ContentService>,
) -> Result<HttpResponse, AppError> {
    let posts = content.blog_posts().await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// GET /api/blog/{id}
pub async fn get_blog_post(
    content: web::Data<ContentService>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let post = content
        .blog_post(path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;
    Ok(HttpResponse::Ok().json(post))
}

/// POST /api/blog — admin only; the session's user becomes the author.
pub async fn create_blog_post(
    admin: AdminUser,
    content: web::Data<ContentService>,
    body: web::Json<NewBlogPost>,
) -> Result<HttpResponse, AppError> {
    let new_post = body.into_inner();
    new_post.validate()?;

    let post = content.create_blog_post(new_post, admin.0.id).await?;
    Ok(HttpResponse::Created().json(post))
}

/// GET /api/resources
pub async fn list_resources(content: web::Data<ContentService>) -> Result<HttpResponse, AppError> {
    let resources = content.resources().await?;
    Ok(HttpResponse::Ok().json(resources))
}

/// GET /api/resources/{id}
pub async fn get_resource(
    content: web::Data<ContentService>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let resource = content
        .resource(path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Resource not found".to_string()))?;
    Ok(HttpResponse::Ok().json(resource))
}

/// POST /api/resources — admin only.
pub async fn create_resource(
    _admin: AdminUser,
    content: web::Data<ContentService>,
    body: web::Json<NewResource>,
) -> Result<HttpResponse, AppError> {
    let new_resource = body.into_inner();
    new_resource.validate()?;

    let resource = content.create_resource(new_resource).await?;
    Ok(HttpResponse::Created().json(resource))
}
