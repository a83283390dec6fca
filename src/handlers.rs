use std::sync::Arc;

use axum::{extract::Path, http::Uri, Extension, Json};

use crate::{
    admin::{raw_id_fields, AdminRegistration, REGISTRY},
    config::Settings,
    db_helpers::BlogReader,
    errors::RequestError,
    ContactsContext, IndexContext, Page, PostDetailContext, PostDetailResponse, PostSummary,
    TagFilterContext, TagResponse,
};

type Blog = Extension<Arc<dyn BlogReader>>;
type Config = Extension<Arc<Settings>>;
type PageResult<T> = Result<Json<Page<T>>, RequestError>;

const LISTING_LIMIT: u32 = 5;
const TAG_POSTS_LIMIT: u32 = 20;

// ----------------- Helper Handlers -----------------
pub async fn alive() -> &'static str {
    "alive"
}

pub async fn not_found(uri: Uri) -> RequestError {
    tracing::debug!(%uri, "no route");
    RequestError::NotFound("URL provided was not found")
}

struct Sidebar {
    most_popular_posts: Vec<PostSummary>,
    popular_tags: Vec<TagResponse>,
}

async fn load_sidebar(blog: &dyn BlogReader, settings: &Settings) -> Result<Sidebar, RequestError> {
    let most_popular_posts = blog.popular_posts(LISTING_LIMIT).await?;
    let popular_tags = blog.popular_tags(LISTING_LIMIT).await?;
    Ok(Sidebar {
        most_popular_posts: PostSummary::from_posts(most_popular_posts, &settings.media_url),
        popular_tags: popular_tags.into_iter().map(TagResponse::new).collect(),
    })
}

// ----------------- Page Handlers -----------------
#[tracing::instrument(skip_all)]
pub async fn index(Extension(blog): Blog, Extension(settings): Config) -> PageResult<IndexContext> {
    let Sidebar {
        most_popular_posts,
        popular_tags,
    } = load_sidebar(blog.as_ref(), &settings).await?;
    let fresh_posts = blog.fresh_posts(LISTING_LIMIT).await?;
    tracing::debug!(fresh = fresh_posts.len(), "rendering index");

    let context = IndexContext {
        most_popular_posts,
        page_posts: PostSummary::from_posts(fresh_posts, &settings.media_url),
        popular_tags,
    };
    Ok(Json(Page::new("index.html", context)))
}

#[tracing::instrument(skip(blog, settings))]
pub async fn post_detail(
    Extension(blog): Blog,
    Extension(settings): Config,
    Path(slug): Path<String>,
) -> PageResult<PostDetailContext> {
    let post = blog.post_by_slug(&slug).await?;
    let comments = blog.comments_for_post(post.id).await?;
    let tags = blog.tags_for_post(post.id).await?;
    tracing::debug!(comments = comments.len(), tags = tags.len(), "rendering post");

    let Sidebar {
        most_popular_posts,
        popular_tags,
    } = load_sidebar(blog.as_ref(), &settings).await?;
    let context = PostDetailContext {
        post: PostDetailResponse::new(post, comments, tags, &settings.media_url),
        popular_tags,
        most_popular_posts,
    };
    Ok(Json(Page::new("post-details.html", context)))
}

#[tracing::instrument(skip(blog, settings))]
pub async fn tag_filter(
    Extension(blog): Blog,
    Extension(settings): Config,
    Path(tag_title): Path<String>,
) -> PageResult<TagFilterContext> {
    let tag = blog.tag_by_title(&tag_title).await?;
    let posts = blog.posts_for_tag(tag.id, TAG_POSTS_LIMIT).await?;
    tracing::debug!(posts = posts.len(), "rendering tag filter");

    let Sidebar {
        most_popular_posts,
        popular_tags,
    } = load_sidebar(blog.as_ref(), &settings).await?;
    let context = TagFilterContext {
        tag: tag.title,
        popular_tags,
        posts: PostSummary::from_posts(posts, &settings.media_url),
        most_popular_posts,
    };
    Ok(Json(Page::new("posts-list.html", context)))
}

// Static for now; visit statistics and a feedback form are planned here.
pub async fn contacts() -> Json<Page<ContactsContext>> {
    Json(Page::new("contacts.html", ContactsContext::default()))
}

// ----------------- Admin Metadata -----------------
pub async fn admin_registry() -> Json<&'static [AdminRegistration]> {
    Json(REGISTRY)
}

pub async fn admin_entity(
    Path(entity): Path<String>,
) -> Result<Json<&'static [&'static str]>, RequestError> {
    raw_id_fields(&entity)
        .map(Json)
        .ok_or(RequestError::NotFound("Entity is not registered"))
}
