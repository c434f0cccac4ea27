use super::AppContext;
use anyhow::{Result, bail};
use msc_application::{
    BlogPostDetailLoader, BlogPostsLoader, ProgramsLoader, ProjectDetailLoader, ProjectsLoader,
    ResourceView, ViewState,
};
use msc_core::content::{BlogPost, ContentQuery, PageInfo, Program, Project};

/// Prints a view, returning an error for the failed state.
fn render<T>(view: &ResourceView<T>, empty: &str, line: impl Fn(&T) -> String) -> Result<()> {
    match &view.state {
        ViewState::Loading => println!("Loading..."),
        ViewState::Empty => println!("{}", empty),
        ViewState::Failed(message) => bail!(message.clone()),
        ViewState::Loaded(items) => {
            for item in items {
                println!("{}", line(item));
            }
        }
    }
    if let Some(page) = view.page {
        print_page(&page);
    }
    Ok(())
}

fn print_page(page: &PageInfo) {
    println!(
        "-- page {}/{} ({} total){}",
        page.page,
        page.total_pages,
        page.total,
        if page.has_next() { ", more with --page" } else { "" }
    );
}

pub async fn programs(ctx: &AppContext) -> Result<()> {
    let loader = ProgramsLoader::programs(ctx.backend.clone());
    let view = loader.load(()).await;
    render(&view, "No programs yet", |p: &Program| {
        format!("{:<28} {:<12} {:<10} {}", p.slug, p.duration, p.level, p.title)
    })
}

pub async fn projects(ctx: &AppContext, query: ContentQuery) -> Result<()> {
    let loader = ProjectsLoader::projects(ctx.backend.clone());
    let view = loader.load(query).await;
    render(&view, "No projects found", |p: &Project| {
        format!("{:<28} [{}] {}", p.slug, p.category, p.title)
    })
}

pub async fn project(ctx: &AppContext, slug: String) -> Result<()> {
    let loader = ProjectDetailLoader::project(ctx.backend.clone());
    let view = loader.load(slug).await;
    render(&view, "Project not found", |p: &Project| {
        let mentors = p
            .mentors
            .iter()
            .map(|m| m.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "{}\n{} | {}\nMentors: {}\n\n{}",
            p.title, p.category, p.status, mentors, p.description
        )
    })
}

pub async fn posts(ctx: &AppContext, query: ContentQuery) -> Result<()> {
    let loader = BlogPostsLoader::blog_posts(ctx.backend.clone());
    let view = loader.load(query).await;
    render(&view, "No posts found", |p: &BlogPost| {
        format!("{:<36} {:<12} {}", p.slug, p.publish_date, p.title)
    })
}

pub async fn post(ctx: &AppContext, slug: String) -> Result<()> {
    let loader = BlogPostDetailLoader::blog_post(ctx.backend.clone());
    let view = loader.load(slug).await;
    render(&view, "Post not found", |p: &BlogPost| {
        format!(
            "{}\n{} | {} | {} views\n\n{}",
            p.title, p.author, p.read_time, p.views, p.details_blog
        )
    })
}
