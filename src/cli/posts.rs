//! Headless `list` and `add` commands.

use crate::cli::{print_error, print_success};
use crate::config::Config;
use crate::models::{NewPost, Post};
use crate::services::{HttpPostsService, PostsService};
use anyhow::{bail, Context, Result};
use indoc::formatdoc;
use tokio::runtime::Runtime;
use tracing::info;

/// Fetch up to `limit` posts and print them
pub fn cmd_list(config: &Config, limit: usize, json: bool) -> Result<()> {
    info!("CLI: list command executed (limit {})", limit);
    let service = HttpPostsService::new(&config.api)?;
    let runtime = Runtime::new().context("Failed to create tokio runtime")?;

    let posts = match runtime.block_on(service.list_posts(limit)) {
        Ok(posts) => posts,
        Err(e) => {
            print_error("Failed to fetch data");
            return Err(e);
        }
    };

    if json {
        let output =
            serde_json::to_string_pretty(&posts).context("Failed to serialize posts")?;
        println!("{}", output);
        return Ok(());
    }

    if posts.is_empty() {
        println!("No Posts Found");
        return Ok(());
    }

    let rendered: Vec<String> = posts.iter().map(format_post).collect();
    println!("{}", rendered.join("\n"));
    Ok(())
}

/// Create a post from `title` and `body` and print what the service returned
pub fn cmd_add(config: &Config, title: String, body: String, json: bool) -> Result<()> {
    info!("CLI: add command executed");
    let new_post = validate_new_post(title, body)?;

    let service = HttpPostsService::new(&config.api)?;
    let runtime = Runtime::new().context("Failed to create tokio runtime")?;

    match runtime.block_on(service.create_post(new_post)) {
        Ok(post) if json => {
            let output =
                serde_json::to_string_pretty(&post).context("Failed to serialize post")?;
            println!("{}", output);
            Ok(())
        }
        Ok(post) => {
            print_success(&format!("Added post #{}", post.id));
            println!("{}", format_post(&post));
            Ok(())
        }
        Err(e) => {
            print_error("Failed to add new post");
            Err(e)
        }
    }
}

/// Same rule as the screen's submit control: both fields must be non-empty
pub fn validate_new_post(title: String, body: String) -> Result<NewPost> {
    let new_post = NewPost::new(title, body);
    if !new_post.is_complete() {
        bail!("Both --title and --body must be non-empty");
    }
    Ok(new_post)
}

pub fn format_post(post: &Post) -> String {
    formatdoc! {"
        #{id} {title}
        {body}
        ",
        id = post.id,
        title = post.title,
        body = post.body,
    }
}
