use chrono::Utc;

use crate::app::{AppContext, FreshetError, Result};
use crate::domain::comment::{ContentKind, ContentRef};
use crate::sync::FeedSynchronizer;

pub async fn show_feed(ctx: &AppContext, pages: usize) -> Result<()> {
    let sync = ctx.feed_synchronizer();
    sync.refresh().await;
    load_remaining_pages(&sync, pages).await;
    print_feed(&sync);
    Ok(())
}

pub async fn show_question(ctx: &AppContext, question_id: u64, pages: usize) -> Result<()> {
    let sync = ctx.feed_synchronizer();
    sync.refresh_question(question_id).await;
    load_remaining_pages(&sync, pages).await;
    print_feed(&sync);
    Ok(())
}

pub async fn show_comments(ctx: &AppContext, kind: &str, id: u64, pages: usize) -> Result<()> {
    let kind = match kind {
        "answer" => ContentKind::Answer,
        "article" => ContentKind::Article,
        "question" => ContentKind::Question,
        other => {
            return Err(FreshetError::Other(format!(
                "unknown content kind: {other} (expected answer, article or question)"
            )))
        }
    };

    let sync = ctx.root_comments(ContentRef::new(kind, id));
    sync.refresh().await;
    for _ in 1..pages {
        if sync.is_end() {
            break;
        }
        sync.load_more().await;
    }

    if let Some(error) = sync.error_message() {
        eprintln!("Error: {error}");
    }

    let comments = sync.comments();
    if comments.is_empty() {
        println!("No comments");
        return Ok(());
    }

    let now = Utc::now();
    for comment in &comments {
        let reply_note = sync
            .resolve_reply(comment)
            .map(|target| format!(" (replying to {})", target.author.name))
            .unwrap_or_default();
        println!(
            "{} · {}{}",
            comment.author.name,
            comment.display_time(now),
            reply_note
        );
        println!("    {}", comment.content);
        println!(
            "    {} likes · {} replies",
            comment.like_count, comment.child_comment_count
        );
    }

    Ok(())
}

async fn load_remaining_pages(sync: &FeedSynchronizer, pages: usize) {
    for _ in 1..pages {
        if sync.is_end() {
            break;
        }
        sync.load_more().await;
    }
}

fn print_feed(sync: &FeedSynchronizer) {
    if let Some(error) = sync.error_message() {
        eprintln!("Error: {error}");
    }

    let display = sync.display_items();
    if display.is_empty() {
        println!("No items");
        return;
    }

    for item in display {
        if item.filtered {
            println!("[blocked] {}", item.summary);
        } else {
            println!("{}", item.title);
            if !item.summary.is_empty() {
                println!("    {}", item.summary);
            }
            println!("    {}", item.details);
        }
    }
}
