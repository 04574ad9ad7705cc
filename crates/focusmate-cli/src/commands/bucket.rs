use chrono::NaiveDate;
use clap::Args;
use focusmate_core::build_bucket;

use crate::render::task_line;
use crate::session::Session;

#[derive(Args)]
pub struct BucketArgs {
    /// Show one project in step order instead of the dashboard
    #[arg(long)]
    project: Option<String>,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: BucketArgs, today: NaiveDate) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::open()?;
    let tasks = session.store.list_tasks(&session.user)?;
    let bucket = build_bucket(&tasks, args.project.as_deref(), today);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&bucket)?);
        return Ok(());
    }

    match &args.project {
        Some(project) => println!("{project} ({} active)", bucket.active.len()),
        None => println!("Bucket ({} active)", bucket.active.len()),
    }
    if bucket.is_caught_up() {
        println!("  All caught up!");
    }
    for (i, ranked) in bucket.active.iter().enumerate() {
        println!("{:>3}. {}", i + 1, task_line(ranked.task, ranked.due_status));
    }

    if !bucket.someday.is_empty() {
        println!();
        println!("Someday ({})", bucket.someday.len());
        for ranked in &bucket.someday {
            println!("   - {}", task_line(ranked.task, ranked.due_status));
        }
    }
    Ok(())
}
