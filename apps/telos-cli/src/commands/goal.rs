// goal.rs — Goal subcommands: list, show, create, edit, delete, and the
// lifecycle transitions submit/approve/complete/progress.

use clap::Subcommand;

use telos_api::{ApiClient, ApiError, GoalDraft, GoalUpdate};
use telos_goal::{Action, Goal};

use super::truncate;

#[derive(Subcommand)]
pub enum GoalCommands {
    /// List your goals.
    List {
        /// Show every goal you may see, not just your own.
        #[arg(long)]
        all: bool,
    },
    /// Show one goal with its progress log and the actions open to you.
    Show {
        /// Goal ID.
        id: i64,
    },
    /// Create a new draft goal.
    Create {
        /// Goal title.
        title: String,
        /// What the goal is about.
        #[arg(long, default_value = "")]
        description: String,
        /// What done looks like.
        #[arg(long, default_value = "")]
        expected_results: String,
        /// Review period start (YYYY-MM-DD).
        #[arg(long)]
        start: String,
        /// Review period end (YYYY-MM-DD).
        #[arg(long)]
        end: String,
    },
    /// Edit a draft goal.
    Edit {
        /// Goal ID.
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        expected_results: Option<String>,
        /// Review period start (YYYY-MM-DD).
        #[arg(long)]
        start: Option<String>,
        /// Review period end (YYYY-MM-DD).
        #[arg(long)]
        end: Option<String>,
    },
    /// Delete a draft goal.
    Delete {
        /// Goal ID.
        id: i64,
    },
    /// Submit a draft for approval.
    Submit {
        /// Goal ID.
        id: i64,
    },
    /// Approve a direct report's pending goal.
    Approve {
        /// Goal ID.
        id: i64,
    },
    /// Mark an in-progress goal as done.
    Complete {
        /// Goal ID.
        id: i64,
    },
    /// Show the progress log, or append an entry with --add.
    Progress {
        /// Goal ID.
        id: i64,
        /// Progress note to append.
        #[arg(long)]
        add: Option<String>,
    },
}

pub async fn execute(cmd: &GoalCommands, api: &ApiClient) -> anyhow::Result<()> {
    api.ensure_identity_loaded().await?;

    match cmd {
        GoalCommands::List { all } => list_goals(api, *all).await,
        GoalCommands::Show { id } => show_goal(api, *id).await,
        GoalCommands::Create {
            title,
            description,
            expected_results,
            start,
            end,
        } => create_goal(api, title, description, expected_results, start, end).await,
        GoalCommands::Edit {
            id,
            title,
            description,
            expected_results,
            start,
            end,
        } => {
            edit_goal(
                api,
                *id,
                title.clone(),
                description.clone(),
                expected_results.clone(),
                start.as_deref(),
                end.as_deref(),
            )
            .await
        }
        GoalCommands::Delete { id } => delete_goal(api, *id).await,
        GoalCommands::Submit { id } => transition(api, *id, Action::Submit).await,
        GoalCommands::Approve { id } => transition(api, *id, Action::Approve).await,
        GoalCommands::Complete { id } => transition(api, *id, Action::Complete).await,
        GoalCommands::Progress { id, add } => progress(api, *id, add.as_deref()).await,
    }
}

async fn list_goals(api: &ApiClient, all: bool) -> anyhow::Result<()> {
    let goals = match if all { api.goals().await } else { api.my_goals().await } {
        Ok(goals) => goals,
        // A flaky backend should not make the list view unusable.
        Err(err) if err.is_transient() => {
            tracing::warn!(error = %err, "goal list unavailable");
            eprintln!("Backend unavailable, showing nothing: {err}");
            Vec::new()
        }
        Err(err) => return Err(err.into()),
    };

    if goals.is_empty() {
        println!("No goals found.");
        return Ok(());
    }

    println!(
        "{:<6} {:<40} {:<18} {:<12}",
        "ID", "TITLE", "STATUS", "OWNER"
    );
    println!("{}", "-".repeat(78));
    for g in &goals {
        println!(
            "{:<6} {:<40} {:<18} {:<12}",
            g.id,
            truncate(&g.title, 38),
            g.status.to_string(),
            g.employee.user.username,
        );
    }
    println!("\n{} goal(s) total.", goals.len());
    Ok(())
}

async fn show_goal(api: &ApiClient, id: i64) -> anyhow::Result<()> {
    let goal = fetch_goal(api, id).await?;

    println!("Goal #{}: {}", goal.id, goal.title);
    println!("Status:    {}", goal.status);
    println!("Owner:     {}", goal.employee.user.full_name());
    println!("Period:    {} .. {}", goal.start_period, goal.end_period);
    println!("Expected:  {}", goal.expected_results);
    if !goal.description.is_empty() {
        println!("\n{}", goal.description);
    }

    if !goal.progress_entries.is_empty() {
        println!("\nProgress:");
        for entry in &goal.progress_entries {
            println!("  [{}] {}", entry.created_at.format("%Y-%m-%d"), entry.description);
        }
    }

    let allowed = api.gate().allowed(&goal);
    if allowed.is_empty() {
        println!("\nNo actions available to you.");
    } else {
        let names: Vec<String> = allowed.iter().map(|a| a.to_string()).collect();
        println!("\nAvailable actions: {}", names.join(", "));
    }
    Ok(())
}

async fn create_goal(
    api: &ApiClient,
    title: &str,
    description: &str,
    expected_results: &str,
    start: &str,
    end: &str,
) -> anyhow::Result<()> {
    let draft = GoalDraft {
        title: title.to_string(),
        description: description.to_string(),
        expected_results: expected_results.to_string(),
        start_period: parse_date(start)?,
        end_period: parse_date(end)?,
    };
    let goal = api.create_goal(&draft).await?;
    println!("Created goal #{} ({})", goal.id, goal.status);
    println!("Submit it with: telos goal submit {}", goal.id);
    Ok(())
}

async fn edit_goal(
    api: &ApiClient,
    id: i64,
    title: Option<String>,
    description: Option<String>,
    expected_results: Option<String>,
    start: Option<&str>,
    end: Option<&str>,
) -> anyhow::Result<()> {
    let update = GoalUpdate {
        title,
        description,
        expected_results,
        start_period: start.map(parse_date).transpose()?,
        end_period: end.map(parse_date).transpose()?,
    };
    let goal = fetch_goal(api, id).await?;
    let updated = api.gate().update(&goal, &update).await?;
    println!("Updated goal #{}.", updated.id);
    Ok(())
}

async fn delete_goal(api: &ApiClient, id: i64) -> anyhow::Result<()> {
    let goal = fetch_goal(api, id).await?;
    api.gate().delete(&goal).await?;
    println!("Deleted goal #{} ({}).", goal.id, truncate(&goal.title, 40));
    Ok(())
}

async fn transition(api: &ApiClient, id: i64, action: Action) -> anyhow::Result<()> {
    let goal = fetch_goal(api, id).await?;
    let gate = api.gate();
    let updated = match action {
        Action::Submit => gate.submit(&goal).await?,
        Action::Approve => gate.approve(&goal).await?,
        Action::Complete => gate.complete(&goal).await?,
        _ => anyhow::bail!("not a lifecycle transition: {action}"),
    };
    println!("Goal #{} is now {}.", updated.id, updated.status);
    Ok(())
}

async fn progress(api: &ApiClient, id: i64, add: Option<&str>) -> anyhow::Result<()> {
    if let Some(description) = add {
        let goal = fetch_goal(api, id).await?;
        let updated = api.gate().add_progress(&goal, description).await?;
        println!(
            "Recorded progress on goal #{} ({} entries).",
            updated.id,
            updated.progress_entries.len()
        );
        return Ok(());
    }

    let entries = api.progress(id).await?;
    if entries.is_empty() {
        println!("No progress recorded yet.");
        return Ok(());
    }
    for entry in &entries {
        println!("[{}] {}", entry.created_at.format("%Y-%m-%d %H:%M"), entry.description);
    }
    Ok(())
}

async fn fetch_goal(api: &ApiClient, id: i64) -> anyhow::Result<Goal> {
    match api.goal(id).await {
        Ok(goal) => Ok(goal),
        Err(ApiError::NotFound { .. }) => {
            eprintln!("Goal not found: {id}");
            std::process::exit(1);
        }
        Err(err) => Err(err.into()),
    }
}

fn parse_date(s: &str) -> anyhow::Result<chrono::NaiveDate> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("invalid date {s:?}, expected YYYY-MM-DD"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_iso_and_rejects_noise() {
        assert!(parse_date("2025-01-31").is_ok());
        assert!(parse_date("31/01/2025").is_err());
        assert!(parse_date("").is_err());
    }
}
