// team.rs — Manager dashboard: direct reports and goals waiting on you.

use telos_api::ApiClient;
use telos_goal::{Goal, TeamView};

use super::truncate;

pub async fn execute(api: &ApiClient) -> anyhow::Result<()> {
    let session = api.ensure_identity_loaded().await?;
    if !session.is_manager() {
        println!("You have no direct reports.");
        return Ok(());
    }
    let Some(actor) = session.actor() else {
        eprintln!("Not signed in. Run `telos login <username>`.");
        std::process::exit(1);
    };

    let team = api.my_team().await?;
    println!("Direct reports ({}):", team.len());
    for member in &team {
        println!("  {:<24} {}", member.user.full_name(), member.position);
    }

    let goals = match api.goals().await {
        Ok(goals) => goals,
        Err(err) if err.is_transient() => {
            tracing::warn!(error = %err, "goal list unavailable");
            eprintln!("\nBackend unavailable, goal overview skipped: {err}");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };
    let view = TeamView::partition(goals, &actor);

    if !view.team_pending_approval.is_empty() {
        println!("\nWaiting for your approval:");
        for g in &view.team_pending_approval {
            print_goal_line(g);
        }
        println!("\nApprove with: telos goal approve <id>");
    } else {
        println!("\nNothing is waiting for your approval.");
    }

    if !view.team_other.is_empty() {
        println!("\nOther team goals:");
        for g in &view.team_other {
            print_goal_line(g);
        }
    }
    Ok(())
}

fn print_goal_line(g: &Goal) {
    println!(
        "  #{:<5} {:<40} {:<18} {}",
        g.id,
        truncate(&g.title, 38),
        g.status.to_string(),
        g.employee.user.username,
    );
}
