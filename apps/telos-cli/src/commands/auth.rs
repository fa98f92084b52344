// auth.rs — Session commands: login, logout, whoami.

use telos_api::{ApiClient, LoginCredentials};

pub async fn login(api: &ApiClient, username: &str, password: Option<&str>) -> anyhow::Result<()> {
    let password = match password {
        Some(p) => p.to_string(),
        None => rpassword::prompt_password("Password: ")?,
    };

    let session = api
        .login(&LoginCredentials {
            username: username.to_string(),
            password,
        })
        .await?;

    let identity = session
        .identity
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("login succeeded but returned no identity"))?;
    println!("Signed in as {} <{}>", identity.username, identity.email);
    if session.is_manager() {
        println!("You have direct reports — `telos team` shows goals waiting on you.");
    }
    Ok(())
}

pub fn logout(api: &ApiClient) -> anyhow::Result<()> {
    api.logout()?;
    println!("Signed out.");
    Ok(())
}

pub async fn whoami(api: &ApiClient) -> anyhow::Result<()> {
    if !api.session().is_authenticated() {
        eprintln!("Not signed in. Run `telos login <username>`.");
        std::process::exit(1);
    }

    let session = api.ensure_identity_loaded().await?;
    match session.identity {
        Some(identity) => {
            println!("User:     {} {}", identity.first_name, identity.last_name);
            println!("Username: {}", identity.username);
            println!("Email:    {}", identity.email);
            println!("Role:     {}", identity.role);
            match session.employee_profile {
                Some(profile) => {
                    println!("Position: {}", profile.position);
                    println!("Manager:  {}", if profile.is_manager { "yes" } else { "no" });
                }
                None => println!("Position: (no employee profile)"),
            }
        }
        None => {
            eprintln!("Session has no identity; sign in again.");
            std::process::exit(1);
        }
    }
    Ok(())
}
