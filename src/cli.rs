// src/cli.rs
use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use crate::api::{admin, AdminApi, AuthApi, RecruiterApi, SeekerApi};
use crate::config::PortalConfig;
use crate::core::{ApiClient, ApiError};
use crate::listing::{self, ListView};
use crate::pagination::page_size;
use crate::render::{self, ApplicationRow, JobRow, UserRow};
use crate::types::{
    ApplicationStatus, ApplyForm, JobRequest, Record, RecruiterProfileRequest, Role,
    SeekerProfileRequest,
};
use crate::utils;

#[derive(Parser, Debug)]
#[command(name = "jobportal")]
#[command(about = "Admin, recruiter and seeker dashboards for the job portal API", version)]
pub struct Cli {
    /// Path to config.yaml (defaults to ./config.yaml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a seeker or recruiter account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
        #[arg(long, value_enum, default_value_t = RegisterRole::Seeker)]
        role: RegisterRole,
    },
    /// Log in and store the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the stored session
    Whoami,
    /// Email a password reset token
    ForgotPassword {
        #[arg(long)]
        email: String,
    },
    /// Set a new password using the emailed token
    ResetPassword {
        #[arg(long)]
        token: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    /// Browse active jobs
    Jobs,
    /// Platform management
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
    /// Job postings and applicants
    Recruiter {
        #[command(subcommand)]
        command: RecruiterCommand,
    },
    /// Job search and applications
    Seeker {
        #[command(subcommand)]
        command: SeekerCommand,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegisterRole {
    Seeker,
    Recruiter,
}

impl From<RegisterRole> for Role {
    fn from(role: RegisterRole) -> Self {
        match role {
            RegisterRole::Seeker => Role::Seeker,
            RegisterRole::Recruiter => Role::Recruiter,
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Page to show (1-based)
    #[arg(long, default_value_t = 1)]
    pub page: usize,
    /// Also write the full list to this CSV file
    #[arg(long)]
    pub csv: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum AdminCommand {
    Dashboard,
    Users(ListArgs),
    DeleteUser { id: i64 },
    Jobs(ListArgs),
    DeleteJob { id: i64 },
}

#[derive(Args, Debug, Clone, Default)]
pub struct JobFields {
    #[arg(long)]
    pub company_name: Option<String>,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub salary: Option<String>,
    #[arg(long)]
    pub experience: Option<String>,
    /// Full Time, Part Time, Remote or Internship
    #[arg(long)]
    pub job_type: Option<String>,
    /// Comma separated
    #[arg(long)]
    pub skills: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum RecruiterCommand {
    Dashboard,
    Profile,
    UpdateProfile {
        #[arg(long)]
        company_name: Option<String>,
        #[arg(long)]
        company_location: Option<String>,
        #[arg(long)]
        company_website: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    PostJob(JobFields),
    Jobs(ListArgs),
    ShowJob { id: i64 },
    UpdateJob {
        id: i64,
        #[command(flatten)]
        fields: JobFields,
        /// Open (true) or close (false) the posting
        #[arg(long)]
        active: Option<bool>,
    },
    DeleteJob { id: i64 },
    Applicants(ListArgs),
    /// Download an applicant's resume PDF
    Resume {
        application_id: i64,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Set an application to PENDING, SHORTLISTED or REJECTED
    SetStatus {
        application_id: i64,
        status: ApplicationStatus,
    },
}

#[derive(Subcommand, Debug)]
pub enum SeekerCommand {
    Dashboard,
    Profile,
    UpdateProfile {
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        skills: Option<String>,
        #[arg(long)]
        experience: Option<String>,
        #[arg(long)]
        education: Option<String>,
    },
    Jobs {
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    Applications(ListArgs),
    Apply {
        job_id: i64,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        cover_letter: Option<String>,
        #[arg(long)]
        resume: PathBuf,
    },
}

/// Turn an API failure into the message the user should read
fn fail(err: ApiError, fallback: &str) -> anyhow::Error {
    error!("{}", err);
    anyhow::anyhow!(err.user_message(fallback))
}

fn require_role(client: &ApiClient, role: Role) -> Result<()> {
    let session = client
        .session()
        .ok_or_else(|| anyhow::anyhow!(ApiError::NotAuthenticated.to_string()))?;

    match session.role() {
        Some(current) if *current != role => anyhow::bail!(
            "This command requires the {} role (logged in as {})",
            role,
            current
        ),
        _ => Ok(()),
    }
}

fn show_page<T: Record>(view: &mut ListView<T>, page: usize) {
    if page != 1 && !view.go_to(page) {
        warn!("Page {} out of range, showing page 1", page);
        println!("Page {} is out of range; showing page 1.", page);
    }
}

fn write_csv<R: serde::Serialize>(
    path: &Path,
    rows: impl IntoIterator<Item = R>,
) -> Result<()> {
    utils::validate_file_extension(&path.to_string_lossy(), &["csv"])?;
    let count = render::export_csv(path, rows)?;
    println!("Wrote {} rows to {}", count, path.display());
    Ok(())
}

pub async fn run(cli: Cli, config: PortalConfig) -> Result<()> {
    let client = ApiClient::from_config(&config)
        .await
        .context("Failed to initialise API client")?;
    info!("Using API at {}", client.base_url());

    match cli.command {
        Command::Register {
            name,
            email,
            password,
            confirm_password,
            role,
        } => {
            AuthApi::new(&client)
                .register(&name, &email, &password, &confirm_password, role.into())
                .await
                .map_err(|e| fail(e, "Registration failed"))?;
            println!("Registration successful! You can now log in.");
        }

        Command::Login { email, password } => {
            let outcome = AuthApi::new(&client)
                .login(&email, &password)
                .await
                .map_err(|e| fail(e, "Invalid email or password"))?;

            let who = outcome
                .user
                .as_ref()
                .and_then(|u| u.display_name())
                .unwrap_or(email.as_str())
                .to_string();
            println!("Logged in as {}.", who);
            if !outcome.token_stored {
                println!("Warning: the server did not return a token; requests will be anonymous.");
            }
            match outcome.landing {
                Role::Admin => println!("Next: jobportal admin dashboard"),
                Role::Recruiter => println!("Next: jobportal recruiter dashboard"),
                _ => println!("Next: jobportal seeker dashboard"),
            }
        }

        Command::Logout => {
            AuthApi::new(&client)
                .logout()
                .await
                .map_err(|e| fail(e, "Failed to clear session"))?;
            println!("Logged out.");
        }

        Command::Whoami => whoami(&client),

        Command::ForgotPassword { email } => {
            AuthApi::new(&client)
                .forgot_password(&email)
                .await
                .map_err(|e| fail(e, "Failed to send reset token."))?;
            println!("Reset token sent to your email!");
            println!("Next: jobportal reset-password --token <TOKEN> --password <NEW> --confirm-password <NEW>");
        }

        Command::ResetPassword {
            token,
            password,
            confirm_password,
        } => {
            AuthApi::new(&client)
                .reset_password(&token, &password, &confirm_password)
                .await
                .map_err(|e| fail(e, "Failed to reset password."))?;
            println!("Password reset successfully! You can log in now.");
        }

        Command::Jobs => {
            let jobs = SeekerApi::new(&client)
                .jobs()
                .await
                .map_err(|e| fail(e, "Failed to load jobs."))?;
            print!("{}", render::public_job_board(&listing::public_board(jobs)));
        }

        Command::Admin { command } => {
            require_role(&client, Role::Admin)?;
            handle_admin(&client, command).await?;
        }

        Command::Recruiter { command } => {
            require_role(&client, Role::Recruiter)?;
            handle_recruiter(&client, command).await?;
        }

        Command::Seeker { command } => {
            require_role(&client, Role::Seeker)?;
            handle_seeker(&client, command).await?;
        }
    }

    Ok(())
}

fn whoami(client: &ApiClient) {
    let Some(session) = client.session() else {
        println!("Not logged in.");
        return;
    };

    let user = session.user.clone().unwrap_or_default();
    println!("Name:  {}", user.display_name().unwrap_or("—"));
    println!(
        "Role:  {}",
        session
            .role()
            .map(|r| r.to_string())
            .unwrap_or_else(|| "unknown".to_string())
    );

    if let Some(claims) = session.claims() {
        if let Some(sub) = &claims.sub {
            println!("Token subject: {}", sub);
        }
        if let Some(exp) = claims.expires_at() {
            let state = if claims.is_expired(Utc::now()) {
                "expired"
            } else {
                "valid"
            };
            println!(
                "Token expires: {} ({})",
                exp.with_timezone(&render::ist()).format("%d %b %Y, %I:%M %p"),
                state
            );
        }
    }
}

async fn handle_admin(client: &ApiClient, command: AdminCommand) -> Result<()> {
    let api = AdminApi::new(client);

    match command {
        AdminCommand::Dashboard => {
            let stats = api
                .dashboard()
                .await
                .map_err(|e| fail(e, "Failed to load admin dashboard."))?;
            print!("{}", render::admin_dashboard(&stats));
        }

        AdminCommand::Users(args) => {
            let mut users = api
                .users()
                .await
                .map_err(|e| fail(e, "Failed to load users."))?;
            listing::newest_id_first(&mut users);

            if let Some(path) = &args.csv {
                write_csv(path, users.iter().map(UserRow::from))?;
            }

            let mut view = ListView::with_items(page_size::ADMIN_USERS, users);
            if view.is_empty() {
                println!("No users found.");
                return Ok(());
            }
            show_page(&mut view, args.page);
            print!("{}", render::users_table(view.page()));
            println!("{}", render::pager_line(&view));
        }

        AdminCommand::DeleteUser { id } => {
            let mut users = api
                .users()
                .await
                .map_err(|e| fail(e, "Failed to load users."))?;
            listing::newest_id_first(&mut users);
            let mut view = ListView::with_items(page_size::ADMIN_USERS, users);

            let target = view
                .find(id)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("User {} not found", id))?;
            if !admin::can_delete(&target) {
                anyhow::bail!("Admin accounts cannot be deleted");
            }

            let message = api
                .delete_user(&target)
                .await
                .map_err(|e| fail(e, "Failed to delete user."))?;
            view.remove(id);
            println!("{}", message);
            print!("{}", render::users_table(view.page()));
        }

        AdminCommand::Jobs(args) => {
            let mut jobs = api
                .jobs()
                .await
                .map_err(|e| fail(e, "Failed to load jobs."))?;
            listing::newest_id_first(&mut jobs);

            if let Some(path) = &args.csv {
                write_csv(path, jobs.iter().map(JobRow::from))?;
            }

            let mut view = ListView::with_items(page_size::ADMIN_JOBS, jobs);
            if view.is_empty() {
                println!("No jobs found.");
                return Ok(());
            }
            show_page(&mut view, args.page);
            print!("{}", render::admin_jobs_table(view.page()));
            println!("{}", render::pager_line(&view));
        }

        AdminCommand::DeleteJob { id } => {
            api.delete_job(id)
                .await
                .map_err(|e| fail(e, "Failed to delete job."))?;
            println!("{}", admin::JOB_DELETED);
        }
    }

    Ok(())
}

fn merge(target: &mut String, value: Option<String>) {
    if let Some(v) = value {
        *target = v;
    }
}

async fn handle_recruiter(client: &ApiClient, command: RecruiterCommand) -> Result<()> {
    let api = RecruiterApi::new(client);

    match command {
        RecruiterCommand::Dashboard => {
            let (dashboard, profile) = tokio::join!(api.dashboard(), api.profile());
            let dashboard =
                dashboard.map_err(|e| fail(e, "Failed to load recruiter dashboard."))?;
            let name = profile
                .ok()
                .and_then(|p| p.name)
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| "Recruiter".to_string());
            print!("{}", render::recruiter_dashboard(&name, &dashboard));
        }

        RecruiterCommand::Profile => {
            let profile = api
                .profile()
                .await
                .map_err(|e| fail(e, "Failed to load profile."))?;
            print!("{}", render::recruiter_profile(&profile));
        }

        RecruiterCommand::UpdateProfile {
            company_name,
            company_location,
            company_website,
            description,
        } => {
            let current = api
                .profile()
                .await
                .map_err(|e| fail(e, "Failed to load profile."))?;
            let mut request: RecruiterProfileRequest = current.to_request();
            merge(&mut request.company_name, company_name);
            merge(&mut request.company_location, company_location);
            merge(&mut request.company_website, company_website);
            merge(&mut request.description, description);

            api.update_profile(&request)
                .await
                .map_err(|e| fail(e, "Failed to update profile."))?;
            println!("Profile updated successfully");
        }

        RecruiterCommand::PostJob(fields) => {
            let job = JobRequest {
                company_name: fields.company_name.unwrap_or_default(),
                title: fields.title.unwrap_or_default(),
                location: fields.location.unwrap_or_default(),
                salary: fields.salary.unwrap_or_default(),
                experience: fields.experience.unwrap_or_default(),
                job_type: fields.job_type.unwrap_or_default(),
                skills: fields.skills.unwrap_or_default(),
                description: fields.description.unwrap_or_default(),
            };
            api.post_job(&job)
                .await
                .map_err(|e| fail(e, "Failed to post job."))?;
            println!("Job posted successfully!");
        }

        RecruiterCommand::Jobs(args) => {
            let jobs = api
                .my_jobs()
                .await
                .map_err(|e| fail(e, "Failed to load jobs."))?;

            if let Some(path) = &args.csv {
                write_csv(path, jobs.iter().map(JobRow::from))?;
            }

            let mut view = ListView::with_items(page_size::RECRUITER_JOBS, jobs);
            if view.is_empty() {
                println!("No jobs found.");
                return Ok(());
            }
            show_page(&mut view, args.page);
            print!("{}", render::recruiter_jobs_table(view.page()));
            println!("{}", render::pager_line(&view));
        }

        RecruiterCommand::ShowJob { id } => {
            let jobs = api
                .my_jobs()
                .await
                .map_err(|e| fail(e, "Failed to load jobs."))?;
            let job = jobs
                .iter()
                .find(|j| j.id == id)
                .ok_or_else(|| anyhow::anyhow!("Job {} not found among your postings", id))?;
            print!("{}", render::job_details(job));
        }

        RecruiterCommand::UpdateJob { id, fields, active } => {
            let jobs = api
                .my_jobs()
                .await
                .map_err(|e| fail(e, "Failed to load jobs."))?;
            let mut view = ListView::with_items(page_size::RECRUITER_JOBS, jobs);

            let mut request = view
                .find(id)
                .map(|j| j.to_update())
                .ok_or_else(|| anyhow::anyhow!("Job {} not found among your postings", id))?;
            merge(&mut request.company_name, fields.company_name);
            merge(&mut request.title, fields.title);
            merge(&mut request.location, fields.location);
            merge(&mut request.salary, fields.salary);
            merge(&mut request.experience, fields.experience);
            merge(&mut request.skills, fields.skills);
            merge(&mut request.description, fields.description);
            if let Some(flag) = active {
                request.active = flag;
            }
            if fields.job_type.is_some() {
                println!("Note: job type is fixed once posted; ignoring --job-type.");
            }

            let updated = api
                .update_job(id, &request)
                .await
                .map_err(|e| fail(e, "Failed to update job."))?;
            view.replace(id, updated);
            println!("Job updated successfully.");
            if let Some(job) = view.find(id) {
                print!("{}", render::job_details(job));
            }
        }

        RecruiterCommand::DeleteJob { id } => {
            api.delete_job(id)
                .await
                .map_err(|e| fail(e, "Failed to delete job."))?;
            println!("Job deleted successfully.");
        }

        RecruiterCommand::Applicants(args) => {
            let mut applications = api
                .applicants()
                .await
                .map_err(|e| fail(e, "Failed to load applicants."))?;
            listing::newest_submitted_first(&mut applications);

            if let Some(path) = &args.csv {
                write_csv(path, applications.iter().map(ApplicationRow::from))?;
            }

            let mut view = ListView::with_items(page_size::APPLICANTS, applications);
            if view.is_empty() {
                println!("No applicants yet.");
                return Ok(());
            }
            show_page(&mut view, args.page);
            print!("{}", render::applicants_table(view.page()));
            println!("{}", render::pager_line(&view));
        }

        RecruiterCommand::Resume {
            application_id,
            out,
        } => {
            let bytes = api
                .resume(application_id)
                .await
                .map_err(|e| fail(e, "No resume available."))?;

            let path = match out {
                Some(path) => path,
                None => {
                    let applicant = api
                        .applicants()
                        .await
                        .ok()
                        .and_then(|apps| {
                            apps.into_iter()
                                .find(|a| a.id == application_id)
                                .map(|a| a.applicant_name().to_string())
                        })
                        .unwrap_or_else(|| "applicant".to_string());
                    let cwd = std::env::current_dir().context("Failed to get current directory")?;
                    utils::resume_output_path(&cwd, application_id, &applicant)
                }
            };

            utils::write_file_bytes(&path, &bytes).await?;
            println!("Saved resume ({} bytes) to {}", bytes.len(), path.display());
        }

        RecruiterCommand::SetStatus {
            application_id,
            status,
        } => {
            api.update_application_status(application_id, &status)
                .await
                .map_err(|e| fail(e, "Failed to update status."))?;
            println!("Application {} is now {}", application_id, status);
        }
    }

    Ok(())
}

async fn handle_seeker(client: &ApiClient, command: SeekerCommand) -> Result<()> {
    let api = SeekerApi::new(client);

    match command {
        SeekerCommand::Dashboard => {
            let (dashboard, profile) = tokio::join!(api.dashboard(), api.profile());
            let dashboard = dashboard.map_err(|e| fail(e, "Failed to load seeker dashboard."))?;
            let name = profile
                .ok()
                .and_then(|p| p.name)
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| "Seeker".to_string());
            print!("{}", render::seeker_dashboard(&name, &dashboard));
            println!("Browse jobs: jobportal seeker jobs");
        }

        SeekerCommand::Profile => {
            let profile = api
                .profile()
                .await
                .map_err(|e| fail(e, "Failed to load profile."))?;
            print!("{}", render::seeker_profile(&profile));
        }

        SeekerCommand::UpdateProfile {
            phone,
            location,
            skills,
            experience,
            education,
        } => {
            let current = api
                .profile()
                .await
                .map_err(|e| fail(e, "Failed to load profile."))?;
            let mut request: SeekerProfileRequest = current.to_request();
            merge(&mut request.phone, phone);
            merge(&mut request.location, location);
            merge(&mut request.skills, skills);
            merge(&mut request.experience, experience);
            merge(&mut request.education, education);

            api.update_profile(&request)
                .await
                .map_err(|e| fail(e, "Failed to update profile."))?;
            println!("Profile updated successfully!");
        }

        SeekerCommand::Jobs { page } => {
            let jobs = api
                .jobs_with_applied()
                .await
                .map_err(|e| fail(e, "Failed to load jobs."))?;
            if jobs.is_empty() {
                println!("No jobs available right now.");
                return Ok(());
            }

            let mut pager = crate::pagination::Paginator::new(page_size::SEEKER_JOB_BOARD);
            if page != 1 && !pager.go_to(page, jobs.len()) {
                println!("Page {} is out of range; showing page 1.", page);
            }
            print!("{}", render::seeker_job_board(pager.slice(&jobs)));
            println!(
                "Page {} of {}",
                pager.current(),
                pager.total_pages(jobs.len())
            );
        }

        SeekerCommand::Applications(args) => {
            let mut applications = api
                .my_applications()
                .await
                .map_err(|e| fail(e, "Failed to load applications."))?;
            listing::newest_applied_first(&mut applications);

            if let Some(path) = &args.csv {
                write_csv(path, applications.iter().map(ApplicationRow::from))?;
            }

            let mut view = ListView::with_items(page_size::SEEKER_APPLICATIONS, applications);
            if view.is_empty() {
                println!("You have not applied to any jobs yet.");
                return Ok(());
            }
            show_page(&mut view, args.page);
            print!("{}", render::applications_table(view.page()));
            println!("{}", render::pager_line(&view));
        }

        SeekerCommand::Apply {
            job_id,
            phone,
            cover_letter,
            resume,
        } => {
            let job = api
                .job(job_id)
                .await
                .map_err(|e| fail(e, "Failed to load job or profile."))?;
            let title = job
                .as_ref()
                .and_then(|j| j.title.clone())
                .unwrap_or_else(|| "Job".to_string());
            println!("Applying for {}", title);

            let form = ApplyForm {
                phone,
                cover_letter,
                resume_path: Some(resume),
            };
            api.apply(job_id, &form)
                .await
                .map_err(|e| fail(e, "Failed to apply."))?;
            println!("Application Submitted Successfully");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_list_flags() {
        let cli = Cli::try_parse_from([
            "jobportal", "admin", "users", "--page", "3", "--csv", "users.csv",
        ])
        .unwrap();
        match cli.command {
            Command::Admin {
                command: AdminCommand::Users(args),
            } => {
                assert_eq!(args.page, 3);
                assert_eq!(args.csv, Some(PathBuf::from("users.csv")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_set_status_parses_case_insensitively() {
        let cli =
            Cli::try_parse_from(["jobportal", "recruiter", "set-status", "12", "shortlisted"])
                .unwrap();
        match cli.command {
            Command::Recruiter {
                command:
                    RecruiterCommand::SetStatus {
                        application_id,
                        status,
                    },
            } => {
                assert_eq!(application_id, 12);
                assert_eq!(status, ApplicationStatus::Shortlisted);
            }
            other => panic!("unexpected command: {other:?}"),
        }

        assert!(
            Cli::try_parse_from(["jobportal", "recruiter", "set-status", "12", "hired"]).is_err()
        );
    }

    #[test]
    fn test_register_role_defaults_to_seeker() {
        let cli = Cli::try_parse_from([
            "jobportal",
            "register",
            "--name",
            "Asha",
            "--email",
            "asha@example.com",
            "--password",
            "secret1",
            "--confirm-password",
            "secret1",
        ])
        .unwrap();
        match cli.command {
            Command::Register { role, .. } => assert_eq!(Role::from(role), Role::Seeker),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
