use std::path::PathBuf;
use std::process;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use jobseeker::api::ApiClient;
use jobseeker::comparisons::ComparisonWorkspace;
use jobseeker::config::Config;
use jobseeker::display::pdf::{document_for, save_documents};
use jobseeker::display::{text, JsonView, PdfKind};
use jobseeker::job_postings::{JobDetailsView, JobPostingBrowser};
use jobseeker::model_selector::ModelSelector;
use jobseeker::models::llm::DEFAULT_TEMPERATURE;
use jobseeker::models::{ModelParameters, NewPassword, UpdatePassword, UserRegister};
use jobseeker::notify::{ToastStatus, Toaster, SHORT_TOAST_MS};
use jobseeker::pages::{AdminListing, Dashboard};
use jobseeker::profile::{ProfileForm, ResumeFlow, SelectedFile};
use jobseeker::session::Session;

#[derive(Parser)]
#[command(name = "jobseeker")]
#[command(about = "Résumé and cover-letter assistant client", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct ModelArgs {
    /// Model alias from `jobseeker models` (defaults to the first one)
    #[arg(long)]
    model: Option<String>,

    /// Sampling temperature, 0.0 to 2.0
    #[arg(long, default_value_t = DEFAULT_TEMPERATURE)]
    temperature: f32,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and print the access token to export as API_TOKEN
    Login {
        username: String,
        #[arg(long, env = "JOBSEEKER_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account
    Signup {
        username: String,
        #[arg(long, env = "JOBSEEKER_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        full_name: Option<String>,
    },

    /// Send a password recovery email
    RecoverPassword { email: String },

    /// Set a new password using a recovery token
    ResetPassword { token: String, new_password: String },

    /// Change the current user's password
    ChangePassword {
        current_password: String,
        new_password: String,
    },

    /// Show the current user's profile
    Me,

    /// Show the landing page greeting
    Dashboard,

    /// Show the user management table
    Admin,

    /// Upload a PDF résumé
    UploadResume {
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },

    /// Parse the uploaded résumé with a language model
    ParseResume {
        #[command(flatten)]
        model: ModelArgs,
    },

    /// Update name, username or additional info
    UpdateProfile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        additional_info: Option<String>,
    },

    /// List selectable models
    Models,

    /// Browse job postings
    Jobs {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        company: String,
        /// Show details and comparison status of this job posting
        #[arg(long, value_name = "JOB_ID")]
        select: Option<i64>,
        /// Activate a comparison for the selected job posting
        #[arg(long, requires = "select")]
        activate: bool,
    },

    /// List your comparisons
    Comparisons,

    /// Show one comparison
    Comparison {
        id: i64,
        /// Write the built PDFs to OUTPUT_DIR
        #[arg(long)]
        save_pdfs: bool,
        /// Print the text of the built PDFs
        #[arg(long)]
        preview: bool,
    },

    /// Generate work experiences for a comparison
    GenerateWorkExperiences {
        id: i64,
        #[command(flatten)]
        model: ModelArgs,
    },

    /// Generate cover-letter paragraphs for a comparison
    GenerateCoverLetter {
        id: i64,
        #[command(flatten)]
        model: ModelArgs,
    },

    /// Render the résumé PDF of a comparison
    BuildResume { id: i64 },

    /// Render the cover-letter PDF of a comparison
    BuildCoverLetter { id: i64 },

    /// Edit one generated work experience
    EditWorkExperience {
        comparison: i64,
        index: usize,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        start_year: Option<i32>,
        #[arg(long)]
        start_month: Option<u32>,
        #[arg(long)]
        end_year: Option<i32>,
        #[arg(long)]
        end_month: Option<u32>,
        /// Mark the position as current (clears the end date)
        #[arg(long, conflicts_with_all = ["end_year", "end_month"])]
        present: bool,
        /// Append an accomplishment (repeatable)
        #[arg(long = "add")]
        add: Vec<String>,
        /// Remove the accomplishment at this index (repeatable)
        #[arg(long = "remove")]
        remove: Vec<usize>,
    },

    /// Replace the text of one cover-letter paragraph
    EditParagraph {
        comparison: i64,
        index: usize,
        text: String,
    },

    /// Deactivate the comparison of a job posting
    Deactivate { job_posting_id: i64 },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("jobseeker v{} against {}", env!("CARGO_PKG_VERSION"), config.api_base_url);

    let session = Session::new(ApiClient::from_config(&config)?);
    let toaster = Toaster::new();

    let result = run(cli.command, &config, &session, &toaster).await;

    let failed = toaster.has_errors();
    for notification in toaster.drain() {
        let tag = match notification.status {
            ToastStatus::Success => "ok",
            ToastStatus::Error => "error",
            ToastStatus::Warning => "warning",
            ToastStatus::Info => "info",
        };
        eprintln!("[{tag}] {}: {}", notification.title, notification.description);
    }

    result?;
    if failed {
        process::exit(1);
    }
    Ok(())
}

async fn run(command: Commands, config: &Config, session: &Session, toaster: &Toaster) -> Result<()> {
    let api = &session.api;
    let workspace = || ComparisonWorkspace::new(api.clone(), toaster.clone(), config.build_policy);

    match command {
        Commands::Login { username, password } => {
            let token = session.login(&username, &password).await?;
            println!("API_TOKEN={}", token.access_token);
        }
        Commands::Signup {
            username,
            password,
            full_name,
        } => {
            let user = api
                .register_user(&UserRegister {
                    username,
                    password,
                    full_name,
                })
                .await?;
            println!("Created user {} ({})", user.username, user.id);
        }
        Commands::RecoverPassword { email } => {
            println!("{}", api.recover_password(&email).await?.message);
        }
        Commands::ResetPassword { token, new_password } => {
            let body = NewPassword { token, new_password };
            println!("{}", api.reset_password(&body).await?.message);
        }
        Commands::ChangePassword {
            current_password,
            new_password,
        } => {
            let body = UpdatePassword {
                current_password,
                new_password,
            };
            println!("{}", api.update_password_me(&body).await?.message);
        }
        Commands::Me => {
            let mut user = serde_json::to_value(session.current_user().await?)?;
            if let Some(resume) = user.get_mut("resume") {
                if let Some(encoded) = resume.as_str() {
                    *resume = format!("<{} base64 chars>", encoded.len()).into();
                }
            }
            println!("{}", JsonView::pretty_value(&user));
        }
        Commands::Dashboard => {
            println!("{}", Dashboard::load(session).await?);
        }
        Commands::Admin => {
            session.current_user().await?;
            print!("{}", AdminListing::load(session).await?);
        }
        Commands::UploadResume { path } => {
            let file = SelectedFile::from_path(&path).await?;
            ResumeFlow::new(session.clone(), toaster.clone())
                .upload(&file)
                .await;
        }
        Commands::ParseResume { model } => {
            let parameters = model_parameters(session, toaster, &model).await;
            ResumeFlow::new(session.clone(), toaster.clone())
                .parse(parameters.as_ref())
                .await;
        }
        Commands::UpdateProfile {
            name,
            username,
            additional_info,
        } => {
            let user = session.current_user().await?;
            let mut form = ProfileForm::new(session.clone(), toaster.clone(), &user);
            form.state.toggle_edit();
            if let Some(fields) = form.state.values_mut() {
                if let Some(name) = name {
                    fields.name = name;
                }
                if let Some(username) = username {
                    fields.username = username;
                }
                if let Some(info) = additional_info {
                    fields.additional_info = info;
                }
            }
            if !form.state.is_dirty() {
                println!("Nothing to update");
            } else {
                form.save().await;
            }
        }
        Commands::Models => {
            let mut selector = ModelSelector::new();
            selector.load(api, &session.cache, toaster).await;
            for option in selector.options() {
                let marker = if selector.selected() == Some(option.llm_alias.as_str()) {
                    "*"
                } else {
                    " "
                };
                println!("{marker} {:<14} {}", option.llm_alias, option.llm_value);
            }
        }
        Commands::Jobs {
            page,
            title,
            company,
            select,
            activate,
        } => {
            let mut browser = JobPostingBrowser::new(api.clone(), toaster.clone());
            browser.apply_filters(&title, &company).await;
            if page > 1 && !browser.go_to_page(page).await {
                bail!("page {page} is out of range");
            }
            print!("{}", text::job_list(browser.postings()));
            println!("{}", browser.pagination().label());

            if let Some(job_id) = select {
                if !browser.select_job(job_id).await {
                    bail!("job posting {job_id} is not on this page");
                }
                if let Some(job) = browser.selected() {
                    println!("\n{}", JobDetailsView::from(job));
                }
                if activate {
                    browser.activate_selected().await;
                }
                println!("{}", browser.activation_label());
            }
        }
        Commands::Comparisons => {
            let workspace = workspace();
            workspace.load().await;
            print!("{}", text::comparison_list(&workspace.comparisons()));
        }
        Commands::Comparison {
            id,
            save_pdfs,
            preview,
        } => {
            let workspace = workspace();
            if workspace.select(id).await {
                if let Some(detail) = workspace.selected() {
                    print!("{}", text::comparison_detail(&detail));
                    if preview {
                        for kind in [PdfKind::Resume, PdfKind::CoverLetter] {
                            if let Some(document) = document_for(&detail.comparison, kind) {
                                println!("\n== {kind} text ==\n{}", document?.text_preview()?);
                            }
                        }
                    }
                    if save_pdfs {
                        for path in save_documents(&detail.comparison, &config.output_dir).await? {
                            println!("Saved {}", path.display());
                        }
                    }
                }
            }
        }
        Commands::GenerateWorkExperiences { id, model } => {
            let workspace = workspace();
            if workspace.select(id).await {
                if let Some(parameters) = model_parameters(session, toaster, &model).await {
                    workspace.generate_work_experiences(&parameters).await;
                }
            }
        }
        Commands::GenerateCoverLetter { id, model } => {
            let workspace = workspace();
            if workspace.select(id).await {
                if let Some(parameters) = model_parameters(session, toaster, &model).await {
                    workspace.generate_cover_letter_paragraphs(&parameters).await;
                }
            }
        }
        Commands::BuildResume { id } => {
            let workspace = workspace();
            if workspace.select(id).await {
                workspace.build_resume().await;
            }
        }
        Commands::BuildCoverLetter { id } => {
            let workspace = workspace();
            if workspace.select(id).await {
                workspace.build_cover_letter().await;
            }
        }
        Commands::EditWorkExperience {
            comparison,
            index,
            title,
            company,
            start_year,
            start_month,
            end_year,
            end_month,
            present,
            add,
            mut remove,
        } => {
            let workspace = workspace();
            if !workspace.select(comparison).await {
                return Ok(());
            }
            let opened = workspace.edit_work_experiences(|editor| {
                if !editor.begin_edit(index) {
                    return false;
                }
                let Some(draft) = editor.draft_mut() else {
                    return false;
                };
                if let Some(title) = title {
                    draft.title = title;
                }
                if let Some(company) = company {
                    draft.company = company;
                }
                if start_year.is_some() || start_month.is_some() {
                    draft.set_start(start_year.or(draft.start_year), start_month.or(draft.start_month));
                }
                if present {
                    draft.set_end(None, None);
                } else if end_year.is_some() || end_month.is_some() {
                    draft.set_end(end_year.or(draft.end_year), end_month.or(draft.end_month));
                }
                remove.sort_unstable();
                for i in remove.into_iter().rev() {
                    draft.remove_accomplishment(i);
                }
                for text in add {
                    draft.add_accomplishment(text);
                }
                true
            });
            if !opened {
                bail!("comparison {comparison} has no work experience #{index}");
            }
            workspace.save_work_experience().await;
        }
        Commands::EditParagraph {
            comparison,
            index,
            text,
        } => {
            let workspace = workspace();
            if !workspace.select(comparison).await {
                return Ok(());
            }
            let opened = workspace.edit_paragraphs(|editor| {
                editor.begin_edit(index)
                    && editor
                        .draft_mut()
                        .map(|draft| draft.paragraph_text = text)
                        .is_some()
            });
            if !opened {
                bail!("comparison {comparison} has no paragraph #{index}");
            }
            workspace.save_cover_letter_paragraph().await;
        }
        Commands::Deactivate { job_posting_id } => {
            match api.deactivate_comparison(job_posting_id).await {
                Ok(response) => {
                    toaster.success("Comparison Deactivated", &response.message, SHORT_TOAST_MS)
                }
                Err(e) => toaster.error("Error", &e.detail(), SHORT_TOAST_MS),
            }
        }
    }
    Ok(())
}

/// Resolves the model choice, raising a toast when it cannot be honoured.
async fn model_parameters(session: &Session, toaster: &Toaster, args: &ModelArgs) -> Option<ModelParameters> {
    let mut selector = ModelSelector::new();
    selector.load(&session.api, &session.cache, toaster).await;
    if let Some(alias) = &args.model {
        if let Err(e) = selector.select(alias) {
            toaster.error("Error!", &e.detail(), SHORT_TOAST_MS);
            return None;
        }
    }
    selector.set_temperature(args.temperature);
    selector.parameters()
}
