use agency_console::adapters::{FixedAnswer, PromptConfirm};
use agency_console::app::screens::{CrudScreen, FeedState, LoadState, PublicFeed, Screen};
use agency_console::config::cli::{
    Cli, Command, ContactArgs, ContactsAction, DraftArgs, ResourceAction, ThemeAction,
};
use agency_console::core::resources::ResourceApi;
use agency_console::domain::model::ImageFile;
use agency_console::domain::ports::{Confirm, Resource};
use agency_console::utils::error::{ErrorSeverity, SiteError};
use agency_console::utils::{logger, validation::Validate};
use agency_console::{AppConfig, Site, Visit};
use anyhow::Context;
use clap::Parser;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    let mut config = match &cli.config {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("failed to load config file '{}'", path.display()))?,
        None => AppConfig::default(),
    };
    config.apply_env_overrides();
    cli.apply_to(&mut config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let confirm: Arc<dyn Confirm> = if skips_confirmation(&cli.command) {
        Arc::new(FixedAnswer(true))
    } else {
        Arc::new(PromptConfirm)
    };

    let mut site = Site::open(config, &cli.from, confirm)?;
    let outcome = run(&cli.command, &mut site).await;

    for toast in site.toasts().drain() {
        println!("{}", toast);
    }

    match outcome {
        Ok(true) => Ok(()),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            tracing::error!(
                "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
            Ok(())
        }
    }
}

fn skips_confirmation(command: &Command) -> bool {
    match command {
        Command::Blog {
            action: ResourceAction::Delete { yes, .. },
        }
        | Command::Portfolio {
            action: ResourceAction::Delete { yes, .. },
        }
        | Command::Contacts {
            action: ContactsAction::Delete { yes, .. },
        } => *yes,
        _ => false,
    }
}

async fn run(command: &Command, site: &mut Site) -> Result<bool, SiteError> {
    match command {
        Command::Login { email, password } => {
            let mut screen = site.login_screen();
            screen.mount().await;
            let ok = screen.submit(email, password).await;
            if ok {
                println!("Logged in. Continuing at {}", site.navigator().current_path());
            }
            Ok(ok)
        }
        Command::Logout => {
            site.logout()?;
            Ok(true)
        }
        Command::Status => {
            let session = site.session();
            match session.profile() {
                Some(profile) if session.is_authenticated() => {
                    println!("Logged in as {}", profile.display_name())
                }
                _ if session.is_authenticated() => println!("Logged in"),
                _ => println!("Not logged in"),
            }
            println!("Theme: {}", site.theme().current());
            println!("API: {}", site.api().base_url());
            Ok(true)
        }
        Command::Route { path } => {
            match site.visit(path) {
                Visit::Rendered(route) => println!("render {} ({})", route.title(), path),
                Visit::Redirected { to, .. } => println!("redirect -> {}", to),
            }
            Ok(true)
        }
        Command::Theme { action } => {
            match action {
                None | Some(ThemeAction::Show) => {}
                Some(ThemeAction::Toggle) => {
                    site.theme_mut().toggle()?;
                }
                Some(ThemeAction::Set { theme }) => site.theme_mut().set(*theme)?,
            }
            println!("{}", site.theme().current());
            Ok(true)
        }
        Command::Blog { action } => {
            let (screen, feed) = (site.blog_screen(), site.blog_feed());
            run_resource(
                site,
                "/admin/blog",
                screen,
                feed,
                action,
                DraftArgs::to_blog_draft,
            )
            .await
        }
        Command::Portfolio { action } => {
            let (screen, feed) = (site.portfolio_screen(), site.portfolio_feed());
            run_resource(
                site,
                "/admin/portfolio",
                screen,
                feed,
                action,
                DraftArgs::to_portfolio_draft,
            )
            .await
        }
        Command::Contacts { action } => run_contacts(site, action).await,
        Command::Contact(args) => run_contact_form(site, args).await,
        Command::Subscribe { email, source } => {
            site.newsletter().subscribe(email, source.as_deref()).await?;
            println!("Subscribed {}", email.trim());
            Ok(true)
        }
    }
}

/// Admin commands go through the same guard as the admin pages.
fn enter_admin(site: &Site, path: &str) -> bool {
    match site.visit(path) {
        Visit::Rendered(_) => true,
        Visit::Redirected { .. } => {
            eprintln!("Not logged in. Run `agency-console login` first.");
            false
        }
    }
}

fn summary_line<R: Resource>(item: &R) -> String {
    let value = serde_json::to_value(item).unwrap_or_default();
    let field = |name: &str| {
        value
            .get(name)
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string()
    };
    format!("{}\t{}\t{}", item.id(), field("status"), field("title"))
}

async fn run_resource<R, F>(
    site: &Site,
    admin_path: &str,
    mut screen: CrudScreen<R>,
    mut feed: PublicFeed<R>,
    action: &ResourceAction,
    to_draft: F,
) -> Result<bool, SiteError>
where
    R: Resource,
    F: Fn(&DraftArgs) -> R::Draft,
{
    match action {
        ResourceAction::List { public: true, .. } => {
            site.visit(&admin_path.replacen("/admin", "", 1));
            feed.mount().await;
            match feed.state() {
                FeedState::Loaded(items) => {
                    items.iter().for_each(|item| println!("{}", summary_line(item)));
                    Ok(true)
                }
                FeedState::Failed(message) => {
                    println!("{}", message);
                    Ok(false)
                }
                FeedState::Idle | FeedState::Loading => Ok(false),
            }
        }
        ResourceAction::Show { id } => {
            let item = ResourceApi::<R>::new(site.api().clone()).get(id).await?;
            println!("{}", serde_json::to_string_pretty(&item)?);
            Ok(true)
        }
        _ if !enter_admin(site, admin_path) => Ok(false),
        ResourceAction::List { status: Some(status), .. } => {
            let items = ResourceApi::<R>::new(site.api().clone())
                .list_by_status(status)
                .await?;
            items.iter().for_each(|item| println!("{}", summary_line(item)));
            Ok(true)
        }
        ResourceAction::List { .. } => {
            screen.mount().await;
            screen
                .items()
                .iter()
                .for_each(|item| println!("{}", summary_line(item)));
            Ok(!matches!(
                screen.state(),
                LoadState::Failed(_)
            ))
        }
        ResourceAction::Create(args) => {
            let image = args.image.as_deref().map(ImageFile::from_path).transpose()?;
            let saved = screen.save(None, to_draft(args), image).await;
            if let Some(item) = &saved {
                println!("{}", summary_line(item));
            }
            Ok(saved.is_some())
        }
        ResourceAction::Update { id, draft } => {
            let image = draft.image.as_deref().map(ImageFile::from_path).transpose()?;
            let saved = screen.save(Some(id.as_str()), to_draft(draft), image).await;
            if let Some(item) = &saved {
                println!("{}", summary_line(item));
            }
            Ok(saved.is_some())
        }
        ResourceAction::Delete { id, .. } => Ok(screen.delete(id).await),
    }
}

async fn run_contacts(site: &Site, action: &ContactsAction) -> Result<bool, SiteError> {
    if !enter_admin(site, "/admin/contacts") {
        return Ok(false);
    }

    let mut screen = site.contacts_screen();
    let ok = match action {
        ContactsAction::List => {
            screen.mount().await;
            for message in screen.messages() {
                println!(
                    "{}\t{}\t{} <{}>\t{}",
                    message.id,
                    message.status.as_deref().unwrap_or("new"),
                    message.name,
                    message.email,
                    message.subject.as_deref().unwrap_or("")
                );
            }
            !matches!(
                screen.state(),
                LoadState::Failed(_)
            )
        }
        ContactsAction::Reply { id, message } => screen.reply(id, message).await,
        ContactsAction::Status { id, status } => screen.set_status(id, status).await,
        ContactsAction::Delete { id, .. } => screen.delete(id).await,
    };
    screen.unmount();
    Ok(ok)
}

async fn run_contact_form(site: &Site, args: &ContactArgs) -> Result<bool, SiteError> {
    site.visit("/contact");

    let mut form = site.contact_form();
    form.name = args.name.clone();
    form.email = args.email.clone();
    form.phone = args.phone.clone().unwrap_or_default();
    form.message = args.message.clone();

    let ok = form.submit().await;
    if ok {
        println!("Sent. Now at {}", site.navigator().current_path());
    }
    Ok(ok)
}
