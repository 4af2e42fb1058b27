use crate::config::AppConfig;
use crate::core::theme::Theme;
use crate::domain::model::{BlogDraft, PortfolioDraft};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "agency-console")]
#[command(about = "Admin console for the agency website backend")]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the backend base URL
    #[arg(long, global = true)]
    pub api_base_url: Option<String>,

    /// Directory holding the persisted session and theme
    #[arg(long, global = true)]
    pub state_dir: Option<PathBuf>,

    /// Start from this location instead of `/` (affects post-401 redirects)
    #[arg(long, global = true, default_value = "/")]
    pub from: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Log in as an admin and persist the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show session and theme state
    Status,
    /// Resolve a site path through the route guard
    Route { path: String },
    /// Show, toggle or set the theme
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
    /// Manage blog posts
    Blog {
        #[command(subcommand)]
        action: ResourceAction,
    },
    /// Manage portfolio items
    Portfolio {
        #[command(subcommand)]
        action: ResourceAction,
    },
    /// Manage contact-form messages
    Contacts {
        #[command(subcommand)]
        action: ContactsAction,
    },
    /// Submit the public contact form
    Contact(ContactArgs),
    /// Sign an email up for the newsletter
    Subscribe {
        email: String,
        #[arg(long)]
        source: Option<String>,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ThemeAction {
    Show,
    Toggle,
    Set { theme: Theme },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ResourceAction {
    /// List everything, or only one status
    List {
        #[arg(long)]
        status: Option<String>,
        /// Published items only, as the public pages show them
        #[arg(long, conflicts_with = "status")]
        public: bool,
    },
    Show {
        id: String,
    },
    Create(DraftArgs),
    Update {
        id: String,
        #[command(flatten)]
        draft: DraftArgs,
    },
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Debug, Clone, Args)]
pub struct DraftArgs {
    #[arg(long, default_value = "")]
    pub title: String,
    #[arg(long, default_value = "")]
    pub description: String,
    #[arg(long, default_value = "")]
    pub content: String,
    #[arg(long, default_value = "draft")]
    pub status: String,
    #[arg(long)]
    pub author: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub client: Option<String>,
    #[arg(long)]
    pub link: Option<String>,
    /// Comma-separated tags (blog) or technologies (portfolio)
    #[arg(long, value_delimiter = ',')]
    pub tags: Vec<String>,
    /// Image to upload before saving
    #[arg(long)]
    pub image: Option<PathBuf>,
}

impl DraftArgs {
    pub fn to_blog_draft(&self) -> BlogDraft {
        BlogDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            content: self.content.clone(),
            status: self.status.clone(),
            author: self.author.clone(),
            tags: self.tags.clone(),
            image: None,
        }
    }

    pub fn to_portfolio_draft(&self) -> PortfolioDraft {
        PortfolioDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            client: self.client.clone(),
            link: self.link.clone(),
            technologies: self.tags.clone(),
            status: self.status.clone(),
            image: None,
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum ContactsAction {
    List,
    Reply {
        id: String,
        #[arg(long)]
        message: String,
    },
    Status {
        id: String,
        status: String,
    },
    Delete {
        id: String,
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Debug, Clone, Args)]
pub struct ContactArgs {
    #[arg(long, default_value = "")]
    pub name: String,
    #[arg(long, default_value = "")]
    pub email: String,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long, default_value = "")]
    pub message: String,
}

impl Cli {
    /// Flags take precedence over file and environment.
    pub fn apply_to(&self, config: &mut AppConfig) {
        if let Some(base_url) = &self.api_base_url {
            config.api.base_url = base_url.clone();
        }
        if let Some(state_dir) = &self.state_dir {
            config.storage.state_dir = Some(state_dir.clone());
        }
    }
}
