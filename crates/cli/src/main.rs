mod commands;

use clap::{CommandFactory, Parser};
use clap_complete::{Shell, generate};
use landing_kit_core::ServiceType;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "landing-kit")]
#[command(version, about = "Landing page generator for chauffeur and rental services", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Initialize a new site project
    Init {
        /// Path to the project directory
        path: PathBuf,

        /// Business name
        #[arg(long)]
        name: Option<String>,

        /// Contact phone number
        #[arg(long)]
        phone: Option<String>,

        /// Contact email address
        #[arg(long)]
        email: Option<String>,

        /// Canonical site URL
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Generate every landing page and patch the route registry and sitemap
    Generate {
        /// Path to the project directory
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Override the output directory for generated pages
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate a single page with a custom slug and title
    CreatePage {
        /// Route slug for the new page
        slug: String,

        /// Page title
        title: String,

        /// Location name (known or new)
        location: String,

        /// Service type: ncc, transfer, tour or rental
        #[arg(value_parser = parse_service)]
        service: ServiceType,

        /// Path to the project directory
        #[arg(long, default_value = ".")]
        project: PathBuf,
    },

    /// Validate dataset, templates and generated artifacts
    Validate {
        /// Path to the project directory
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Preview pages locally with hot reload
    Preview {
        /// Path to the project directory
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Port to serve on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn parse_service(s: &str) -> Result<ServiceType, String> {
    s.parse::<ServiceType>().map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Init {
            path,
            name,
            phone,
            email,
            base_url,
        } => commands::init::run(path, name, phone, email, base_url).await,
        Command::Generate { path, output } => commands::generate::run(path, output).await,
        Command::CreatePage {
            slug,
            title,
            location,
            service,
            project,
        } => commands::create_page::run(project, slug, title, location, service).await,
        Command::Validate { path } => commands::validate::run(path).await,
        Command::Preview { path, port } => commands::preview::run(path, port).await,
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "landing-kit", &mut io::stdout());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_defaults_to_current_dir() {
        let cli = Cli::try_parse_from(["landing-kit", "generate"]).unwrap();
        match cli.command {
            Command::Generate { path, output } => {
                assert_eq!(path, PathBuf::from("."));
                assert!(output.is_none());
            }
            _ => panic!("expected generate subcommand"),
        }
    }

    #[test]
    fn test_create_page_parses_service() {
        let cli = Cli::try_parse_from([
            "landing-kit",
            "create-page",
            "ncc-bari-centro",
            "NCC Bari Centro",
            "Bari",
            "ncc",
        ])
        .unwrap();
        match cli.command {
            Command::CreatePage {
                slug,
                title,
                location,
                service,
                project,
            } => {
                assert_eq!(slug, "ncc-bari-centro");
                assert_eq!(title, "NCC Bari Centro");
                assert_eq!(location, "Bari");
                assert_eq!(service, ServiceType::Ncc);
                assert_eq!(project, PathBuf::from("."));
            }
            _ => panic!("expected create-page subcommand"),
        }
    }

    #[test]
    fn test_create_page_rejects_unknown_service() {
        let result = Cli::try_parse_from([
            "landing-kit",
            "create-page",
            "boat-bari",
            "Boat Bari",
            "Bari",
            "boat",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_init_accepts_overrides() {
        let cli = Cli::try_parse_from([
            "landing-kit",
            "init",
            "mysite",
            "--name",
            "Salento Go",
            "--base-url",
            "https://salentogo.example",
        ])
        .unwrap();
        match cli.command {
            Command::Init {
                path,
                name,
                phone,
                email,
                base_url,
            } => {
                assert_eq!(path, PathBuf::from("mysite"));
                assert_eq!(name.as_deref(), Some("Salento Go"));
                assert!(phone.is_none());
                assert!(email.is_none());
                assert_eq!(base_url.as_deref(), Some("https://salentogo.example"));
            }
            _ => panic!("expected init subcommand"),
        }
    }
}
