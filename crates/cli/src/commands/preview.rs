use anyhow::{Context, Result};
use axum::{
    Router,
    extract::{Path as UrlPath, State},
    http::StatusCode,
    response::{
        Html, IntoResponse, Response,
        sse::{Event, KeepAlive, Sse},
    },
    routing::get,
};
use landing_kit_core::slug::{make_slug, normalize_slug};
use landing_kit_core::{Dataset, LocationEntry, ServiceType, SiteConfig, load_site_config};
use landing_kit_generator::{PageOverrides, page_html, render_page};
use notify::{Event as NotifyEvent, EventKind, RecursiveMode, Watcher};
use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
};
use tokio::sync::broadcast;
use tower_http::services::ServeDir;

#[derive(Clone)]
struct AppState {
    project_root: PathBuf,
    reload_tx: broadcast::Sender<()>,
}

/// Start preview server with hot reload for local development.
///
/// Dataset pages are rendered on the fly per request, so edits to site.toml
/// show up on the next reload without regenerating anything. Pages created
/// with custom slugs are served from the generated files on disk.
///
/// # Arguments
///
/// * `path` - Path to the project directory
/// * `port` - Port to serve on (default: 8080)
pub async fn run(path: PathBuf, port: u16) -> Result<()> {
    println!("🚗 Starting preview server...");
    println!("   Project: {}", path.display());

    if !path.exists() {
        anyhow::bail!(
            "Project directory does not exist: {}\nRun 'landing-kit init {}' first",
            path.display(),
            path.display()
        );
    }

    let site = load_site_config(&path).context("Failed to load site.toml")?;
    let dataset = Dataset::builtin();

    println!("   ✓ Business: {}", site.business.name);
    println!(
        "   ✓ Pages: {} locations x {} services",
        dataset.flatten_locations().len(),
        ServiceType::ALL.len()
    );

    // Create broadcast channel for reload events
    let (reload_tx, _) = broadcast::channel::<()>(100);

    let state = AppState {
        project_root: path.clone(),
        reload_tx: reload_tx.clone(),
    };

    // Build router
    let app = Router::new()
        .route("/", get(index_handler))
        .route("/_reload", get(sse_handler))
        .route("/{slug}", get(page_handler))
        .nest_service("/images", ServeDir::new(images_dir(&path, &site)))
        .with_state(state);

    // Start file watcher
    let watcher_path = path.clone();
    let watcher_tx = reload_tx.clone();
    tokio::spawn(async move {
        if let Err(e) = watch_files(watcher_path, watcher_tx).await {
            eprintln!("File watcher error: {}", e);
        }
    });

    // Start server
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    println!("\n🚀 Preview ready at: http://localhost:{}", port);
    println!("   Press Ctrl+C to stop\n");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to port")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Hero images sit next to the pages directory in the default layout;
/// fall back to an images/ directory at the project root.
fn images_dir(project_root: &Path, site: &SiteConfig) -> PathBuf {
    let pages_dir = project_root.join(&site.paths.pages_dir);
    match pages_dir.parent() {
        Some(parent) if parent.join("images").is_dir() => parent.join("images"),
        _ => project_root.join("images"),
    }
}

/// Watch for file changes and trigger reload
async fn watch_files(path: PathBuf, reload_tx: broadcast::Sender<()>) -> Result<()> {
    let (tx, mut rx) = tokio::sync::mpsc::channel(100);

    let mut watcher =
        notify::recommended_watcher(move |res: Result<NotifyEvent, notify::Error>| {
            if let Ok(event) = res {
                let _ = tx.blocking_send(event);
            }
        })?;

    // Watch project directory recursively
    watcher.watch(&path, RecursiveMode::Recursive)?;

    while let Some(event) = rx.recv().await {
        match event.kind {
            EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_) => {
                // Filter out temporary files and hidden files
                if event.paths.iter().any(|p| {
                    let filename = p.file_name().unwrap_or_default().to_string_lossy();
                    !filename.starts_with('.') && !filename.ends_with('~')
                }) {
                    println!("   📝 File changed, reloading...");
                    let _ = reload_tx.send(());
                }
            }
            _ => {}
        }
    }

    Ok(())
}

/// SSE endpoint for hot reload
async fn sse_handler(
    State(state): State<AppState>,
) -> Sse<impl futures::Stream<Item = Result<Event, std::convert::Infallible>>> {
    let mut rx = state.reload_tx.subscribe();

    let stream = async_stream::stream! {
        loop {
            if rx.recv().await.is_ok() {
                yield Ok(Event::default().data("reload"));
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Index page: one row per location with links to its four service pages.
async fn index_handler(State(state): State<AppState>) -> Response {
    // Reload the config on every request so edits show up immediately
    let site = match load_site_config(&state.project_root) {
        Ok(site) => site,
        Err(e) => return config_error_page(&e.to_string()),
    };
    let dataset = Dataset::builtin();

    let rows_html: String = dataset
        .flatten_locations()
        .iter()
        .map(|location| {
            let links: String = ServiceType::ALL
                .iter()
                .map(|service| {
                    format!(
                        r#"<a href="/{}">{}</a>"#,
                        make_slug(&location.name, Some(*service)),
                        service.as_str()
                    )
                })
                .collect::<Vec<_>>()
                .join(" ");
            format!(
                r#"<li><span class="place">{}</span><span class="links">{}</span></li>"#,
                location.name, links
            )
        })
        .collect();

    let html = format!(
        r#"<!DOCTYPE html>
<html lang="it">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} | Preview</title>
    <style>
        * {{ margin: 0; padding: 0; box-sizing: border-box; }}
        body {{
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            background: #f5f5f5;
            padding: 2rem;
        }}
        .container {{
            max-width: 800px;
            margin: 0 auto;
            background: white;
            padding: 2rem;
            border-radius: 8px;
            box-shadow: 0 2px 8px rgba(0,0,0,0.1);
        }}
        .preview-badge {{
            background: #d99a2b;
            color: white;
            padding: 0.5rem 1rem;
            border-radius: 4px;
            display: inline-block;
            margin-bottom: 1rem;
            font-weight: bold;
        }}
        h1 {{
            font-size: 2rem;
            margin-bottom: 0.5rem;
            color: #222;
        }}
        .base-url {{
            color: #666;
            margin-bottom: 1.5rem;
        }}
        ul {{ list-style: none; }}
        li {{
            display: grid;
            grid-template-columns: 1fr auto;
            gap: 1rem;
            align-items: center;
            padding: 0.6rem 0;
            border-bottom: 1px solid #eee;
        }}
        li:last-child {{ border-bottom: none; }}
        .place {{ font-weight: 500; }}
        .links a {{
            color: #0b3d66;
            text-decoration: none;
            margin-left: 0.8rem;
        }}
        .links a:hover {{ text-decoration: underline; }}
        .footer {{
            margin-top: 2rem;
            padding-top: 2rem;
            border-top: 2px solid #eee;
            color: #999;
            font-size: 0.9rem;
            text-align: center;
        }}
    </style>
</head>
<body>
    <div class="container">
        <div class="preview-badge">🚀 PREVIEW MODE - Live Reload Active</div>

        <h1>{}</h1>
        <div class="base-url">{}</div>

        <ul>
            {}
        </ul>

        <div class="footer">
            Generated by landing-kit • Press Ctrl+C to stop preview
        </div>
    </div>

    <script>
        // Hot reload via Server-Sent Events
        const eventSource = new EventSource('/_reload');
        eventSource.onmessage = () => {{
            console.log('Reloading...');
            location.reload();
        }};
        eventSource.onerror = () => {{
            console.log('Preview server disconnected');
            eventSource.close();
        }};
    </script>
</body>
</html>"#,
        site.business.name, site.business.name, site.site.base_url, rows_html
    );

    Html(html).into_response()
}

/// Render one landing page on the fly, falling back to generated files on
/// disk for custom slugs outside the dataset.
async fn page_handler(
    UrlPath(slug): UrlPath<String>,
    State(state): State<AppState>,
) -> Response {
    let site = match load_site_config(&state.project_root) {
        Ok(site) => site,
        Err(e) => return config_error_page(&e.to_string()),
    };
    let dataset = Dataset::builtin();

    if let Some((location, service)) = resolve_slug(&dataset, &slug) {
        let spec = render_page(&location, service, &dataset, &site, &PageOverrides::default());
        return Html(page_html(&spec, &site, true)).into_response();
    }

    // Generated slugs are already in normal form; anything else could point
    // outside the pages directory.
    if normalize_slug(&slug) != slug {
        return not_found();
    }

    let file = state
        .project_root
        .join(&site.paths.pages_dir)
        .join(&slug)
        .join("index.html");
    match tokio::fs::read_to_string(&file).await {
        Ok(html) => Html(html).into_response(),
        Err(_) => not_found(),
    }
}

/// Match a URL slug back to a dataset location and service.
fn resolve_slug(dataset: &Dataset, slug: &str) -> Option<(LocationEntry, ServiceType)> {
    for location in dataset.flatten_locations() {
        for service in ServiceType::ALL {
            if make_slug(&location.name, Some(service)) == slug {
                return Some((location, service));
            }
        }
    }
    None
}

fn config_error_page(error: &str) -> Response {
    Html(format!(
        r#"<!DOCTYPE html>
<html><head><title>Error</title></head><body>
<h1>Configuration Error</h1>
<pre>{}</pre>
</body></html>"#,
        error
    ))
    .into_response()
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Html(
            r#"<!DOCTYPE html>
<html lang="it"><head><title>404</title></head><body>
<h1>Pagina non trovata</h1>
<p><a href="/">Torna all'elenco</a></p>
</body></html>"#
                .to_string(),
        ),
    )
        .into_response()
}
