use std::io;
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tokio::sync::mpsc;

use fotoscatter_core::{
    photo::ImageFetcher,
    storage::{Database, PhotoRepository},
    AppConfig,
};
use fotoscatter_tui::{
    app::{App, Mode},
    event::{AppEvent, EventHandler, ImageLoadResult},
    images::load_image,
    input::{handle_key_event, Action},
    theme::Theme,
    widgets::{GalleryWidget, PhotoDetailWidget, PopupWidget, StatusBarWidget},
};

pub async fn run(db: Arc<Database>, config: Arc<AppConfig>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle("Fotoscatter"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, db, config).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    db: Arc<Database>,
    config: Arc<AppConfig>,
) -> Result<()> {
    let mut app = App::new(config.clone(), Theme::default());

    // Load initial data
    let photos = PhotoRepository::new(&db).list_all().await?;
    app.set_photos(photos);

    let fetcher = Arc::new(ImageFetcher::new(&config)?);
    let event_handler = EventHandler::new(config.ui.tick_rate_ms);

    // Channel for async image loading results
    let (img_tx, mut img_rx) = mpsc::unbounded_channel::<ImageLoadResult>();

    loop {
        // Process any completed image loads (non-blocking)
        while let Ok(result) = img_rx.try_recv() {
            handle_image_result(&mut app, result);
        }

        // Adopt the current gallery area before drawing, so a resize
        // rescatters exactly once
        let size = terminal.size()?;
        let gallery_area = ratatui::layout::Rect::new(0, 0, size.width, size.height.saturating_sub(1));
        let viewport = app.viewport_for_area(gallery_area);
        app.update_viewport(viewport);

        // Draw UI
        terminal.draw(|frame| {
            let main_layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(frame.area());

            GalleryWidget::render(frame, main_layout[0], &app);
            StatusBarWidget::render(frame, main_layout[1], &app);

            // Render modal layers on top
            match app.mode {
                Mode::PhotoDetail => {
                    PhotoDetailWidget::render(frame, &mut app);
                }
                Mode::DeleteConfirm => {
                    let title = app
                        .selected_photo()
                        .map(|p| p.title.clone())
                        .unwrap_or_default();
                    PopupWidget::render_delete_confirm(frame, &title, &app.theme);
                }
                Mode::Gallery => {}
            }
        })?;

        if let Some(event) = event_handler.next()? {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, &app);
                    handle_action(&mut app, action, &db, &fetcher, &img_tx).await?;
                }
                // Viewport adoption at the top of the loop picks up the
                // new size on the next iteration
                AppEvent::Resize(_, _) => {}
                AppEvent::Tick => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle completed image load result
fn handle_image_result(app: &mut App, result: ImageLoadResult) {
    match result {
        ImageLoadResult::Success { url, image } => {
            app.images.insert_loaded(&url, image);
        }
        ImageLoadResult::Failure { url, error } => {
            tracing::warn!(url, error, "image load failed");
            app.images.insert_failed(&url, error);
        }
    }
}

/// Kick off an async download for the selected photo's image
fn request_image(app: &mut App, fetcher: &Arc<ImageFetcher>, tx: &mpsc::UnboundedSender<ImageLoadResult>) {
    if !app.config.ui.image_preview {
        return;
    }
    let Some(photo) = app.selected_photo() else {
        return;
    };
    let url = photo.url.clone();
    if app.images.is_ready(&url) || app.images.is_loading(&url) {
        return;
    }

    app.images.start_loading(&url);
    let fetcher = Arc::clone(fetcher);
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = match load_image(&fetcher, &url).await {
            Ok(image) => ImageLoadResult::Success { url, image },
            Err(error) => ImageLoadResult::Failure { url, error },
        };
        let _ = tx.send(result);
    });
}

async fn handle_action(
    app: &mut App,
    action: Action,
    db: &Arc<Database>,
    fetcher: &Arc<ImageFetcher>,
    img_tx: &mpsc::UnboundedSender<ImageLoadResult>,
) -> Result<()> {
    if action != Action::None {
        app.clear_status();
    }

    let line_step = f64::from(app.config.ui.cell_height_px);
    let half_page = f64::from(app.viewport.height) / 2.0;

    match action {
        Action::Quit => {
            app.should_quit = true;
        }
        Action::ScrollDown => app.scroll_by(line_step),
        Action::ScrollUp => app.scroll_by(-line_step),
        Action::ScrollHalfPageDown => app.scroll_by(half_page),
        Action::ScrollHalfPageUp => app.scroll_by(-half_page),
        Action::JumpToTop => app.scroll_to_top(),
        Action::JumpToBottom => app.scroll_to_bottom(),
        Action::NextPhoto => {
            app.select_next();
            if app.mode == Mode::PhotoDetail {
                request_image(app, fetcher, img_tx);
            }
        }
        Action::PrevPhoto => {
            app.select_prev();
            if app.mode == Mode::PhotoDetail {
                request_image(app, fetcher, img_tx);
            }
        }
        Action::OpenDetail => {
            if app.selected_photo().is_some() {
                app.mode = Mode::PhotoDetail;
                request_image(app, fetcher, img_tx);
            }
        }
        Action::OpenInBrowser => {
            if let Some(photo) = app.selected_photo() {
                if let Err(e) = open::that(&photo.url) {
                    app.set_status(format!("Failed to open browser: {}", e));
                }
            }
        }
        Action::Delete => {
            if app.selected_photo().is_some() {
                app.mode = Mode::DeleteConfirm;
            }
        }
        Action::Reshuffle => {
            app.rescatter();
            app.set_status("Reshuffled");
        }
        Action::ExitMode => {
            app.mode = Mode::Gallery;
        }
        Action::Confirm => {
            if app.mode == Mode::DeleteConfirm {
                if let Some(photo) = app.selected_photo() {
                    let id = photo.id;
                    let title = photo.title.clone();
                    let repo = PhotoRepository::new(db);
                    repo.delete(id).await?;
                    let photos = repo.list_all().await?;
                    app.set_photos(photos);
                    app.set_status(format!("Deleted \"{}\"", title));
                }
                app.mode = Mode::Gallery;
            }
        }
        Action::Cancel => {
            app.mode = Mode::Gallery;
        }
        Action::None => {}
    }

    Ok(())
}
