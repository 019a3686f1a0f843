//! Runtime: terminal lifecycle and the event loop for the TUI.
//!
//! Responsibilities
//! - Own the terminal lifecycle (enter/leave alternate screen, raw mode).
//! - Mount the navigation shell and subscribe it to the route and preference
//!   sources; the subscriptions are released when the mount guard drops.
//! - Route input to `MainView` and execute returned `Effect`s.
//! - Tick quickly only while the panel is animating; idle otherwise.
use std::io::Stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers, MouseEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use folio_nav::{
    MenuTree, NavigationShell, PreferenceSource, PreferenceWatcher, RouteSource, RouteWatcher, ShellGeometry,
    ShellOptions,
};
use folio_types::{DisplayPreferences, Effect, Msg, SiteContent};
use folio_util::{ShellConfig, UserPreferences};
use ratatui::{Terminal, prelude::*};
use tokio::{
    signal,
    sync::mpsc,
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tracing::{debug, info, warn};

use crate::app::{App, SharedCtx};
use crate::ui::components::Component;
use crate::ui::main_component::MainView;
use crate::ui::theme;

const FAST_INTERVAL: Duration = Duration::from_millis(16);
const IDLE_INTERVAL: Duration = Duration::from_millis(5000);

/// Spawns the input task, which polls the terminal and forwards `crossterm`
/// events over a Tokio channel.
fn spawn_input_task() -> (JoinHandle<()>, mpsc::Receiver<Event>) {
    let (sender, receiver) = mpsc::channel(500);

    let handle = tokio::spawn(async move {
        let sixteen_ms = Duration::from_millis(16);
        let mut last_mouse_move = Instant::now();
        loop {
            match event::poll(sixteen_ms) {
                Ok(true) => {}
                Ok(false) => {
                    tokio::task::yield_now().await;
                    continue;
                }
                Err(error) => {
                    warn!(%error, "failed to poll terminal events");
                    break;
                }
            }
            match event::read() {
                Ok(event) => {
                    // Throttle mouse move events to once per 16 ms.
                    let is_mouse_move = event.as_mouse_event().is_some_and(|e| e.kind == MouseEventKind::Moved);
                    if is_mouse_move {
                        if last_mouse_move.elapsed() < sixteen_ms {
                            continue;
                        }
                        last_mouse_move = Instant::now();
                    }
                    if let Err(error) = sender.send(event).await {
                        warn!(%error, "failed to forward terminal event");
                        break;
                    }
                }
                Err(error) => {
                    warn!(%error, "failed to read terminal event");
                    break;
                }
            }
        }
    });
    (handle, receiver)
}

/// Everything tied to one mounted shell. Dropping it stops input delivery
/// and releases both source subscriptions.
struct ShellMount {
    input_task: JoinHandle<()>,
    input: mpsc::Receiver<Event>,
    routes: RouteWatcher,
    preferences: PreferenceWatcher,
}

impl Drop for ShellMount {
    fn drop(&mut self) {
        self.input_task.abort();
        debug!("shell mount released");
    }
}

/// Put the terminal into raw mode and enter the alternate screen.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

fn render(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App, main_view: &mut MainView) -> Result<()> {
    // Rebuild focus just before rendering so visibility changes are reflected.
    app.rebuild_focus();
    if app.focus.focused().is_none() {
        main_view.restore_focus(app);
    }
    terminal.draw(|frame| main_view.render(frame, frame.area(), app))?;
    Ok(())
}

fn handle_input_event(app: &mut App, main_view: &mut MainView, input_event: Event) -> Vec<Effect> {
    match input_event {
        Event::Key(key_event) => main_view.handle_key_events(app, key_event),
        Event::Mouse(mouse_event) => main_view.handle_mouse_events(app, mouse_event),
        Event::Resize(width, height) => main_view.handle_message(app, &Msg::Resize(width, height)),
        Event::FocusGained | Event::FocusLost | Event::Paste(_) => Vec::new(),
    }
}

/// Producers of the signals the shell listens to. Effects write to these;
/// the shell only ever sees the resulting notifications.
struct Sources {
    routes: RouteSource,
    preferences: PreferenceSource,
}

impl Sources {
    /// Executes effects. Returns `false` once the application should quit.
    fn apply(&mut self, app: &mut App, effects: Vec<Effect>) -> bool {
        for effect in effects {
            match effect {
                Effect::Navigate(route) => {
                    self.routes.navigate(&route);
                }
                Effect::NavigateBack => {
                    if self.routes.back().is_none() {
                        debug!("no history to go back to");
                    }
                }
                Effect::ToggleReducedMotion => {
                    let reduced_motion = !self.preferences.current().reduced_motion;
                    if let Err(error) = app.ctx.preferences.set_reduced_motion(reduced_motion) {
                        warn!(%error, "failed to persist reduced-motion preference");
                    }
                    self.preferences.set_reduced_motion(reduced_motion);
                    info!(reduced_motion, "reduced motion toggled");
                }
                Effect::Quit => return false,
            }
        }
        true
    }
}

/// Entry point for the TUI runtime: mounts the shell on `route`, runs the
/// event loop and restores the terminal on exit.
pub async fn run_app(site: Arc<SiteContent>, tree: Arc<MenuTree>, route: String) -> Result<()> {
    let config = ShellConfig::load();
    let preferences_store = UserPreferences::new().unwrap_or_else(|error| {
        warn!(%error, "preferences unavailable; using defaults");
        UserPreferences::ephemeral()
    });
    let loaded_theme = theme::load(preferences_store.preferred_theme().as_deref());
    info!(theme = loaded_theme.definition.id, "theme selected");

    let viewport = crossterm::terminal::size().unwrap_or((80, 24));
    let geometry = ShellGeometry {
        wide_panel_columns: config.wide_panel_columns,
        narrow_panel_columns: config.narrow_panel_columns,
        breakpoint_columns: config.breakpoint_columns,
    };
    let initial_preferences = DisplayPreferences {
        reduced_motion: preferences_store.effective_reduced_motion(),
        is_wide_viewport: geometry.is_wide(viewport.0),
    };
    let mut sources = Sources {
        routes: RouteSource::new(&route),
        preferences: PreferenceSource::new(initial_preferences, config.breakpoint_columns),
    };

    let options = ShellOptions {
        policy: config.submenu_policy,
        geometry,
    };
    let shell = NavigationShell::mount(tree, &sources.routes.current(), sources.preferences.current(), options);
    let ctx = SharedCtx {
        theme: loaded_theme.theme,
        site,
        preferences: preferences_store,
    };
    let mut app = App::new(ctx, shell, viewport, Duration::from_millis(config.transition_ms));
    let mut main_view = MainView::default();

    let (input_task, input) = spawn_input_task();
    let mut mount = ShellMount {
        input_task,
        input,
        routes: sources.routes.subscribe(),
        preferences: sources.preferences.subscribe(),
    };

    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, &mut app, &mut main_view, &mut sources, &mut mount).await;
    drop(mount);
    info!(route = %app.shell.current_route(), "navigation shell unmounted");
    cleanup_terminal(&mut terminal)?;
    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    main_view: &mut MainView,
    sources: &mut Sources,
    mount: &mut ShellMount,
) -> Result<()> {
    let mut current_interval = IDLE_INTERVAL;
    let mut ticker = time::interval(current_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    render(terminal, app, main_view)?;

    // Track the last known terminal size to synthesize Resize messages when
    // some terminals fail to emit them.
    let mut last_size: Option<(u16, u16)> = Some(app.viewport);

    loop {
        let animating = app.is_animating(Instant::now());
        let target_interval = if animating { FAST_INTERVAL } else { IDLE_INTERVAL };
        if target_interval != current_interval {
            current_interval = target_interval;
            ticker = time::interval(current_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        }

        let (effects, mut needs_render) = tokio::select! {
            maybe_event = mount.input.recv() => {
                let Some(event) = maybe_event else {
                    // Input channel closed; shut down cleanly.
                    break;
                };
                if let Event::Key(key_event) = event
                    && key_event.code == KeyCode::Char('c')
                    && key_event.modifiers.contains(KeyModifiers::CONTROL)
                {
                    break;
                }
                if let Event::Resize(columns, rows) = event {
                    last_size = Some((columns, rows));
                    sources.preferences.set_viewport_columns(columns);
                }
                (handle_input_event(app, main_view, event), true)
            }

            changed = mount.routes.changed() => {
                if changed.is_err() {
                    break;
                }
                let route = mount.routes.borrow_and_update().clone();
                (main_view.handle_message(app, &Msg::RouteChanged(route)), true)
            }

            changed = mount.preferences.changed() => {
                if changed.is_err() {
                    break;
                }
                let preferences = *mount.preferences.borrow_and_update();
                (main_view.handle_message(app, &Msg::PreferencesChanged(preferences)), true)
            }

            // One more frame after the animation ends lands it on target.
            _ = ticker.tick() => (main_view.handle_message(app, &Msg::Tick), animating),

            _ = signal::ctrl_c() => { break; }
        };

        if !sources.apply(app, effects) {
            break;
        }

        // Fallback: detect terminal size changes even if no explicit Resize
        // event was received.
        if let Ok((columns, rows)) = crossterm::terminal::size()
            && last_size != Some((columns, rows))
        {
            last_size = Some((columns, rows));
            sources.preferences.set_viewport_columns(columns);
            main_view.handle_message(app, &Msg::Resize(columns, rows));
            needs_render = true;
        }

        if needs_render {
            render(terminal, app, main_view)?;
        }
    }
    Ok(())
}
