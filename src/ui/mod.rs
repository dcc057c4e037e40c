pub mod app;
pub mod form;
pub mod views;

use std::io::Stdout;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;
use tokio::sync::mpsc;

use crate::state::SharedStore;
use crate::utils::Result;
use app::{App, Command, Outcome};

/// Run the interactive client until the user quits. Store operations are
/// spawned as tasks so rendering never waits on the network; write
/// operations report back over a channel so the initiating view can settle
/// its own submission state.
pub async fn run(store: SharedStore, initial_agenda: Option<String>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, store, initial_agenda).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    store: SharedStore,
    initial_agenda: Option<String>,
) -> Result<()> {
    let mut app = App::new();
    let (tx, mut rx) = mpsc::unbounded_channel::<Outcome>();

    // Initial agenda fetch; a preselected agenda is applied after the
    // list arrives.
    {
        let store = store.clone();
        tokio::spawn(async move {
            store.fetch_agendas().await;
            if let Some(slug) = initial_agenda {
                store.select_agenda(&slug).await;
            }
        });
    }

    loop {
        let state = store.snapshot();
        app.clamp_selection(&state);
        terminal.draw(|frame| views::draw(frame, &app, &state))?;

        while let Ok(outcome) = rx.try_recv() {
            app.on_outcome(outcome);
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let state = store.snapshot();
                    if let Some(command) = app.on_key(key, &state) {
                        dispatch(command, &store, &tx);
                    }
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn dispatch(command: Command, store: &SharedStore, tx: &mpsc::UnboundedSender<Outcome>) {
    match command {
        Command::Quit => {}
        Command::DismissError => store.dismiss_error(),
        Command::Refresh => {
            let store = store.clone();
            tokio::spawn(async move {
                store.fetch_agendas().await;
                if let Some(slug) = store.snapshot().selected {
                    store.fetch_contacts(&slug).await;
                }
            });
        }
        Command::SelectAgenda(slug) => {
            let store = store.clone();
            tokio::spawn(async move {
                store.select_agenda(&slug).await;
            });
        }
        Command::CreateAgenda(slug) => {
            let store = store.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let ok = store.create_agenda(&slug).await.is_ok();
                let _ = tx.send(Outcome::AgendaCreated { ok });
            });
        }
        Command::DeleteAgenda(slug) => {
            let store = store.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                // Failures land in the store's error banner.
                let _ = store.delete_agenda(&slug).await;
                let _ = tx.send(Outcome::AgendaDeleted);
            });
        }
        Command::CreateContact(draft) => {
            let store = store.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let ok = store.create_contact(&draft).await.is_ok();
                let _ = tx.send(Outcome::Submit { ok });
            });
        }
        Command::UpdateContact { id, draft } => {
            let store = store.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let ok = store.update_contact(id, &draft).await.is_ok();
                let _ = tx.send(Outcome::Submit { ok });
            });
        }
        Command::DeleteContact(id) => {
            let store = store.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let _ = store.delete_contact(id).await;
                let _ = tx.send(Outcome::ContactDeleted);
            });
        }
    }
}
