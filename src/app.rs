use crate::api::CatalogMessage;
use crate::catalog::Movie;
use std::sync::mpsc::{Receiver, TryRecvError};

/// Which of the three mutually exclusive screen states is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Loading,
    Error,
    Loaded(Vec<Movie>),
}

/// Rows taken by one card, borders included.
pub const CARD_HEIGHT: u16 = 10;

/// Rows around the card column: header(3) + footer(1) + status(1).
pub const LIST_OVERHEAD: u16 = 5;

pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Main application state.
pub struct App {
    pub screen: Screen,
    pub should_quit: bool,
    pub show_help: bool,

    // Card list state
    pub cursor: usize,
    pub page_size: usize, // Cards per screen, updated on resize

    // Overlay state; the overlay is visible iff `selected` is set
    pub selected: Option<usize>,
    pub detail_scroll: u16,
    pub detail_scroll_limit: u16, // Set from the last rendered frame

    pub tick: usize,
    pub status_msg: String,

    catalog_rx: Option<Receiver<CatalogMessage>>,
}

impl App {
    pub fn new() -> Self {
        Self {
            screen: Screen::Loading,
            should_quit: false,
            show_help: false,

            cursor: 0,
            page_size: 1,

            selected: None,
            detail_scroll: 0,
            detail_scroll_limit: 0,

            tick: 0,
            status_msg: String::new(),

            catalog_rx: None,
        }
    }

    /// Start waiting on the single catalog load.
    pub fn with_loader(mut self, rx: Receiver<CatalogMessage>) -> Self {
        self.catalog_rx = Some(rx);
        self
    }

    /// Drain the load channel without blocking. Called once per UI tick.
    pub fn poll_catalog(&mut self) {
        let Some(rx) = &self.catalog_rx else {
            return;
        };
        match rx.try_recv() {
            Ok(message) => {
                self.catalog_rx = None;
                self.apply(message);
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                // The fetch task died without reporting.
                tracing::error!("catalog loader exited without a result");
                self.catalog_rx = None;
                self.apply(CatalogMessage::Failed);
            }
        }
    }

    /// Apply a load outcome. Only `Loading` can transition.
    pub fn apply(&mut self, message: CatalogMessage) {
        if self.screen != Screen::Loading {
            tracing::debug!("ignoring catalog message outside the loading state");
            return;
        }
        self.screen = match message {
            CatalogMessage::Loaded(movies) => Screen::Loaded(movies),
            CatalogMessage::Failed => Screen::Error,
        };
        self.cursor = 0;
        self.selected = None;
    }

    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    pub fn spinner_frame(&self) -> &'static str {
        SPINNER_FRAMES[self.tick % SPINNER_FRAMES.len()]
    }

    /// Loaded movies, empty in any other state.
    pub fn movies(&self) -> &[Movie] {
        match &self.screen {
            Screen::Loaded(movies) => movies,
            _ => &[],
        }
    }

    pub fn selected_movie(&self) -> Option<&Movie> {
        self.selected.and_then(|i| self.movies().get(i))
    }

    pub fn overlay_visible(&self) -> bool {
        self.selected_movie().is_some()
    }

    /// Open the overlay for the movie at `index`.
    pub fn select_movie(&mut self, index: usize) {
        let Some(movie) = self.movies().get(index) else {
            return;
        };
        tracing::debug!(id = %movie.id, title = %movie.title, "movie selected");
        self.selected = Some(index);
        self.detail_scroll = 0;
    }

    /// Open the overlay for the card under the cursor.
    pub fn select_current(&mut self) {
        self.select_movie(self.cursor);
    }

    /// Close the overlay and forget the selection.
    pub fn dismiss_detail(&mut self) {
        if self.selected.take().is_some() {
            tracing::debug!("detail dismissed");
        }
        self.detail_scroll = 0;
    }

    /// Update page size based on terminal height.
    pub fn update_page_size(&mut self, terminal_height: u16) {
        let cards = terminal_height.saturating_sub(LIST_OVERHEAD) / CARD_HEIGHT;
        self.page_size = (cards as usize).max(1);
    }

    /// First card index of the page holding the cursor.
    pub fn page_offset(&self) -> usize {
        (self.cursor / self.page_size) * self.page_size
    }

    fn last_index(&self) -> usize {
        self.movies().len().saturating_sub(1)
    }

    pub fn cursor_next(&mut self) {
        if self.cursor < self.last_index() {
            self.cursor += 1;
        }
    }

    pub fn cursor_prev(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_page_down(&mut self) {
        self.cursor = (self.cursor + self.page_size).min(self.last_index());
    }

    pub fn cursor_page_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(self.page_size);
    }

    pub fn cursor_first(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_last(&mut self) {
        self.cursor = self.last_index();
    }

    /// Record how far the overlay body can scroll at the current size.
    pub fn set_detail_scroll_limit(&mut self, limit: u16) {
        self.detail_scroll_limit = limit;
        self.detail_scroll = self.detail_scroll.min(limit);
    }

    pub fn scroll_down(&mut self) {
        self.detail_scroll = self
            .detail_scroll
            .saturating_add(1)
            .min(self.detail_scroll_limit);
    }

    pub fn scroll_up(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_sub(1);
    }

    pub fn scroll_page_down(&mut self) {
        self.detail_scroll = self
            .detail_scroll
            .saturating_add(10)
            .min(self.detail_scroll_limit);
    }

    pub fn scroll_page_up(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_sub(10);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::mpsc;

    pub(crate) fn movie(id: &str, title: &str) -> Movie {
        Movie {
            id: id.to_string(),
            title: title.to_string(),
            image: format!("https://img.example/{id}.jpg"),
            director: "Hayao Miyazaki".to_string(),
            release_date: "1986".to_string(),
            score: "95".to_string(),
            description: "A boy and girl...".to_string(),
        }
    }

    pub(crate) fn loaded_app(count: usize) -> App {
        let mut app = App::new();
        let movies = (0..count)
            .map(|i| movie(&i.to_string(), &format!("Film {i}")))
            .collect();
        app.apply(CatalogMessage::Loaded(movies));
        app
    }

    #[test]
    fn test_starts_loading() {
        let app = App::new();
        assert_eq!(app.screen, Screen::Loading);
        assert!(app.movies().is_empty());
        assert!(!app.overlay_visible());
    }

    #[test]
    fn test_loaded_and_error_are_terminal() {
        let mut app = loaded_app(2);
        app.apply(CatalogMessage::Failed);
        assert!(matches!(app.screen, Screen::Loaded(_)));

        let mut app = App::new();
        app.apply(CatalogMessage::Failed);
        assert_eq!(app.screen, Screen::Error);
        app.apply(CatalogMessage::Loaded(vec![movie("1", "Laputa")]));
        assert_eq!(app.screen, Screen::Error);
    }

    #[test]
    fn test_poll_catalog_waits_then_applies() {
        let (tx, rx) = mpsc::channel();
        let mut app = App::new().with_loader(rx);

        app.poll_catalog();
        assert_eq!(app.screen, Screen::Loading);

        tx.send(CatalogMessage::Loaded(vec![movie("1", "Laputa")]))
            .unwrap();
        app.poll_catalog();
        assert_eq!(app.movies().len(), 1);
        assert_eq!(app.movies()[0].title, "Laputa");
    }

    #[test]
    fn test_poll_catalog_disconnected_is_failure() {
        let (tx, rx) = mpsc::channel::<CatalogMessage>();
        let mut app = App::new().with_loader(rx);
        drop(tx);

        app.poll_catalog();
        assert_eq!(app.screen, Screen::Error);
    }

    #[test]
    fn test_select_and_dismiss() {
        let mut app = loaded_app(3);

        app.select_movie(1);
        assert!(app.overlay_visible());
        assert_eq!(app.selected, Some(1));
        assert_eq!(app.selected_movie().unwrap().title, "Film 1");

        app.dismiss_detail();
        assert!(!app.overlay_visible());
        assert_eq!(app.selected, None);
    }

    #[test]
    fn test_select_out_of_range_is_ignored() {
        let mut app = loaded_app(2);
        app.select_movie(5);
        assert!(!app.overlay_visible());

        let mut app = App::new();
        app.select_movie(0);
        assert_eq!(app.selected, None);
    }

    #[test]
    fn test_select_current_uses_cursor() {
        let mut app = loaded_app(4);
        app.cursor_next();
        app.cursor_next();
        app.select_current();
        assert_eq!(app.selected_movie().unwrap().id, "2");
    }

    #[test]
    fn test_selection_resets_scroll() {
        let mut app = loaded_app(2);
        app.select_movie(0);
        app.set_detail_scroll_limit(30);
        app.scroll_page_down();
        assert_eq!(app.detail_scroll, 10);
        app.dismiss_detail();
        app.select_movie(1);
        assert_eq!(app.detail_scroll, 0);
    }

    #[test]
    fn test_detail_scroll_stops_at_limit() {
        let mut app = loaded_app(1);
        app.select_movie(0);
        app.set_detail_scroll_limit(12);

        app.scroll_page_down();
        app.scroll_page_down();
        assert_eq!(app.detail_scroll, 12);
        app.scroll_down();
        assert_eq!(app.detail_scroll, 12);

        // One press back up moves the text again
        app.scroll_up();
        assert_eq!(app.detail_scroll, 11);

        // A bigger terminal lowers the limit and pulls the offset with it
        app.set_detail_scroll_limit(4);
        assert_eq!(app.detail_scroll, 4);
    }

    #[test]
    fn test_cursor_is_clamped() {
        let mut app = loaded_app(3);
        app.cursor_prev();
        assert_eq!(app.cursor, 0);
        for _ in 0..10 {
            app.cursor_next();
        }
        assert_eq!(app.cursor, 2);
        app.cursor_first();
        assert_eq!(app.cursor, 0);
        app.cursor_last();
        assert_eq!(app.cursor, 2);
    }

    #[test]
    fn test_paging() {
        let mut app = loaded_app(12);
        // 3 cards fit: 5 overhead + 3 * 10
        app.update_page_size(35);
        assert_eq!(app.page_size, 3);

        app.cursor_page_down();
        assert_eq!(app.cursor, 3);
        assert_eq!(app.page_offset(), 3);
        app.cursor_next();
        assert_eq!(app.page_offset(), 3);
        app.cursor_last();
        assert_eq!(app.page_offset(), 9);
        app.cursor_page_down();
        assert_eq!(app.cursor, 11);
        app.cursor_page_up();
        assert_eq!(app.cursor, 8);
    }

    #[test]
    fn test_tiny_terminal_keeps_one_card_per_page() {
        let mut app = loaded_app(2);
        app.update_page_size(4);
        assert_eq!(app.page_size, 1);
    }

    #[test]
    fn test_spinner_cycles() {
        let mut app = App::new();
        let first = app.spinner_frame();
        app.on_tick();
        assert_ne!(app.spinner_frame(), first);
        for _ in 0..SPINNER_FRAMES.len() - 1 {
            app.on_tick();
        }
        assert_eq!(app.spinner_frame(), first);
    }
}
