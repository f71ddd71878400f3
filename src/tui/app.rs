// TUI application state
//
// Owns everything the renderer reads: the country list, the current sort
// key, the selection, the overlay state, and the captured logs. The event
// loop mutates this state; drawing never does (except for recording the
// hit-test areas of the current frame).

use super::modal::Modal;
use super::theme::{Theme, ThemeKind};
use crate::config::Config;
use crate::countries::Country;
use crate::logging::LogBuffer;
use crate::sort::{sort_countries, SortKey};
use ratatui::layout::Rect;
use ratatui::widgets::TableState;

/// Main content views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Table,
    Logs,
}

/// Main application state for the TUI
pub struct App {
    /// Country list in display order (already sorted)
    pub countries: Vec<Country>,

    /// Table selection and scroll offset
    pub table_state: TableState,

    /// Active sort key
    pub sort_key: SortKey,

    /// Active overlay, if any
    pub modal: Option<Modal>,

    /// Current main view
    pub view: View,

    /// Number of in-flight fetches. Fetches are uncoordinated: a late
    /// response still overwrites the list (last-writer-wins).
    pub loading: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Current color theme
    pub theme_kind: ThemeKind,
    pub theme: Theme,

    /// Captured diagnostics for the status line and logs view
    pub log_buffer: LogBuffer,

    /// Vertical scroll inside the detail overlay
    pub detail_scroll: u16,

    /// Scroll offset for the logs view
    pub logs_scroll: usize,

    // Hit-test areas recorded by the renderer each frame, used to map
    // mouse clicks to rows and to detect clicks outside the overlay
    pub table_rows_area: Rect,
    pub modal_area: Rect,
}

impl App {
    pub fn with_config(log_buffer: LogBuffer, config: &Config) -> Self {
        let theme_kind = ThemeKind::from_name(&config.theme).unwrap_or_default();
        Self {
            countries: Vec::new(),
            table_state: TableState::default(),
            sort_key: config.sort,
            modal: None,
            view: View::default(),
            loading: 0,
            should_quit: false,
            theme_kind,
            theme: theme_kind.theme(),
            log_buffer,
            detail_scroll: 0,
            logs_scroll: 0,
            table_rows_area: Rect::default(),
            modal_area: Rect::default(),
        }
    }

    /// Record that a fetch was started
    pub fn load_started(&mut self) {
        self.loading += 1;
    }

    /// Apply a freshly fetched country list
    ///
    /// The list is sorted with the key that is current *now*, not the key
    /// that was current when the fetch started - the same behavior the
    /// original had, and what makes overlapping responses last-writer-wins.
    pub fn apply_countries(&mut self, mut countries: Vec<Country>) {
        self.loading = self.loading.saturating_sub(1);
        sort_countries(&mut countries, Some(self.sort_key));
        self.countries = countries;

        // A shrinking reload can strand an open detail overlay on a row
        // that no longer exists; close it rather than render nothing
        if let Some(index) = self.modal.as_ref().and_then(Modal::country_index) {
            if index >= self.countries.len() {
                self.close_modal();
            }
        }

        // Keep the selection valid across reloads
        if self.countries.is_empty() {
            self.table_state.select(None);
        } else {
            let selected = self.table_state.selected().unwrap_or(0);
            self.table_state
                .select(Some(selected.min(self.countries.len() - 1)));
        }
    }

    /// Record that a fetch failed. The list keeps its previous contents;
    /// the error itself was already logged by the loader.
    pub fn load_failed(&mut self) {
        self.loading = self.loading.saturating_sub(1);
    }

    /// Change the sort key. Returns true if it actually changed, which is
    /// the caller's cue to re-run the load pipeline.
    pub fn set_sort(&mut self, key: SortKey) -> bool {
        if self.sort_key == key {
            return false;
        }
        self.sort_key = key;
        true
    }

    /// Advance to the next sort key in the cycle
    pub fn cycle_sort(&mut self) -> SortKey {
        self.sort_key = self.sort_key.next();
        self.sort_key
    }

    /// Move the table selection up
    pub fn select_previous(&mut self) {
        if self.countries.is_empty() {
            return;
        }
        let selected = self.table_state.selected().unwrap_or(0);
        self.table_state.select(Some(selected.saturating_sub(1)));
    }

    /// Move the table selection down
    pub fn select_next(&mut self) {
        if self.countries.is_empty() {
            return;
        }
        let selected = self.table_state.selected().unwrap_or(0);
        self.table_state
            .select(Some((selected + 1).min(self.countries.len() - 1)));
    }

    /// Jump to the first / last row
    pub fn select_first(&mut self) {
        if !self.countries.is_empty() {
            self.table_state.select(Some(0));
        }
    }

    pub fn select_last(&mut self) {
        if !self.countries.is_empty() {
            self.table_state.select(Some(self.countries.len() - 1));
        }
    }

    /// Open the detail overlay for the given row
    ///
    /// Opening while already open simply replaces the content.
    pub fn open_details(&mut self, index: usize) {
        if index >= self.countries.len() {
            return;
        }
        self.table_state.select(Some(index));
        self.detail_scroll = 0;
        self.modal = Some(Modal::details(index));
    }

    /// Open the detail overlay for the selected row, if any
    pub fn open_selected_details(&mut self) {
        if let Some(index) = self.table_state.selected() {
            self.open_details(index);
        }
    }

    /// Close whatever overlay is open. No-op when none is.
    pub fn close_modal(&mut self) {
        self.modal = None;
        self.detail_scroll = 0;
    }

    /// Country shown by the detail overlay, if one is open
    pub fn modal_country(&self) -> Option<&Country> {
        self.modal
            .as_ref()
            .and_then(|m| m.country_index())
            .and_then(|idx| self.countries.get(idx))
    }

    /// Plain-text form of the detail overlay (rendering and clipboard)
    pub fn details_text(&self, country: &Country) -> String {
        format!(
            "{}\n\nRegion: {}\nSubregion: {}\nCapital: {}\nPopulation: {}\nArea: {} km²\n\n{}: {}",
            country.name.official,
            country.region,
            country.subregion,
            country.capital_display(),
            country.population,
            country.area,
            country.flag_alt(),
            country.flags.svg,
        )
    }

    /// Switch between the table and the logs view
    pub fn toggle_logs(&mut self) {
        self.view = match self.view {
            View::Table => View::Logs,
            View::Logs => View::Table,
        };
        self.logs_scroll = 0;
    }

    /// Cycle to the next theme
    pub fn cycle_theme(&mut self) {
        self.theme_kind = self.theme_kind.next();
        self.theme = self.theme_kind.theme();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::sample_countries;

    fn app() -> App {
        App::with_config(LogBuffer::new(), &Config::default())
    }

    #[test]
    fn apply_sorts_with_current_key() {
        let mut app = app();
        app.load_started();
        app.apply_countries(sample_countries());

        // Default key is capital; the no-capital record sorts first
        assert_eq!(app.loading, 0);
        assert_eq!(app.countries[0].first_capital(), "");
        for pair in app.countries.windows(2) {
            assert!(
                pair[0].first_capital().to_lowercase() <= pair[1].first_capital().to_lowercase()
            );
        }
    }

    #[test]
    fn late_response_overwrites_earlier_one() {
        let mut app = app();
        app.load_started();
        app.load_started();

        let full = sample_countries();
        let partial = full[..2].to_vec();

        app.apply_countries(full);
        app.apply_countries(partial);

        // Last writer wins, even if it carries less data
        assert_eq!(app.countries.len(), 2);
        assert_eq!(app.loading, 0);
    }

    #[test]
    fn failed_load_keeps_previous_contents() {
        let mut app = app();
        app.load_started();
        app.apply_countries(sample_countries());
        let before = app.countries.len();

        app.load_started();
        app.load_failed();

        assert_eq!(app.countries.len(), before);
        assert_eq!(app.loading, 0);
    }

    #[test]
    fn failed_initial_load_leaves_table_empty() {
        let mut app = app();
        app.load_started();
        app.load_failed();

        assert!(app.countries.is_empty());
        assert!(app.modal.is_none());
    }

    #[test]
    fn open_and_close_details() {
        let mut app = app();
        app.apply_countries(sample_countries());

        app.open_details(1);
        assert!(matches!(app.modal, Some(Modal::Details(1))));

        // Opening again replaces the content, stays visible
        app.open_details(2);
        assert!(matches!(app.modal, Some(Modal::Details(2))));

        app.close_modal();
        assert!(app.modal.is_none());

        // Closing while already hidden is a no-op
        app.close_modal();
        assert!(app.modal.is_none());
    }

    #[test]
    fn open_details_out_of_range_is_ignored() {
        let mut app = app();
        app.open_details(0);
        assert!(app.modal.is_none());
    }

    #[test]
    fn shrinking_reload_closes_stale_detail_overlay() {
        let mut app = app();
        app.apply_countries(sample_countries());
        app.open_details(5);

        // The reload drops the row the overlay was showing
        app.apply_countries(sample_countries()[..2].to_vec());
        assert!(app.modal.is_none());

        // An overlay on a still-valid row survives a reload
        app.open_details(1);
        app.apply_countries(sample_countries());
        assert!(matches!(app.modal, Some(Modal::Details(1))));

        // The help overlay carries no row and is never affected
        app.modal = Some(Modal::Help);
        app.apply_countries(sample_countries()[..2].to_vec());
        assert!(matches!(app.modal, Some(Modal::Help)));
    }

    #[test]
    fn details_text_contains_every_field() {
        let mut app = app();
        app.apply_countries(sample_countries());
        let brazil = app
            .countries
            .iter()
            .find(|c| c.name.official.contains("Brazil"))
            .unwrap();

        let text = app.details_text(brazil);
        assert!(text.contains("Federative Republic of Brazil"));
        assert!(text.contains("Region: Americas"));
        assert!(text.contains("Subregion: South America"));
        assert!(text.contains("Capital: Brasília"));
        assert!(text.contains("Population: 212559409"));
        assert!(text.contains("Area: 8515767 km²"));
        assert!(text.contains("Flag of Federative Republic of Brazil"));
        assert!(text.contains("https://flagcdn.com/br.svg"));
    }

    #[test]
    fn sort_change_detection() {
        let mut app = app();
        assert_eq!(app.sort_key, SortKey::Capital);
        assert!(!app.set_sort(SortKey::Capital));
        assert!(app.set_sort(SortKey::Name));
        assert_eq!(app.sort_key, SortKey::Name);
    }

    #[test]
    fn selection_stays_in_bounds() {
        let mut app = app();
        app.apply_countries(sample_countries());

        app.select_last();
        let last = app.table_state.selected().unwrap();
        app.select_next();
        assert_eq!(app.table_state.selected(), Some(last));

        app.select_first();
        app.select_previous();
        assert_eq!(app.table_state.selected(), Some(0));
    }

    #[test]
    fn selection_clamps_when_list_shrinks() {
        let mut app = app();
        app.apply_countries(sample_countries());
        app.select_last();

        app.apply_countries(sample_countries()[..2].to_vec());
        assert_eq!(app.table_state.selected(), Some(1));
    }
}
