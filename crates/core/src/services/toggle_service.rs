use log::debug;

use crate::models::session::SessionState;

/// Favorite and chart-visibility toggles.
///
/// Pure business logic with no I/O. Never fails: any symbol is
/// accepted, including ones outside the catalog.
pub struct ToggleService;

impl ToggleService {
    pub fn new() -> Self {
        Self
    }

    /// Add `symbol` to the favorites, or remove it if already there.
    /// Returns whether the symbol is a favorite afterwards.
    pub fn toggle_favorite(&self, state: &mut SessionState, symbol: &str) -> bool {
        let is_favorite = match state.favorites.iter().position(|s| s == symbol) {
            Some(idx) => {
                state.favorites.remove(idx);
                false
            }
            None => {
                state.favorites.push(symbol.to_string());
                true
            }
        };
        debug!("event=toggle_favorite module=toggle status=ok symbol={symbol} favorite={is_favorite}");
        is_favorite
    }

    /// Open the chart of `symbol`, or close it if it is already open.
    ///
    /// Opening a chart closes whichever other chart was open: at most one
    /// entry of the visibility map is `true` afterwards.
    /// Returns whether the chart is visible afterwards.
    pub fn toggle_chart_view(&self, state: &mut SessionState, symbol: &str) -> bool {
        let visible = if self.is_chart_visible(state, symbol) {
            state.chart_views.insert(symbol.to_string(), false);
            false
        } else {
            for open in state.chart_views.values_mut() {
                *open = false;
            }
            state.chart_views.insert(symbol.to_string(), true);
            true
        };
        debug!("event=toggle_chart module=toggle status=ok symbol={symbol} visible={visible}");
        visible
    }

    /// Close the chart of `symbol`. Returns `true` if it was open.
    pub fn close_chart(&self, state: &mut SessionState, symbol: &str) -> bool {
        match state.chart_views.get_mut(symbol) {
            Some(open) if *open => {
                *open = false;
                true
            }
            _ => false,
        }
    }

    pub fn is_favorite(&self, state: &SessionState, symbol: &str) -> bool {
        state.favorites.iter().any(|s| s == symbol)
    }

    pub fn is_chart_visible(&self, state: &SessionState, symbol: &str) -> bool {
        state.chart_views.get(symbol).copied().unwrap_or(false)
    }

    /// The symbol whose chart is open, if any.
    pub fn visible_chart<'a>(&self, state: &'a SessionState) -> Option<&'a str> {
        state
            .chart_views
            .iter()
            .find(|(_, open)| **open)
            .map(|(symbol, _)| symbol.as_str())
    }
}

impl Default for ToggleService {
    fn default() -> Self {
        Self::new()
    }
}
