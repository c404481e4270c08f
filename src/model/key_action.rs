//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Selection
    /// Move the selection up one row. Default: k/↑
    SelectPrev,
    /// Move the selection down one row. Default: j/↓
    SelectNext,

    // Pagination
    /// Next page (paged mode). Default: n/→/Page Down
    NextPage,
    /// Previous page (paged mode). Default: p/←/Page Up
    PrevPage,
    /// Jump to the first page. Default: g/Home
    FirstPage,
    /// Jump to the last page. Default: G/End
    LastPage,
    /// Explicitly load the next chunk (infinite mode). Default: m
    LoadMore,

    // Categories
    /// Switch to the next category tab. Default: Tab/]
    NextCategory,
    /// Switch to the previous category tab. Default: Shift+Tab/[
    PrevCategory,
    /// Select a category tab by position (0 = All). Default: 1-5
    SelectCategory(usize),

    // Detail & comments
    /// Open the selected listing's detail view. Default: Enter
    OpenDetail,
    /// Close the detail view. Default: Esc/Backspace
    CloseDetail,
    /// Start writing a comment on the open listing. Default: c
    StartComment,

    // Search
    /// Activate search input. Default: /
    StartSearch,
    /// Clear the search query. Default: Esc (while searching)
    ClearSearch,

    // Application
    /// Exit the application. Default: q/Ctrl+c
    Quit,
    /// Toggle help overlay. Default: ?
    Help,
}

impl KeyAction {
    /// Parse the name used in the `[keybindings]` config table.
    ///
    /// Names are snake_case variant names; `category_1` ..= `category_5`
    /// select tabs by position.
    pub fn from_config_name(name: &str) -> Option<Self> {
        let action = match name {
            "select_prev" => Self::SelectPrev,
            "select_next" => Self::SelectNext,
            "next_page" => Self::NextPage,
            "prev_page" => Self::PrevPage,
            "first_page" => Self::FirstPage,
            "last_page" => Self::LastPage,
            "load_more" => Self::LoadMore,
            "next_category" => Self::NextCategory,
            "prev_category" => Self::PrevCategory,
            "open_detail" => Self::OpenDetail,
            "close_detail" => Self::CloseDetail,
            "start_comment" => Self::StartComment,
            "start_search" => Self::StartSearch,
            "clear_search" => Self::ClearSearch,
            "quit" => Self::Quit,
            "help" => Self::Help,
            other => {
                let position: usize = other.strip_prefix("category_")?.parse().ok()?;
                if !(1..=5).contains(&position) {
                    return None;
                }
                Self::SelectCategory(position - 1)
            }
        };
        Some(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn select_category_carries_index() {
        match KeyAction::SelectCategory(3) {
            KeyAction::SelectCategory(i) => assert_eq!(i, 3),
            other => panic!("unexpected variant {other:?}"),
        }
    }

    #[test]
    fn config_names_parse() {
        assert_eq!(KeyAction::from_config_name("load_more"), Some(KeyAction::LoadMore));
        assert_eq!(
            KeyAction::from_config_name("category_1"),
            Some(KeyAction::SelectCategory(0))
        );
        assert_eq!(KeyAction::from_config_name("category_6"), None);
        assert_eq!(KeyAction::from_config_name("category_0"), None);
        assert_eq!(KeyAction::from_config_name("LoadMore"), None);
    }

    #[test]
    fn actions_are_hashable() {
        let set: HashSet<_> = [KeyAction::NextPage, KeyAction::NextPage, KeyAction::LoadMore]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
    }
}
